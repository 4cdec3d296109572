//! Depth-bounded backtracking route search.
//!
//! [`RoutePlanner`] finds a feasible multi-leg itinerary from a hub to a
//! destination under per-flight capacity, minimum connection time, a hop
//! bound, cycle avoidance, and a delivery deadline. Infeasibility is a
//! frequent, expected outcome and is returned as `None`, never as an error.

use super::config::PlannerConfig;
use super::index::FlightIndex;
use super::ledger::CapacityLedger;
use super::route::{Route, RouteLeg};
use crate::model::{Airport, AirportCode, FlightId, MINUTES_PER_DAY};
use rand::Rng;
use std::collections::HashMap;

/// Route search over a [`FlightIndex`] plus a mutable [`CapacityLedger`].
///
/// The planner itself is read-only and freely shareable; all mutable search
/// state is the ledger passed into [`plan`](RoutePlanner::plan), so callers
/// choose between one shared ledger and per-evaluation scratch ledgers.
pub struct RoutePlanner<'a> {
    index: &'a FlightIndex,
    airports: &'a HashMap<AirportCode, Airport>,
    hubs: &'a [AirportCode],
    config: &'a PlannerConfig,
}

/// A schedulable first leg, ranked before recursion.
struct Candidate {
    leg: RouteLeg,
    /// Regional proximity of the leg's arrival airport to the final
    /// destination: 1.0 same continent, 2.0 intercontinental.
    proximity: f64,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(
        index: &'a FlightIndex,
        airports: &'a HashMap<AirportCode, Airport>,
        hubs: &'a [AirportCode],
        config: &'a PlannerConfig,
    ) -> RoutePlanner<'a> {
        RoutePlanner {
            index,
            airports,
            hubs,
            config,
        }
    }

    /// Plans a route for `quantity` packages from `origin` to `destination`,
    /// departing at or after `earliest_utc` and arriving by `deadline_utc`
    /// (both absolute UTC minutes).
    ///
    /// On success every leg's capacity is reserved in `ledger`. On
    /// infeasibility the ledger is left exactly as it was found.
    pub fn plan<R: Rng>(
        &self,
        ledger: &mut CapacityLedger,
        rng: &mut R,
        origin: AirportCode,
        destination: AirportCode,
        quantity: u32,
        earliest_utc: u32,
        deadline_utc: u32,
    ) -> Option<Route> {
        if origin == destination || self.hubs.contains(&destination) {
            return None;
        }
        if !self.airports.contains_key(&origin) || !self.airports.contains_key(&destination) {
            return None;
        }

        let start = ledger.checkpoint();
        let mut visited = Vec::with_capacity(self.config.max_hops);
        let legs = self.search(
            ledger,
            rng,
            origin,
            destination,
            quantity,
            earliest_utc,
            deadline_utc,
            &mut visited,
            0,
        );
        match legs {
            Some(legs) => Some(Route::new(legs)),
            None => {
                // Every exit path below rolls its own frame back; this keeps
                // the no-leak contract even if a future branch forgets to.
                ledger.rollback_to(start);
                None
            }
        }
    }

    /// Recursive frame: routes from `current` to `destination` using at most
    /// `max_hops - hops_used` further legs.
    #[allow(clippy::too_many_arguments)]
    fn search<R: Rng>(
        &self,
        ledger: &mut CapacityLedger,
        rng: &mut R,
        current: AirportCode,
        destination: AirportCode,
        quantity: u32,
        earliest_utc: u32,
        deadline_utc: u32,
        visited: &mut Vec<AirportCode>,
        hops_used: usize,
    ) -> Option<Vec<RouteLeg>> {
        if hops_used >= self.config.max_hops {
            return None;
        }

        let direct = self.best_direct_leg(
            ledger,
            current,
            destination,
            quantity,
            earliest_utc,
            deadline_utc,
        );

        // A feasible direct flight is taken with probability `direct_bias`;
        // otherwise connecting itineraries are explored first and the direct
        // leg remains the fallback.
        if let Some(leg) = direct {
            if rng.random_range(0.0..1.0) < self.config.direct_bias
                && ledger.reserve(leg.flight, leg.day, quantity, self.capacity_of(leg.flight))
            {
                return Some(vec![leg]);
            }
        }

        // Connecting itineraries need at least two more legs.
        if hops_used + 1 < self.config.max_hops {
            visited.push(current);
            let connected = self.search_connections(
                ledger,
                rng,
                current,
                destination,
                quantity,
                earliest_utc,
                deadline_utc,
                visited,
                hops_used,
            );
            visited.pop();
            if connected.is_some() {
                return connected;
            }
        }

        // Fallback: the direct leg, when exploration found nothing.
        if let Some(leg) = direct {
            if ledger.reserve(leg.flight, leg.day, quantity, self.capacity_of(leg.flight)) {
                return Some(vec![leg]);
            }
        }

        None
    }

    /// Enumerates, ranks, and tries candidate first legs toward unvisited
    /// stopovers. Reservations made for a candidate are rolled back before
    /// the next candidate is tried.
    #[allow(clippy::too_many_arguments)]
    fn search_connections<R: Rng>(
        &self,
        ledger: &mut CapacityLedger,
        rng: &mut R,
        current: AirportCode,
        destination: AirportCode,
        quantity: u32,
        earliest_utc: u32,
        deadline_utc: u32,
        visited: &mut Vec<AirportCode>,
        hops_used: usize,
    ) -> Option<Vec<RouteLeg>> {
        let destination_continent = self.airports[&destination].continent;

        let mut candidates: Vec<Candidate> = Vec::new();
        for &flight_id in self.index.departures(current) {
            let template = self.index.flight(flight_id);
            let stopover = template.destination;
            if stopover == destination || stopover == current || visited.contains(&stopover) {
                continue;
            }
            let Some(stop_airport) = self.airports.get(&stopover) else {
                continue;
            };
            let Some(leg) =
                self.schedule_leg(ledger, flight_id, quantity, earliest_utc, deadline_utc)
            else {
                continue;
            };
            let proximity = if stop_airport.continent == destination_continent {
                1.0
            } else {
                2.0
            };
            candidates.push(Candidate { leg, proximity });
        }

        // Closest-to-destination first; ties broken by earlier arrival and
        // flight id so the ranking is deterministic.
        candidates.sort_by(|a, b| {
            a.proximity
                .total_cmp(&b.proximity)
                .then(a.leg.arrival_utc.cmp(&b.leg.arrival_utc))
                .then(a.leg.flight.cmp(&b.leg.flight))
        });
        candidates.truncate(self.config.max_candidates);

        for candidate in candidates {
            let leg = candidate.leg;
            let checkpoint = ledger.checkpoint();
            if !ledger.reserve(leg.flight, leg.day, quantity, self.capacity_of(leg.flight)) {
                continue;
            }

            let rest = self.search(
                ledger,
                rng,
                leg.destination,
                destination,
                quantity,
                leg.arrival_utc + self.config.min_connection_minutes,
                deadline_utc,
                visited,
                hops_used + 1,
            );

            match rest {
                Some(mut rest_legs) => {
                    let mut legs = Vec::with_capacity(1 + rest_legs.len());
                    legs.push(leg);
                    legs.append(&mut rest_legs);
                    return Some(legs);
                }
                None => ledger.rollback_to(checkpoint),
            }
        }

        None
    }

    /// Best schedulable direct flight from `current` to `destination`:
    /// earliest arrival among flights with remaining capacity that depart at
    /// or after `earliest_utc` and land within the deadline. Does not
    /// reserve.
    fn best_direct_leg(
        &self,
        ledger: &CapacityLedger,
        current: AirportCode,
        destination: AirportCode,
        quantity: u32,
        earliest_utc: u32,
        deadline_utc: u32,
    ) -> Option<RouteLeg> {
        let mut best: Option<RouteLeg> = None;
        for &flight_id in self.index.departures(current) {
            if self.index.flight(flight_id).destination != destination {
                continue;
            }
            if let Some(leg) =
                self.schedule_leg(ledger, flight_id, quantity, earliest_utc, deadline_utc)
            {
                if best.map_or(true, |b| leg.arrival_utc < b.arrival_utc) {
                    best = Some(leg);
                }
            }
        }
        best
    }

    /// Schedules the flight on the earliest day whose UTC departure is at or
    /// after `earliest_utc` and whose instance still has room. Later daily
    /// instances are tried when an earlier one is full; the deadline bounds
    /// the scan. Returns `None` when no instance works.
    fn schedule_leg(
        &self,
        ledger: &CapacityLedger,
        flight_id: FlightId,
        quantity: u32,
        earliest_utc: u32,
        deadline_utc: u32,
    ) -> Option<RouteLeg> {
        let template = self.index.flight(flight_id);
        let origin = self.airports.get(&template.origin)?;
        let destination = self.airports.get(&template.destination)?;

        let departure_minute = origin.local_to_utc(template.departure_local);
        let arrival_minute = destination.local_to_utc(template.arrival_local);
        let duration =
            (arrival_minute as i64 - departure_minute as i64).rem_euclid(MINUTES_PER_DAY as i64)
                as u32;

        // The template repeats daily: start at the first day that departs in
        // time and walk forward past full instances.
        let mut day = earliest_utc / MINUTES_PER_DAY;
        if earliest_utc % MINUTES_PER_DAY > departure_minute {
            day += 1;
        }
        loop {
            let departure_utc = day * MINUTES_PER_DAY + departure_minute;
            let arrival_utc = departure_utc + duration;

            // Deadline pruning at every leg, not only at the end.
            if arrival_utc > deadline_utc {
                return None;
            }
            if ledger.reserved(flight_id, day) + quantity <= template.capacity {
                return Some(RouteLeg {
                    flight: flight_id,
                    origin: template.origin,
                    destination: template.destination,
                    day,
                    departure_utc,
                    arrival_utc,
                });
            }
            day += 1;
        }
    }

    fn capacity_of(&self, flight: FlightId) -> u32 {
        self.index.flight(flight).capacity
    }
}
