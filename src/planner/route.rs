//! Planned routes: leg sequences on an absolute UTC timeline.

use crate::model::{AirportCode, FlightId, MINUTES_PER_DAY};

/// Shape of a route by stopover count. Fewer stops score better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteKind {
    Direct,
    OneStop,
    TwoStop,
    MultiStop,
}

/// One flight leg scheduled on a concrete calendar day.
///
/// Times are absolute UTC minutes from the planning-horizon origin, so legs
/// across time zones and midnight compare directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteLeg {
    pub flight: FlightId,
    pub origin: AirportCode,
    pub destination: AirportCode,
    /// Calendar day of departure; keys the capacity ledger together with
    /// the flight id.
    pub day: u32,
    pub departure_utc: u32,
    pub arrival_utc: u32,
}

/// A feasible multi-leg itinerary from a hub to an order's destination.
///
/// Lives for one fitness evaluation: constructed by the planner, scored,
/// then kept as part of a candidate solution or discarded with its ledger
/// reservations rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    legs: Vec<RouteLeg>,
}

impl Route {
    pub(crate) fn new(legs: Vec<RouteLeg>) -> Route {
        debug_assert!(!legs.is_empty(), "a route has at least one leg");
        Route { legs }
    }

    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    pub fn kind(&self) -> RouteKind {
        match self.legs.len() {
            1 => RouteKind::Direct,
            2 => RouteKind::OneStop,
            3 => RouteKind::TwoStop,
            _ => RouteKind::MultiStop,
        }
    }

    pub fn origin(&self) -> AirportCode {
        self.legs[0].origin
    }

    pub fn destination(&self) -> AirportCode {
        self.legs[self.legs.len() - 1].destination
    }

    /// Intermediate stopover airports, in visit order.
    pub fn stopovers(&self) -> impl Iterator<Item = AirportCode> + '_ {
        self.legs[..self.legs.len() - 1].iter().map(|l| l.destination)
    }

    /// Absolute UTC arrival at the final destination.
    pub fn arrival_utc(&self) -> u32 {
        self.legs[self.legs.len() - 1].arrival_utc
    }

    /// Elapsed minutes from the first departure to the final arrival,
    /// connection waits included.
    pub fn elapsed_minutes(&self) -> u32 {
        self.arrival_utc() - self.legs[0].departure_utc
    }

    /// Days between the first departure and the final arrival, rounded up.
    pub fn elapsed_days(&self) -> u32 {
        self.elapsed_minutes().div_ceil(MINUTES_PER_DAY)
    }
}
