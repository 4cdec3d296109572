//! Flight index: templates bucketed by origin airport.

use crate::model::{AirportCode, FlightId, FlightTemplate};
use std::collections::HashMap;

/// Read-only index over the flight templates, bucketed by origin airport.
///
/// Built once from the loaded flight list; every route-planning call reads
/// from it and never mutates it, so it can be shared freely across parallel
/// evaluations.
#[derive(Debug, Clone)]
pub struct FlightIndex {
    flights: Vec<FlightTemplate>,
    by_origin: HashMap<AirportCode, Vec<FlightId>>,
}

impl FlightIndex {
    pub fn new(flights: Vec<FlightTemplate>) -> FlightIndex {
        let mut by_origin: HashMap<AirportCode, Vec<FlightId>> = HashMap::new();
        for (i, flight) in flights.iter().enumerate() {
            by_origin.entry(flight.origin).or_default().push(FlightId(i));
        }
        FlightIndex { flights, by_origin }
    }

    /// Flights departing from `origin`, in load order. Empty when the
    /// airport has no outbound flights.
    pub fn departures(&self, origin: AirportCode) -> &[FlightId] {
        self.by_origin.get(&origin).map_or(&[], Vec::as_slice)
    }

    pub fn flight(&self, id: FlightId) -> &FlightTemplate {
        &self.flights[id.0]
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}
