//! Constrained route planning.
//!
//! The planner answers one question for the optimizers: given a hub, a
//! destination, a quantity, and an earliest departure, is there a feasible
//! itinerary — and at what shape and cost in capacity?
//!
//! # Key Types
//!
//! - [`FlightIndex`]: flight templates bucketed by origin airport
//! - [`CapacityLedger`]: per-(flight, day) reservations with
//!   checkpoint/rollback
//! - [`RoutePlanner`]: depth-bounded backtracking search
//! - [`Route`] / [`RouteLeg`] / [`RouteKind`]: the result itinerary
//! - [`PlannerConfig`]: hop bound, candidate cap, connection time, direct
//!   bias

mod config;
mod index;
mod ledger;
mod route;
mod search;

pub use config::PlannerConfig;
pub use index::FlightIndex;
pub use ledger::{CapacityLedger, Checkpoint};
pub use route::{Route, RouteKind, RouteLeg};
pub use search::RoutePlanner;
