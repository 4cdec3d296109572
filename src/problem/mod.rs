//! Problem bindings: the shipment routing domain plugged into the engines.

mod shipment;

pub use shipment::{Assignment, CostModel, PlanOutcome, ShipmentProblem};
