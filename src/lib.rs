//! Hub-and-spoke shipment routing optimizer.
//!
//! Routes customer orders from regional hubs through a network of
//! daily-repeating flights, then optimizes which hub serves each order
//! with two competing metaheuristics:
//!
//! - **Route planner**: Depth-bounded backtracking search over the flight
//!   graph under per-flight capacity, minimum connection time, a hop bound,
//!   cycle avoidance, and continent-driven delivery deadlines, with
//!   checkpoint/rollback capacity accounting.
//! - **Genetic Algorithm (GA)**: Population-based evolutionary optimization
//!   with pluggable selection, crossover, and mutation operators.
//! - **Ant Colony Optimization (ACO)**: Colony construction over a
//!   hub-assignment graph with bounded pheromone trails.
//!
//! Both engines are generic over their problem traits and minimize one
//! shared fitness, so their results compare directly.
//!
//! # Architecture
//!
//! - [`model`]: Airports, flight templates, orders — immutable after load
//! - [`planner`]: The route search and its capacity ledger
//! - [`ga`] / [`aco`]: Generic engines, domain-free
//! - [`problem`]: [`problem::ShipmentProblem`] binds the domain to both
//!   engines

pub mod aco;
pub mod ga;
pub mod model;
pub mod planner;
pub mod problem;
