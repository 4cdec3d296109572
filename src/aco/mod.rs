//! Ant Colony Optimization engine.
//!
//! A generic ACO built on the same minimize-one-cost contract as the GA.
//! Users define their problem by implementing [`AcoProblem`]: a solution is
//! constructed step by step, each step choosing among a set of graph edges
//! weighted by pheromone (`τ^α`) and static heuristic desirability (`η^β`).
//!
//! # Key Types
//!
//! - [`AcoProblem`]: Problem definition — steps, options, assembly, evaluation
//! - [`PheromoneMatrix`]: Bounded trail levels with evaporation and deposit
//! - [`HeuristicMatrix`]: Static edge desirability
//! - [`AcoConfig`]: Algorithm parameters (ants, rates, exponents, bounds)
//! - [`AcoRunner`]: Executes the colony loop
//! - [`AcoResult`]: Final optimization result with per-iteration statistics
//!
//! # References
//!
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*
//! - Stützle & Hoos (2000), *MAX-MIN Ant System*

mod config;
mod heuristic;
mod pheromone;
mod runner;
mod types;

pub use config::AcoConfig;
pub use heuristic::HeuristicMatrix;
pub use pheromone::PheromoneMatrix;
pub use runner::{AcoResult, AcoRunner, IterationStats};
pub use types::AcoProblem;
