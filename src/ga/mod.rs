//! Genetic Algorithm engine.
//!
//! A generic GA built on trait-based abstractions. Users define their
//! problem by implementing [`GaProblem`], which specifies how to create,
//! evaluate, crossover, and mutate individuals; the engine owns selection,
//! elitism, and the generational loop.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with associated fitness type
//! - [`GaProblem`]: Problem definition — initialization, evaluation, operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, rates)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # Submodules
//!
//! - [`operators`]: Generic crossover and mutation operators over gene slices
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::Selection;
pub use types::{Fitness, GaProblem, Individual};
