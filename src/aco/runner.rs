//! ACO colony loop execution.
//!
//! [`AcoRunner`] orchestrates the colony: construct ants → evaluate →
//! update global best → evaporate → deposit → repeat.

use super::config::AcoConfig;
use super::heuristic::HeuristicMatrix;
use super::pheromone::PheromoneMatrix;
use super::types::AcoProblem;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Per-iteration colony statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStats {
    /// Best (lowest) cost among the colony.
    pub best: f64,
    /// Worst (highest) cost among the colony.
    pub worst: f64,
    /// Mean cost across the colony.
    pub average: f64,
    /// Number of ants that produced a feasible solution.
    pub feasible_ants: usize,
}

/// Result of an ACO optimization run.
#[derive(Debug, Clone)]
pub struct AcoResult<S> {
    /// The best feasible solution found, if any ant produced one.
    pub best: Option<S>,

    /// Cost of the best solution; `f64::INFINITY` when `best` is `None`.
    pub best_fitness: f64,

    /// Iteration at which the best solution was first seen (1-based).
    pub iteration_found: usize,

    /// Total number of iterations executed.
    pub iterations: usize,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Colony statistics for each iteration.
    pub iteration_stats: Vec<IterationStats>,

    /// Total wall-clock time of the run in milliseconds.
    pub wall_clock_ms: u64,
}

/// One constructed ant: its choices and their evaluation.
struct Ant {
    choices: Vec<usize>,
    cost: f64,
    feasible: bool,
}

/// Executes the ACO colony loop.
///
/// # Usage
///
/// ```ignore
/// let problem = ShipmentProblem::new(network, orders);
/// let heuristic = problem.proximity_heuristic();
/// let config = AcoConfig::default().with_seed(42);
/// let result = AcoRunner::run(&problem, &heuristic, &config);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the ACO optimization.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`AcoConfig::validate`]
    /// first to get a descriptive error) or if the heuristic matrix size
    /// does not match [`AcoProblem::num_nodes`].
    pub fn run<P: AcoProblem>(
        problem: &P,
        heuristic: &HeuristicMatrix,
        config: &AcoConfig,
    ) -> AcoResult<P::Solution> {
        Self::run_with_cancel(problem, heuristic, config, None)
    }

    /// Runs the ACO with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the colony
    /// stops at the end of the current iteration and returns the best
    /// solution found so far.
    pub fn run_with_cancel<P: AcoProblem>(
        problem: &P,
        heuristic: &HeuristicMatrix,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> AcoResult<P::Solution> {
        if let Err(msg) = config.validate() {
            panic!("invalid AcoConfig: {msg}");
        }
        assert_eq!(
            heuristic.num_nodes(),
            problem.num_nodes(),
            "heuristic matrix size must match the problem graph"
        );

        let start = Instant::now();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut pheromone = PheromoneMatrix::new(
            problem.num_nodes(),
            config.pheromone_initial,
            config.pheromone_min,
            config.pheromone_max,
        );

        let mut best_choices: Option<Vec<usize>> = None;
        let mut best_cost = f64::INFINITY;
        let mut iteration_found = 0usize;
        let mut iteration_stats = Vec::with_capacity(config.max_iterations);

        let mut stagnation_counter = 0usize;
        let mut cancelled = false;
        let mut stagnated = false;
        let mut iterations = 0usize;

        for iter in 0..config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Construct and evaluate the colony. Each ant gets its own
            // seeded RNG so parallel construction stays reproducible.
            let ant_seeds: Vec<u64> = (0..config.num_ants).map(|_| rng.random()).collect();
            let ants: Vec<Ant> = if config.parallel {
                ant_seeds
                    .par_iter()
                    .map(|&seed| construct_ant(problem, heuristic, &pheromone, config, seed))
                    .collect()
            } else {
                ant_seeds
                    .iter()
                    .map(|&seed| construct_ant(problem, heuristic, &pheromone, config, seed))
                    .collect()
            };

            iterations = iter + 1;
            iteration_stats.push(colony_stats(&ants));

            // Iteration best among feasible ants.
            let iter_best = ants
                .iter()
                .filter(|a| a.feasible)
                .min_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(std::cmp::Ordering::Equal));

            // Global best on strict improvement.
            if let Some(ant) = iter_best {
                if ant.cost < best_cost {
                    best_cost = ant.cost;
                    best_choices = Some(ant.choices.clone());
                    iteration_found = iter + 1;
                    stagnation_counter = 0;
                } else {
                    stagnation_counter += 1;
                }
            } else {
                stagnation_counter += 1;
            }

            // Trail update: evaporate, then reinforce the global best and
            // (at reduced strength) the iteration best.
            pheromone.evaporate(config.evaporation_rate);
            if let Some(ref choices) = best_choices {
                let amount = PheromoneMatrix::reward(best_cost, config.q);
                for (i, j) in problem.deposit_edges(choices) {
                    pheromone.deposit(i, j, amount);
                }
            }
            if let Some(ant) = iter_best {
                if ant.cost > best_cost {
                    let amount = 0.5 * PheromoneMatrix::reward(ant.cost, config.q);
                    for (i, j) in problem.deposit_edges(&ant.choices) {
                        pheromone.deposit(i, j, amount);
                    }
                }
            }

            // Callback
            problem.on_iteration(iter + 1, best_cost);

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        AcoResult {
            best: best_choices.map(|c| problem.build(&c)),
            best_fitness: best_cost,
            iteration_found,
            iterations,
            stagnated,
            cancelled,
            iteration_stats,
            wall_clock_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Constructs one ant: roulette-wheel pick per step over `τ^α · η^β`.
fn construct_ant<P: AcoProblem>(
    problem: &P,
    heuristic: &HeuristicMatrix,
    pheromone: &PheromoneMatrix,
    config: &AcoConfig,
    seed: u64,
) -> Ant {
    let mut rng = StdRng::seed_from_u64(seed);
    let steps = problem.num_steps();
    let mut choices = Vec::with_capacity(steps);

    for step in 0..steps {
        let options = problem.options(step);
        debug_assert!(!options.is_empty(), "every step must offer an option");

        let weights: Vec<f64> = options
            .iter()
            .map(|&(i, j)| {
                pheromone.get(i, j).powf(config.alpha) * heuristic.get(i, j).powf(config.beta)
            })
            .collect();

        let total: f64 = weights.iter().sum();
        let pick = if total > 0.0 && total.is_finite() {
            roulette(&weights, total, &mut rng)
        } else {
            // All options equally (un)attractive: fall back to uniform.
            rng.random_range(0..options.len())
        };
        choices.push(pick);
    }

    let solution = problem.build(&choices);
    let cost = problem.evaluate(&solution);
    let feasible = problem.is_feasible(&solution);
    Ant {
        choices,
        cost,
        feasible,
    }
}

fn roulette<R: Rng>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    weights.len() - 1 // floating-point fallback
}

fn colony_stats(ants: &[Ant]) -> IterationStats {
    let mut best = f64::INFINITY;
    let mut worst = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut feasible_ants = 0;
    for ant in ants {
        best = best.min(ant.cost);
        worst = worst.max(ant.cost);
        sum += ant.cost;
        if ant.feasible {
            feasible_ants += 1;
        }
    }
    IterationStats {
        best,
        worst,
        average: sum / ants.len() as f64,
        feasible_ants,
    }
}

// ============================================================================
// Tests
// ============================================================================
