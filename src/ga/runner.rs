//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.

use super::config::GaConfig;
use super::types::{Fitness, GaProblem, Individual};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Per-generation population statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Best (lowest) fitness in the population.
    pub best: f64,
    /// Worst (highest) fitness in the population.
    pub worst: f64,
    /// Mean fitness across the population.
    pub average: f64,
}

impl GenerationStats {
    fn from_population<I: Individual>(population: &[I]) -> Self {
        let mut best = f64::INFINITY;
        let mut worst = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for ind in population {
            let f = ind.fitness().to_f64();
            best = best.min(f);
            worst = worst.max(f);
            sum += f;
        }
        Self {
            best,
            worst,
            average: sum / population.len() as f64,
        }
    }
}

/// Result of a GA optimization run.
///
/// Contains the best solution found, along with statistics about the
/// evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Generation at which the best individual was first seen (0 = initial
    /// population).
    pub generation_found: usize,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Population statistics at the end of each generation, including the
    /// initial population.
    pub history: Vec<GenerationStats>,

    /// Total wall-clock time of the run in milliseconds.
    pub wall_clock_ms: u64,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = ShipmentProblem::new(network, orders);
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config);
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`]
    /// first to get a descriptive error).
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> GaResult<P::Individual> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA will
    /// stop at the end of the current generation and return the best
    /// solution found so far.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> GaResult<P::Individual> {
        if let Err(msg) = config.validate() {
            panic!("invalid GaConfig: {msg}");
        }

        let start = Instant::now();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        // 1. Initialize population
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        // 2. Evaluate initial population
        evaluate_population(problem, &mut population, config.parallel);

        // 3. Track best
        let mut best = find_best(&population).clone();
        let mut generation_found = 0usize;
        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(GenerationStats::from_population(&population));

        let mut stagnation_counter = 0usize;
        let mut cancelled = false;
        let mut stagnated = false;
        let mut generations = 0usize;

        // 4. Evolutionary loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Sort population by fitness (ascending = best first)
            population.sort_by(|a, b| {
                a.fitness()
                    .partial_cmp(&b.fitness())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            // Elite preservation
            let elite_count = (config.population_size as f64 * config.elite_ratio) as usize;
            let mut next_gen: Vec<P::Individual> = population[..elite_count].to_vec();

            // Generate offspring
            while next_gen.len() < config.population_size {
                let p1_idx = config.selection.select(&population, &mut rng);
                let p2_idx = config.selection.select(&population, &mut rng);

                let children = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    problem.crossover(&population[p1_idx], &population[p2_idx], &mut rng)
                } else {
                    vec![population[p1_idx].clone()]
                };

                for mut child in children {
                    if next_gen.len() >= config.population_size {
                        break;
                    }

                    if rng.random_range(0.0..1.0) < config.mutation_rate {
                        problem.mutate(&mut child, &mut rng);
                    }

                    next_gen.push(child);
                }
            }

            // Evaluate new individuals (skip elites, they're already evaluated)
            evaluate_slice(problem, &mut next_gen[elite_count..], config.parallel);

            population = next_gen;
            generations = gen + 1;

            // Update best
            let gen_best = find_best(&population);
            if gen_best.fitness() < best.fitness() {
                best = gen_best.clone();
                generation_found = gen + 1;
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            history.push(GenerationStats::from_population(&population));

            // Callback
            problem.on_generation(gen + 1, best.fitness());

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        GaResult {
            best_fitness: best.fitness(),
            best,
            generation_found,
            generations,
            stagnated,
            cancelled,
            history,
            wall_clock_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Evaluate all individuals in the population.
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    evaluate_slice(problem, population, parallel);
}

fn evaluate_slice<P: GaProblem>(problem: &P, slice: &mut [P::Individual], parallel: bool) {
    if parallel {
        slice.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        for ind in slice.iter_mut() {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        }
    }
}

/// Find the individual with the best (lowest) fitness.
fn find_best<I: Individual>(population: &[I]) -> &I {
    population
        .iter()
        .min_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{operators, GaConfig, Selection};

    // ---- OneMax problem: maximize sum of bits (minimize negative sum) ----

    #[derive(Clone, Debug)]
    struct BitString {
        bits: Vec<bool>,
        fitness: f64,
    }

    impl Individual for BitString {
        type Fitness = f64;
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: f64) {
            self.fitness = f;
        }
    }

    struct OneMaxProblem {
        n: usize,
    }

    impl GaProblem for OneMaxProblem {
        type Individual = BitString;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> BitString {
            let bits: Vec<bool> = (0..self.n).map(|_| rng.random_bool(0.5)).collect();
            BitString {
                bits,
                fitness: f64::INFINITY,
            }
        }

        fn evaluate(&self, ind: &BitString) -> f64 {
            // Minimize negative count of true bits
            -(ind.bits.iter().filter(|&&b| b).count() as f64)
        }

        fn crossover<R: Rng>(&self, p1: &BitString, p2: &BitString, rng: &mut R) -> Vec<BitString> {
            let (c1, c2) = operators::one_point(&p1.bits, &p2.bits, rng);
            vec![
                BitString {
                    bits: c1,
                    fitness: f64::INFINITY,
                },
                BitString {
                    bits: c2,
                    fitness: f64::INFINITY,
                },
            ]
        }

        fn mutate<R: Rng>(&self, ind: &mut BitString, rng: &mut R) {
            let idx = rng.random_range(0..self.n);
            ind.bits[idx] = !ind.bits[idx];
            ind.fitness = f64::INFINITY;
        }
    }

    #[test]
    fn test_onemax_convergence() {
        let problem = OneMaxProblem { n: 20 };
        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(200)
            .with_mutation_rate(0.3)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config);

        assert!(
            result.best_fitness <= -15.0,
            "expected fitness <= -15.0 for 20-bit OneMax, got {}",
            result.best_fitness
        );
    }

    #[test]
    fn test_stagnation_termination() {
        let problem = OneMaxProblem { n: 5 };
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(1000)
            .with_stagnation_limit(10)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config);

        assert!(
            result.stagnated,
            "a 5-bit OneMax should stagnate well before 1000 generations"
        );
        assert!(result.generations < 1000);
    }

    #[test]
    fn test_cancellation() {
        let problem = OneMaxProblem { n: 20 };
        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(1_000_000)
            .with_stagnation_limit(0) // disable stagnation
            .with_seed(42)
            .with_parallel(false);

        let cancel = Arc::new(AtomicBool::new(false));

        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let result = GaRunner::run_with_cancel(&problem, &config, Some(cancel));

        assert!(result.cancelled, "expected cancelled result");
        assert!(result.generations < 1_000_000, "should have stopped early");
    }

    #[test]
    fn test_elite_preservation() {
        let problem = OneMaxProblem { n: 10 };
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(50)
            .with_elite_ratio(0.2)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config);

        // Best fitness should never get worse across generations.
        for window in result.history.windows(2) {
            assert!(
                window[1].best <= window[0].best,
                "best fitness should be monotonically non-increasing with elitism: {} > {}",
                window[1].best,
                window[0].best
            );
        }
    }

    #[test]
    fn test_history_and_stats() {
        let problem = OneMaxProblem { n: 10 };
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(30)
            .with_stagnation_limit(0)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config);

        // History has max_generations + 1 entries (initial + each gen).
        assert_eq!(result.history.len(), 31);
        for stats in &result.history {
            assert!(stats.best <= stats.average);
            assert!(stats.average <= stats.worst);
        }
        assert!(result.generation_found <= result.generations);
    }

    #[test]
    fn test_all_selection_strategies() {
        let problem = OneMaxProblem { n: 10 };

        for selection in [
            Selection::Tournament(3),
            Selection::Roulette,
            Selection::Elitist(10),
        ] {
            let config = GaConfig::default()
                .with_population_size(30)
                .with_max_generations(50)
                .with_selection(selection)
                .with_seed(42)
                .with_parallel(false);

            let result = GaRunner::run(&problem, &config);

            assert!(
                result.best_fitness < 0.0,
                "selection {:?} should find some true bits, got fitness {}",
                selection,
                result.best_fitness
            );
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let problem = OneMaxProblem { n: 15 };
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_seed(7)
            .with_parallel(false);

        let a = GaRunner::run(&problem, &config);
        let b = GaRunner::run(&problem, &config);

        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.generations, b.generations);
        assert_eq!(
            a.history.iter().map(|s| s.best).collect::<Vec<_>>(),
            b.history.iter().map(|s| s.best).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_parallel_gives_same_quality() {
        let problem = OneMaxProblem { n: 20 };

        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(100)
            .with_seed(42)
            .with_parallel(true);

        let result = GaRunner::run(&problem, &config);

        assert!(
            result.best_fitness <= -10.0,
            "parallel should find reasonable solution, got {}",
            result.best_fitness
        );
    }

    // ---- Continuous optimization: sphere function ----

    #[derive(Clone, Debug)]
    struct RealVector {
        genes: Vec<f64>,
        fitness: f64,
    }

    impl Individual for RealVector {
        type Fitness = f64;
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: f64) {
            self.fitness = f;
        }
    }

    struct SphereProblem {
        dim: usize,
    }

    impl GaProblem for SphereProblem {
        type Individual = RealVector;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> RealVector {
            let genes: Vec<f64> = (0..self.dim).map(|_| rng.random_range(-5.0..5.0)).collect();
            RealVector {
                genes,
                fitness: f64::INFINITY,
            }
        }

        fn evaluate(&self, ind: &RealVector) -> f64 {
            // f(x) = sum(x_i^2), minimum at origin
            ind.genes.iter().map(|x| x * x).sum()
        }

        fn crossover<R: Rng>(
            &self,
            p1: &RealVector,
            p2: &RealVector,
            rng: &mut R,
        ) -> Vec<RealVector> {
            let genes = operators::blx_alpha(&p1.genes, &p2.genes, 0.5, rng);
            vec![RealVector {
                genes,
                fitness: f64::INFINITY,
            }]
        }

        fn mutate<R: Rng>(&self, ind: &mut RealVector, rng: &mut R) {
            operators::perturb(&mut ind.genes, 0.5, rng);
            ind.fitness = f64::INFINITY;
        }
    }

    #[test]
    fn test_sphere_optimization() {
        let problem = SphereProblem { dim: 5 };
        let config = GaConfig::default()
            .with_population_size(100)
            .with_max_generations(300)
            .with_mutation_rate(0.3)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config);

        assert!(
            result.best_fitness < 1.0,
            "expected fitness < 1.0 for 5D sphere, got {}",
            result.best_fitness
        );
    }

    // ---- Default crossover/mutate (no-op) ----

    struct NoOpProblem;

    impl GaProblem for NoOpProblem {
        type Individual = RealVector;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> RealVector {
            let genes = vec![rng.random_range(-10.0..10.0)];
            RealVector {
                genes,
                fitness: f64::INFINITY,
            }
        }

        fn evaluate(&self, ind: &RealVector) -> f64 {
            ind.genes[0].abs()
        }
        // Uses default crossover (clone) and mutate (no-op)
    }

    #[test]
    fn test_default_operators() {
        let problem = NoOpProblem;
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(10)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config);

        assert!(result.generations > 0);
        assert!(!result.history.is_empty());
    }
}
