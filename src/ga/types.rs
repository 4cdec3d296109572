//! Core trait definitions for the GA engine.
//!
//! The two central traits — [`Individual`] and [`GaProblem`] — define the
//! contract between the generic evolutionary loop and the problem-specific
//! encoding (for shipment routing, a hub assignment per order).

use rand::Rng;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// Lower fitness is considered better (minimization): fitness here is a
/// shipping cost plus constraint penalties.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    ///
    /// Used for initial/unevaluated individuals.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn worst() -> Self {
        f32::INFINITY
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A candidate solution in the GA population.
///
/// Individuals carry a memoized fitness. The engine computes it via
/// [`GaProblem::evaluate`] and stores it with
/// [`set_fitness`](Individual::set_fitness); any operator that changes
/// genes must reset the memo to [`Fitness::worst`] so a stale value is
/// never reused.
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the memoized fitness of this individual.
    fn fitness(&self) -> Self::Fitness;

    /// Stores the fitness after evaluation.
    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Defines a GA optimization problem.
///
/// Implementations specify how to create, evaluate, recombine, and perturb
/// individuals; the engine owns selection, elitism, and the generational
/// loop.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// individuals in parallel using rayon.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    ///
    /// Called during population initialization. The result must be valid
    /// but need not be good.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and returns its fitness.
    ///
    /// Typically the most expensive operation — for shipment routing this
    /// plans a route per order. Lower values are better.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Produces one or two offspring by recombining two parents.
    ///
    /// Children must come back unevaluated. The default implementation
    /// clones `parent1` (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![parent1.clone()]
    }

    /// Mutates an individual in place, invalidating its fitness memo.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Called at the end of each generation with the best fitness so far.
    ///
    /// This is the progress hook a driver or UI layer subscribes to. The
    /// default implementation is a no-op.
    fn on_generation(
        &self,
        _generation: usize,
        _best_fitness: <Self::Individual as Individual>::Fitness,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_fitness_contract() {
        assert_eq!(<f64 as Fitness>::worst(), f64::INFINITY);
        assert_eq!(3.5f64.to_f64(), 3.5);
        assert!(1.0f64 < <f64 as Fitness>::worst());
    }

    #[test]
    fn test_f32_fitness_contract() {
        assert_eq!(<f32 as Fitness>::worst(), f32::INFINITY);
        assert!((2.0f32.to_f64() - 2.0).abs() < 1e-12);
    }
}
