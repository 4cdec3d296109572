//! ACO configuration.
//!
//! [`AcoConfig`] holds all parameters that control the colony loop.

/// Configuration for the Ant Colony Optimization engine.
///
/// # Defaults
///
/// ```
/// use airlift::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.num_ants, 25);
/// assert_eq!(config.max_iterations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use airlift::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_num_ants(50)
///     .with_evaporation_rate(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AcoConfig {
    /// Number of ants constructing solutions per iteration.
    pub num_ants: usize,

    /// Maximum number of iterations before termination.
    pub max_iterations: usize,

    /// Evaporation rate ρ (0.0–1.0). Each iteration trails decay by
    /// `(1 - ρ)` before new deposits.
    pub evaporation_rate: f64,

    /// Pheromone exponent α in the desirability `τ^α · η^β`.
    pub alpha: f64,

    /// Heuristic exponent β in the desirability `τ^α · η^β`.
    pub beta: f64,

    /// Deposit constant Q: a solution of cost `c` deposits `Q / c`.
    pub q: f64,

    /// Initial pheromone level on every edge.
    pub pheromone_initial: f64,

    /// Pheromone floor; trails never evaporate below this.
    pub pheromone_min: f64,

    /// Pheromone ceiling; deposits never push trails above this.
    pub pheromone_max: f64,

    /// Number of iterations with no global-best improvement before
    /// stopping. Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Whether to construct and evaluate ants in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 25,
            max_iterations: 100,
            evaporation_rate: 0.1,
            alpha: 1.0,
            beta: 2.0,
            q: 100.0,
            pheromone_initial: 0.1,
            pheromone_min: 0.01,
            pheromone_max: 10.0,
            stagnation_limit: 50,
            parallel: true,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per iteration.
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the evaporation rate ρ, clamped to [0, 1].
    pub fn with_evaporation_rate(mut self, rho: f64) -> Self {
        self.evaporation_rate = rho.clamp(0.0, 1.0);
        self
    }

    /// Sets the pheromone exponent α.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic exponent β.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the deposit constant Q.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Sets the initial, minimum, and maximum pheromone levels.
    pub fn with_pheromone_bounds(mut self, initial: f64, min: f64, max: f64) -> Self {
        self.pheromone_initial = initial;
        self.pheromone_min = min;
        self.pheromone_max = max;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel ant construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_ants == 0 {
            return Err("num_ants must be at least 1".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err("evaporation_rate must be within [0, 1]".into());
        }
        if self.alpha < 0.0 || self.beta < 0.0 {
            return Err("alpha and beta must be non-negative".into());
        }
        if self.q <= 0.0 {
            return Err("q must be positive".into());
        }
        if self.pheromone_min <= 0.0 {
            return Err("pheromone_min must be positive".into());
        }
        if self.pheromone_min > self.pheromone_initial
            || self.pheromone_initial > self.pheromone_max
        {
            return Err("pheromone bounds must satisfy min <= initial <= max".into());
        }
        Ok(())
    }
}
