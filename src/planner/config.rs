//! Route planner configuration.

/// Parameters that bound the route search.
///
/// The hop and candidate limits are structural bounds: exceeding them makes
/// a branch infeasible, they are never detected reactively.
///
/// # Builder
///
/// ```
/// use airlift::planner::PlannerConfig;
///
/// let config = PlannerConfig::default()
///     .with_max_hops(3)
///     .with_direct_bias(1.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum number of flight legs in a route.
    pub max_hops: usize,

    /// Maximum candidate first legs explored per search level. Bounds the
    /// branching factor.
    pub max_candidates: usize,

    /// Minimum connection time between an arrival and the next departure,
    /// in minutes.
    pub min_connection_minutes: u32,

    /// Time between order creation and earliest possible departure, in
    /// minutes (warehouse pickup and handling).
    pub pickup_window_minutes: u32,

    /// Probability of taking a feasible direct flight immediately instead
    /// of exploring connecting itineraries first (0.0–1.0).
    ///
    /// Values below 1.0 diversify the routes fed to the optimizers; the
    /// direct flight is still used as a fallback when exploration fails.
    pub direct_bias: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_hops: 4,
            max_candidates: 5,
            min_connection_minutes: 30,
            pickup_window_minutes: 30,
            direct_bias: 0.8,
        }
    }
}

impl PlannerConfig {
    /// Sets the maximum number of legs per route.
    pub fn with_max_hops(mut self, n: usize) -> Self {
        self.max_hops = n;
        self
    }

    /// Sets the per-level candidate cap.
    pub fn with_max_candidates(mut self, n: usize) -> Self {
        self.max_candidates = n;
        self
    }

    /// Sets the minimum connection time in minutes.
    pub fn with_min_connection_minutes(mut self, minutes: u32) -> Self {
        self.min_connection_minutes = minutes;
        self
    }

    /// Sets the pickup window in minutes.
    pub fn with_pickup_window_minutes(mut self, minutes: u32) -> Self {
        self.pickup_window_minutes = minutes;
        self
    }

    /// Sets the direct-flight bias, clamped to [0, 1].
    pub fn with_direct_bias(mut self, bias: f64) -> Self {
        self.direct_bias = bias.clamp(0.0, 1.0);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_hops == 0 {
            return Err("max_hops must be at least 1".into());
        }
        if self.max_candidates == 0 {
            return Err("max_candidates must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.direct_bias) {
            return Err("direct_bias must be within [0, 1]".into());
        }
        Ok(())
    }
}
