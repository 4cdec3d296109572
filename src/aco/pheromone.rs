//! Pheromone trail storage.

/// Dense pheromone matrix over a fixed set of nodes.
///
/// Stores one trail level per directed edge `(i, j)`. Levels are clamped to
/// a `[min, max]` band on every update: the floor keeps abandoned edges
/// selectable, the ceiling prevents a single early solution from dominating
/// the colony.
#[derive(Debug, Clone)]
pub struct PheromoneMatrix {
    n: usize,
    cells: Vec<f64>,
    initial: f64,
    min: f64,
    max: f64,
}

impl PheromoneMatrix {
    /// Creates an `n × n` matrix with all trails at `initial`.
    ///
    /// # Panics
    /// Panics in debug builds unless `min <= initial <= max` and `min > 0`.
    pub fn new(n: usize, initial: f64, min: f64, max: f64) -> Self {
        debug_assert!(min > 0.0, "pheromone floor must be positive");
        debug_assert!(min <= initial && initial <= max);
        Self {
            n,
            cells: vec![initial; n * n],
            initial,
            min,
            max,
        }
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// Trail level on edge `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.n + j]
    }

    /// Evaporates every trail by factor `(1 - rho)`, clamped to the floor.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        for cell in &mut self.cells {
            *cell = (*cell * keep).max(self.min);
        }
    }

    /// Adds `amount` to edge `(i, j)`, clamped to the ceiling.
    pub fn deposit(&mut self, i: usize, j: usize, amount: f64) {
        let cell = &mut self.cells[i * self.n + j];
        *cell = (*cell + amount).min(self.max);
    }

    /// Standard deposit amount for a solution of the given cost: `q / cost`.
    ///
    /// Returns 0 for non-positive or non-finite costs so a degenerate
    /// solution never floods the matrix.
    pub fn reward(cost: f64, q: f64) -> f64 {
        if cost > 0.0 && cost.is_finite() {
            q / cost
        } else {
            0.0
        }
    }

    /// Resets every trail to the initial level.
    pub fn reset(&mut self) {
        self.cells.fill(self.initial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_levels() {
        let m = PheromoneMatrix::new(3, 0.1, 0.01, 10.0);
        for i in 0..3 {
            for j in 0..3 {
                assert!((m.get(i, j) - 0.1).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_evaporation_decays_and_floors() {
        let mut m = PheromoneMatrix::new(2, 0.1, 0.01, 10.0);
        m.evaporate(0.1);
        assert!((m.get(0, 0) - 0.09).abs() < 1e-12);

        // Repeated evaporation never drops below the floor.
        for _ in 0..200 {
            m.evaporate(0.5);
        }
        assert!((m.get(0, 0) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_deposit_accumulates_and_caps() {
        let mut m = PheromoneMatrix::new(2, 0.1, 0.01, 10.0);
        m.deposit(0, 1, 0.5);
        assert!((m.get(0, 1) - 0.6).abs() < 1e-12);
        assert!((m.get(1, 0) - 0.1).abs() < 1e-12, "directed edges");

        m.deposit(0, 1, 100.0);
        assert!((m.get(0, 1) - 10.0).abs() < 1e-12, "ceiling applies");
    }

    #[test]
    fn test_reward() {
        assert!((PheromoneMatrix::reward(50.0, 100.0) - 2.0).abs() < 1e-12);
        assert_eq!(PheromoneMatrix::reward(0.0, 100.0), 0.0);
        assert_eq!(PheromoneMatrix::reward(f64::INFINITY, 100.0), 0.0);
    }

    #[test]
    fn test_single_evaporation_from_uniform_one() {
        // Uniform trails at 1.0 with rho = 0.1 leave 0.9 everywhere after
        // one evaporation step.
        let mut m = PheromoneMatrix::new(4, 1.0, 0.01, 10.0);
        m.evaporate(0.1);
        for i in 0..4 {
            for j in 0..4 {
                assert!((m.get(i, j) - 0.9).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_reset() {
        let mut m = PheromoneMatrix::new(2, 0.1, 0.01, 10.0);
        m.deposit(0, 1, 5.0);
        m.evaporate(0.5);
        m.reset();
        for i in 0..2 {
            for j in 0..2 {
                assert!((m.get(i, j) - 0.1).abs() < 1e-12);
            }
        }
    }
}
