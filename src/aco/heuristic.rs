//! Static heuristic desirability.

/// Dense matrix of static edge desirability (the η term).
///
/// Unlike pheromone, heuristic values never change during a run; they
/// encode prior knowledge such as geographic proximity or inverse cost.
#[derive(Debug, Clone)]
pub struct HeuristicMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl HeuristicMatrix {
    /// Builds an `n × n` matrix by evaluating `f(i, j)` for every edge.
    pub fn from_fn<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut cells = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                cells.push(f(i, j));
            }
        }
        Self { n, cells }
    }

    /// Builds the classic inverse-distance heuristic: `1 / distance(i, j)`,
    /// with a zero diagonal and zero for non-positive distances.
    pub fn inverse_distance<F>(n: usize, mut distance: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self::from_fn(n, |i, j| {
            if i == j {
                return 0.0;
            }
            let d = distance(i, j);
            if d > 0.0 {
                1.0 / d
            } else {
                0.0
            }
        })
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// Desirability of edge `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.n + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn() {
        let m = HeuristicMatrix::from_fn(3, |i, j| (i * 10 + j) as f64);
        assert!((m.get(0, 0) - 0.0).abs() < 1e-12);
        assert!((m.get(2, 1) - 21.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_distance() {
        let m = HeuristicMatrix::inverse_distance(3, |i, j| ((i + j) as f64) * 2.0);
        assert_eq!(m.get(1, 1), 0.0, "diagonal is zero");
        assert!((m.get(0, 1) - 0.5).abs() < 1e-12);
        assert!((m.get(1, 2) - (1.0 / 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_distance_nonpositive() {
        let m = HeuristicMatrix::inverse_distance(2, |_, _| 0.0);
        assert_eq!(m.get(0, 1), 0.0);
    }
}
