//! Core trait definition for the ACO engine.

/// Defines an ACO optimization problem.
///
/// A candidate solution is constructed step by step: at each step the
/// problem exposes a set of edges (node pairs) the ant may take, the engine
/// picks one by pheromone and heuristic desirability, and the sequence of
/// picks is assembled into a solution with [`build`](AcoProblem::build).
///
/// For shipment routing a step is one order and the options are the hubs it
/// can be assigned to, expressed as (hub, destination) edges.
///
/// # Thread Safety
///
/// `AcoProblem` must be `Send + Sync` because the runner may construct and
/// evaluate ants in parallel using rayon.
pub trait AcoProblem: Send + Sync {
    /// The assembled solution type.
    type Solution: Clone + Send + Sync;

    /// Number of nodes in the pheromone graph.
    fn num_nodes(&self) -> usize;

    /// Number of construction steps per ant.
    fn num_steps(&self) -> usize;

    /// Edges available at the given step, as `(from, to)` node pairs.
    ///
    /// Must be non-empty and identical across calls for the same step; the
    /// ant's choice at this step is an index into this slice.
    fn options(&self, step: usize) -> Vec<(usize, usize)>;

    /// Assembles a solution from one option index per step.
    fn build(&self, choices: &[usize]) -> Self::Solution;

    /// Evaluates a solution. Lower is better.
    fn evaluate(&self, solution: &Self::Solution) -> f64;

    /// Whether the solution satisfies all hard constraints.
    ///
    /// Infeasible ants still count toward iteration statistics but never
    /// deposit pheromone or become the global best.
    fn is_feasible(&self, solution: &Self::Solution) -> bool;

    /// Edges a solution deposits pheromone on.
    ///
    /// The default maps each step's choice back through
    /// [`options`](AcoProblem::options).
    fn deposit_edges(&self, choices: &[usize]) -> Vec<(usize, usize)> {
        choices
            .iter()
            .enumerate()
            .map(|(step, &c)| self.options(step)[c])
            .collect()
    }

    /// Called at the end of each iteration with the best cost so far.
    ///
    /// This is the progress hook a driver or UI layer subscribes to. The
    /// default implementation is a no-op.
    fn on_iteration(&self, _iteration: usize, _best_cost: f64) {}
}
