//! Hub assignment for shipment orders, as a GA and ACO problem.
//!
//! The decision variable is one hub index per order. Evaluating a candidate
//! plans every order's route from its assigned hub on a fresh scratch
//! ledger, then scores the routes with a single cost function shared
//! verbatim by both optimizers.

use crate::aco::{AcoProblem, HeuristicMatrix};
use crate::ga::{GaProblem, Individual};
use crate::model::{Airport, AirportCode, Continent, FlightTemplate, Order};
use crate::planner::{CapacityLedger, FlightIndex, PlannerConfig, Route, RoutePlanner};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Cost parameters for the shared fitness function.
#[derive(Debug, Clone)]
pub struct CostModel {
    /// Cost multiplier for an intercontinental hub→destination pairing;
    /// same-continent pairings cost 1.0.
    pub intercontinental_factor: f64,

    /// Surcharge per leg beyond the first, so direct routes score best.
    pub leg_surcharge: f64,

    /// Flat penalty per order the planner cannot route.
    pub infeasible_penalty: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            intercontinental_factor: 2.5,
            leg_surcharge: 50.0,
            infeasible_penalty: 10_000.0,
        }
    }
}

/// A candidate solution: one hub index per order, plus a memoized fitness.
#[derive(Debug, Clone)]
pub struct Assignment {
    /// `hubs[i]` is the hub index assigned to order `i`.
    pub hubs: Vec<usize>,
    fitness: f64,
}

impl Assignment {
    pub fn new(hubs: Vec<usize>) -> Assignment {
        Assignment {
            hubs,
            fitness: f64::INFINITY,
        }
    }
}

impl Individual for Assignment {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

/// Concrete routing outcome of an assignment, for reporting.
#[derive(Debug)]
pub struct PlanOutcome {
    /// Planned route per order, `None` where no feasible itinerary exists.
    pub routes: Vec<Option<Route>>,

    /// The ledger holding every reservation the routes made.
    pub ledger: CapacityLedger,

    /// Number of orders that could not be routed. Never silently dropped:
    /// each one also carries the infeasibility penalty in the fitness.
    pub infeasible_orders: usize,
}

/// The shipment routing problem over a fixed network and order book.
///
/// Implements both [`GaProblem`] and [`AcoProblem`] so the two engines
/// compete on identical semantics.
///
/// Evaluation is self-contained: each call plans on its own scratch ledger
/// with an RNG derived from the run seed and the genes, so sibling
/// evaluations never contend and the same assignment always scores the
/// same regardless of evaluation order.
pub struct ShipmentProblem {
    airports: HashMap<AirportCode, Airport>,
    index: FlightIndex,
    hubs: Vec<AirportCode>,
    orders: Vec<Order>,
    /// Distinct order destinations, indexed for the pheromone graph.
    destinations: Vec<AirportCode>,
    destination_ids: HashMap<AirportCode, usize>,
    planner_config: PlannerConfig,
    costs: CostModel,
    seed: u64,
}

impl ShipmentProblem {
    /// Builds the problem, validating that hubs and order destinations are
    /// known airports and that there is at least one hub and one order.
    pub fn new(
        airports: Vec<Airport>,
        flights: Vec<FlightTemplate>,
        hubs: Vec<AirportCode>,
        orders: Vec<Order>,
    ) -> Result<ShipmentProblem, String> {
        if hubs.is_empty() {
            return Err("at least one hub is required".into());
        }
        if orders.is_empty() {
            return Err("at least one order is required".into());
        }

        let airports: HashMap<AirportCode, Airport> =
            airports.into_iter().map(|a| (a.code, a)).collect();
        for hub in &hubs {
            if !airports.contains_key(hub) {
                return Err(format!("hub {hub} is not a known airport"));
            }
        }

        let mut destinations = Vec::new();
        let mut destination_ids = HashMap::new();
        for order in &orders {
            if !airports.contains_key(&order.destination) {
                return Err(format!(
                    "order {} destination {} is not a known airport",
                    order.id, order.destination
                ));
            }
            destination_ids.entry(order.destination).or_insert_with(|| {
                destinations.push(order.destination);
                destinations.len() - 1
            });
        }

        Ok(ShipmentProblem {
            airports,
            index: FlightIndex::new(flights),
            hubs,
            orders,
            destinations,
            destination_ids,
            planner_config: PlannerConfig::default(),
            costs: CostModel::default(),
            seed: 0,
        })
    }

    /// Sets the route planner configuration.
    pub fn with_planner_config(mut self, config: PlannerConfig) -> Self {
        self.planner_config = config;
        self
    }

    /// Sets the cost model.
    pub fn with_costs(mut self, costs: CostModel) -> Self {
        self.costs = costs;
        self
    }

    /// Sets the base seed for per-evaluation planner randomness.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn num_orders(&self) -> usize {
        self.orders.len()
    }

    pub fn num_hubs(&self) -> usize {
        self.hubs.len()
    }

    pub fn hubs(&self) -> &[AirportCode] {
        &self.hubs
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Scores an assignment: plans every order and applies the shared cost
    /// function. Lower is better.
    ///
    /// # Panics
    /// Panics if `assignment` does not hold one valid hub index per order.
    pub fn evaluate_assignment(&self, assignment: &[usize]) -> f64 {
        let outcome = self.plan_routes(assignment);
        self.score(assignment, &outcome)
    }

    /// Plans every order's route from its assigned hub on a fresh ledger.
    ///
    /// Orders are planned in index order against the shared scratch ledger,
    /// so earlier orders can exhaust capacity later ones needed; the
    /// fitness penalty makes such assignments lose.
    ///
    /// # Panics
    /// Panics if `assignment` does not hold one valid hub index per order.
    pub fn plan_routes(&self, assignment: &[usize]) -> PlanOutcome {
        assert_eq!(
            assignment.len(),
            self.orders.len(),
            "assignment must cover every order"
        );

        let planner = RoutePlanner::new(
            &self.index,
            &self.airports,
            &self.hubs,
            &self.planner_config,
        );
        let mut ledger = CapacityLedger::new();
        let mut rng = self.evaluation_rng(assignment);

        let mut routes = Vec::with_capacity(self.orders.len());
        let mut infeasible_orders = 0;
        for (order, &hub_idx) in self.orders.iter().zip(assignment) {
            let hub = self.hubs[hub_idx];
            let hub_continent = self.airports[&hub].continent;
            let dest_continent = self.airports[&order.destination].continent;

            let earliest = order.created_minutes + self.planner_config.pickup_window_minutes;
            let deadline = order.deadline_from(hub_continent, dest_continent);

            let route = planner.plan(
                &mut ledger,
                &mut rng,
                hub,
                order.destination,
                order.quantity,
                earliest,
                deadline,
            );
            if route.is_none() {
                infeasible_orders += 1;
            }
            routes.push(route);
        }

        PlanOutcome {
            routes,
            ledger,
            infeasible_orders,
        }
    }

    /// The shared cost function.
    fn score(&self, assignment: &[usize], outcome: &PlanOutcome) -> f64 {
        let mut total = 0.0;

        for ((order, &hub_idx), route) in
            self.orders.iter().zip(assignment).zip(&outcome.routes)
        {
            match route {
                Some(route) => {
                    let hub_continent = self.airports[&self.hubs[hub_idx]].continent;
                    let dest_continent = self.airports[&order.destination].continent;
                    let distance_factor = if hub_continent == dest_continent {
                        1.0
                    } else {
                        self.costs.intercontinental_factor
                    };
                    let base =
                        order.quantity as f64 * distance_factor * order.priority.cost_factor();
                    let extra_legs = (route.legs().len() - 1) as f64;
                    total += base + extra_legs * self.costs.leg_surcharge;
                }
                None => total += self.costs.infeasible_penalty,
            }
        }

        // Hub load balance: squared deviation of per-hub order counts from
        // the mean keeps the fleet from piling onto one warehouse.
        let mut counts = vec![0usize; self.hubs.len()];
        for &hub_idx in assignment {
            counts[hub_idx] += 1;
        }
        let mean = assignment.len() as f64 / self.hubs.len() as f64;
        total += counts
            .iter()
            .map(|&c| {
                let d = c as f64 - mean;
                d * d
            })
            .sum::<f64>();

        total
    }

    /// Heuristic desirability over the pheromone graph: hubs prefer
    /// destinations on their own continent.
    pub fn proximity_heuristic(&self) -> HeuristicMatrix {
        let continents: Vec<Continent> = self
            .hubs
            .iter()
            .chain(&self.destinations)
            .map(|code| self.airports[code].continent)
            .collect();
        HeuristicMatrix::from_fn(self.hubs.len() + self.destinations.len(), |i, j| {
            if i == j {
                0.0
            } else if continents[i] == continents[j] {
                1.0
            } else {
                0.5
            }
        })
    }

    /// Deterministic per-assignment RNG: run seed mixed with a gene hash.
    fn evaluation_rng(&self, assignment: &[usize]) -> StdRng {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        assignment.hash(&mut hasher);
        StdRng::seed_from_u64(hasher.finish())
    }
}

impl GaProblem for ShipmentProblem {
    type Individual = Assignment;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Assignment {
        let hubs = (0..self.orders.len())
            .map(|_| rng.random_range(0..self.hubs.len()))
            .collect();
        Assignment::new(hubs)
    }

    fn evaluate(&self, individual: &Assignment) -> f64 {
        self.evaluate_assignment(&individual.hubs)
    }

    fn crossover<R: Rng>(&self, p1: &Assignment, p2: &Assignment, rng: &mut R) -> Vec<Assignment> {
        let (c1, c2) = crate::ga::operators::uniform(&p1.hubs, &p2.hubs, rng);
        vec![Assignment::new(c1), Assignment::new(c2)]
    }

    fn mutate<R: Rng>(&self, individual: &mut Assignment, rng: &mut R) {
        crate::ga::operators::reassign(&mut individual.hubs, self.hubs.len(), rng);
        individual.fitness = f64::INFINITY;
    }
}

impl AcoProblem for ShipmentProblem {
    type Solution = Assignment;

    fn num_nodes(&self) -> usize {
        self.hubs.len() + self.destinations.len()
    }

    fn num_steps(&self) -> usize {
        self.orders.len()
    }

    fn options(&self, step: usize) -> Vec<(usize, usize)> {
        // One edge per hub: (hub node, destination node of this order).
        let dest_node = self.hubs.len() + self.destination_ids[&self.orders[step].destination];
        (0..self.hubs.len()).map(|h| (h, dest_node)).collect()
    }

    fn build(&self, choices: &[usize]) -> Assignment {
        Assignment::new(choices.to_vec())
    }

    fn evaluate(&self, solution: &Assignment) -> f64 {
        self.evaluate_assignment(&solution.hubs)
    }

    fn is_feasible(&self, solution: &Assignment) -> bool {
        self.plan_routes(&solution.hubs).infeasible_orders == 0
    }
}
