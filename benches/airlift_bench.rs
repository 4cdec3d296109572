//! Criterion benchmarks for the airlift optimizers.
//!
//! Uses a small synthetic two-continent network so measurements track
//! planner and engine overhead rather than dataset loading.

use airlift::aco::{AcoConfig, AcoRunner};
use airlift::ga::{GaConfig, GaRunner};
use airlift::model::{Airport, AirportCode, FlightTemplate, Order, Priority};
use airlift::planner::CapacityLedger;
use airlift::problem::ShipmentProblem;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ===========================================================================
// Synthetic network: 2 hubs, 6 destinations, dense direct flights plus a
// layer of inter-destination connections.
// ===========================================================================

const HUBS: [&str; 2] = ["SPIM", "EBCI"];
const DESTINATIONS: [&str; 6] = ["SEQM", "SKBO", "SVMI", "LOWW", "EHAM", "UBBB"];

fn network() -> (Vec<Airport>, Vec<FlightTemplate>) {
    let airports: Vec<Airport> = HUBS
        .iter()
        .chain(DESTINATIONS.iter())
        .map(|code| Airport::new(code, code, code, 0, 1_000_000).expect("known prefix"))
        .collect();

    let mut flights = Vec::new();
    for (h, hub) in HUBS.iter().enumerate() {
        for (d, dest) in DESTINATIONS.iter().enumerate() {
            let departure = (120 + 60 * d + 30 * h) as u32;
            flights.push(FlightTemplate::new(hub, dest, departure, departure + 300, 200));
        }
    }
    // Connections between neighboring destinations.
    for pair in DESTINATIONS.windows(2) {
        flights.push(FlightTemplate::new(pair[0], pair[1], 600, 800, 150));
        flights.push(FlightTemplate::new(pair[1], pair[0], 700, 900, 150));
    }
    (airports, flights)
}

fn orders(n: usize) -> Vec<Order> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n)
        .map(|i| Order {
            id: i as u32,
            destination: AirportCode::new(DESTINATIONS[rng.random_range(0..DESTINATIONS.len())]),
            quantity: rng.random_range(1..40),
            created_minutes: rng.random_range(0..1440),
            priority: Priority::from_class(rng.random_range(1..4)).expect("class in 1..=3"),
        })
        .collect()
}

fn problem(num_orders: usize) -> ShipmentProblem {
    let (airports, flights) = network();
    let hubs = HUBS.iter().map(|c| AirportCode::new(c)).collect();
    ShipmentProblem::new(airports, flights, hubs, orders(num_orders))
        .expect("valid problem")
        .with_seed(42)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_plan_routes(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_routes");
    group.sample_size(20);

    for &n in &[10usize, 50, 200] {
        let problem = problem(n);
        let assignment: Vec<usize> = (0..n).map(|i| i % 2).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let outcome = problem.plan_routes(black_box(&assignment));
                black_box(outcome)
            })
        });
    }
    group.finish();
}

fn bench_ledger_rollback(c: &mut Criterion) {
    c.bench_function("ledger_checkpoint_rollback_1k", |b| {
        use airlift::model::FlightId;
        b.iter(|| {
            let mut ledger = CapacityLedger::new();
            let start = ledger.checkpoint();
            for i in 0..1000u32 {
                ledger.reserve(FlightId((i % 40) as usize), i % 7, 1, 1_000_000);
            }
            ledger.rollback_to(start);
            black_box(ledger)
        })
    });
}

fn bench_ga_shipment(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_shipment");
    group.sample_size(10);

    for (n, pop, gens) in [(20usize, 30usize, 20usize), (50, 50, 15)] {
        let problem = problem(n);
        let config = GaConfig::default()
            .with_population_size(pop)
            .with_max_generations(gens)
            .with_stagnation_limit(0)
            .with_seed(42)
            .with_parallel(false);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_g{}", n, pop, gens), n),
            &config,
            |b, cfg| {
                b.iter(|| {
                    let result = GaRunner::run(black_box(&problem), black_box(cfg));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_aco_shipment(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_shipment");
    group.sample_size(10);

    for (n, ants, iters) in [(20usize, 15usize, 20usize), (50, 25, 15)] {
        let problem = problem(n);
        let heuristic = problem.proximity_heuristic();
        let config = AcoConfig::default()
            .with_num_ants(ants)
            .with_max_iterations(iters)
            .with_stagnation_limit(0)
            .with_seed(42)
            .with_parallel(false);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_a{}_i{}", n, ants, iters), n),
            &config,
            |b, cfg| {
                b.iter(|| {
                    let result =
                        AcoRunner::run(black_box(&problem), black_box(&heuristic), black_box(cfg));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_plan_routes,
    bench_ledger_rollback,
    bench_ga_shipment,
    bench_aco_shipment
);
criterion_main!(benches);
