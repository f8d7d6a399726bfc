use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use queue_sim::engine::{run_comparison, run_scenario};
use queue_sim::models::Scenario;

const CLIENTS: usize = 10_000;
const COUNTERS: &[usize] = &[1, 4, 16];

fn build_scenario(counters: usize) -> Scenario {
    Scenario::new(counters, 1.0, 1.2 / counters as f64, CLIENTS).with_seed(42)
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    for &counters in COUNTERS {
        let scenario = build_scenario(counters);
        group.bench_with_input(
            BenchmarkId::new("run_scenario", format!("{}x{}", CLIENTS, counters)),
            &scenario,
            |b, scenario| {
                b.iter(|| {
                    let stats = run_scenario(scenario).expect("simulation should succeed");
                    black_box(stats);
                });
            },
        );
    }

    let scenarios: Vec<Scenario> = COUNTERS.iter().map(|&counters| build_scenario(counters)).collect();
    group.bench_function("run_comparison", |b| {
        b.iter(|| {
            let stats = run_comparison(&scenarios).expect("comparison should succeed");
            black_box(stats);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
