use criterion::{black_box, criterion_group, criterion_main, Criterion};
use core_sim::{AgentConfig, SeededSource};
use runtime::{metrics::SimulationLatencyMetrics, simulate, TARGET_SIMULATIONS_PER_SEC};
use std::time::Instant;

const LATENCY_SAMPLES: u64 = 5_000;

fn bench_simulation_latency(c: &mut Criterion) {
    let config = AgentConfig::default();

    let mut metrics = SimulationLatencyMetrics::new();
    for seed in 0..LATENCY_SAMPLES {
        let started = Instant::now();
        let result = simulate(&config, &mut SeededSource::new(seed));
        let elapsed_nanos = started.elapsed().as_nanos() as u64;
        metrics.record_latency_nanos(elapsed_nanos);
        black_box(result.ok());
    }

    if let Some(report) = metrics.percentiles() {
        let budget_nanos = 1_000_000_000 / TARGET_SIMULATIONS_PER_SEC;
        println!(
            "latency_budget_nanos={budget_nanos} p50_nanos={} p95_nanos={} p99_nanos={} max_nanos={} samples={}",
            report.p50_nanos, report.p95_nanos, report.p99_nanos, report.max_nanos, report.count
        );
    }

    c.bench_function("simulate_reference_scenario", |b| {
        let mut rng = SeededSource::new(13);
        b.iter(|| black_box(simulate(black_box(&config), &mut rng).ok()));
    });
}

criterion_group!(benches, bench_simulation_latency);
criterion_main!(benches);
