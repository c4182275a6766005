use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use core_sim::{AgentConfig, SeededSource};
use runtime::{
    benchmark::{calculate_simulations_per_sec, meets_target_simulations_per_sec},
    simulate, TARGET_SIMULATIONS_PER_SEC,
};
use std::time::Instant;

const BENCH_RUNS: u64 = 1_000;

fn bench_simulation_throughput(c: &mut Criterion) {
    let config = AgentConfig::default();

    let mut group = c.benchmark_group("simulation_throughput");
    group.throughput(Throughput::Elements(BENCH_RUNS));

    group.bench_function(BenchmarkId::new("simulate", BENCH_RUNS), |b| {
        b.iter(|| {
            let mut rng = SeededSource::new(7);
            for _ in 0..BENCH_RUNS {
                let _ = simulate(&config, &mut rng);
            }
        });
    });

    group.finish();

    let started = Instant::now();
    let mut rng = SeededSource::new(11);
    for _ in 0..BENCH_RUNS {
        let _ = simulate(&config, &mut rng);
    }
    let achieved = calculate_simulations_per_sec(BENCH_RUNS, started.elapsed().as_nanos());
    let meets_target = meets_target_simulations_per_sec(achieved, TARGET_SIMULATIONS_PER_SEC);
    println!(
        "target_simulations_per_sec={TARGET_SIMULATIONS_PER_SEC} achieved={achieved} meets_target={meets_target}"
    );
}

criterion_group!(benches, bench_simulation_throughput);
criterion_main!(benches);
