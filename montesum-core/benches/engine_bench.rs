//! Criterion benchmarks for the resampling hot paths.
//!
//! Benchmarks:
//! 1. Bulk draw generation at batch sizes from 1k to 100k
//! 2. Inverse-CDF assignment across table sizes
//! 3. The full per-record cycle (parse + fill + assign + accumulate)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use montesum_core::{DrawSource, RunConfig, Simulation, UniformSource, WeightDistribution};

fn bench_bulk_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_fill");
    for &size in &[1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut source = UniformSource::seeded(1234);
            let mut batch = vec![0.0; size];
            b.iter(|| {
                source.fill_batch(black_box(&mut batch));
            });
        });
    }
    group.finish();
}

fn bench_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("assignment");
    for &groups in &[2usize, 8, 64, 512] {
        let weights: Vec<f64> = (1..=groups).map(|i| i as f64).collect();
        let dist = WeightDistribution::from_weights(&weights).unwrap();

        let mut source = UniformSource::seeded(42);
        let mut draws = vec![0.0; 10_000];
        source.fill_batch(&mut draws);

        group.bench_with_input(BenchmarkId::from_parameter(groups), &dist, |b, dist| {
            b.iter(|| {
                let mut acc = 0usize;
                for &draw in &draws {
                    acc += dist.group_for(black_box(draw));
                }
                black_box(acc)
            });
        });
    }
    group.finish();
}

fn bench_record_cycle(c: &mut Criterion) {
    let record: Vec<String> = ["a", "10.5", "20.25", "30.125"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut group = c.benchmark_group("record_cycle");
    for &simulations in &[1_000usize, 10_000] {
        for &parallel in &[false, true] {
            let label = format!(
                "{simulations}_{}",
                if parallel { "parallel" } else { "sequential" }
            );
            group.bench_function(BenchmarkId::from_parameter(label), |b| {
                let config = RunConfig {
                    simulations,
                    weights: vec![5.0, 5.0],
                    seed: 1234,
                    parallel,
                };
                let mut sim = Simulation::new(&config).unwrap();
                b.iter(|| {
                    sim.process_record(black_box(&record)).unwrap();
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_bulk_fill, bench_assignment, bench_record_cycle);
criterion_main!(benches);
