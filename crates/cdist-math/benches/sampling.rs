//! Sampler throughput.
//!
//! `cargo bench -p cdist-math --bench sampling`

use cdist_math::distributions::{Beta, Gamma, LogNormal};
use cdist_math::random_numbers::MersenneTwisterUniformRng;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const BATCH: usize = 4096;

fn bench_gamma(c: &mut Criterion) {
    let mut group = c.benchmark_group("gamma");
    group.throughput(Throughput::Elements(BATCH as u64));
    // below one (boosted), exponential, moderate, large
    for shape in [0.3, 1.0, 2.5, 200.0] {
        let mut dist = Gamma::with_source(shape, 1.0, MersenneTwisterUniformRng::new(1)).unwrap();
        let mut out = vec![0.0; BATCH];
        group.bench_with_input(BenchmarkId::from_parameter(shape), &shape, |b, _| {
            b.iter(|| {
                dist.fill(&mut out);
                black_box(&out);
            })
        });
    }
    group.finish();
}

fn bench_beta(c: &mut Criterion) {
    let mut group = c.benchmark_group("beta");
    group.throughput(Throughput::Elements(BATCH as u64));
    for (a, b) in [(0.5, 0.5), (2.0, 5.0), (50.0, 50.0)] {
        let mut dist = Beta::with_source(a, b, MersenneTwisterUniformRng::new(1)).unwrap();
        let mut out = vec![0.0; BATCH];
        group.bench_with_input(BenchmarkId::new("a_b", format!("{a}_{b}")), &(a, b), |bench, _| {
            bench.iter(|| {
                dist.fill(&mut out);
                black_box(&out);
            })
        });
    }
    group.finish();
}

fn bench_log_normal(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_normal");
    group.throughput(Throughput::Elements(BATCH as u64));
    let mut dist = LogNormal::with_source(0.0, 1.0, MersenneTwisterUniformRng::new(1)).unwrap();
    let mut out = vec![0.0; BATCH];
    group.bench_function("fill", |b| {
        b.iter(|| {
            dist.fill(&mut out);
            black_box(&out);
        })
    });
    group.bench_function("single", |b| b.iter(|| black_box(dist.sample())));
    group.finish();
}

criterion_group!(benches, bench_gamma, bench_beta, bench_log_normal);
criterion_main!(benches);
