//! Benchmarks for the exhaustive solver and the expectation reducer
//!
//! Run with: cargo bench -p linqaoa-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use linqaoa_core::{
    OutcomeDistribution, PenalizedObjective, PenaltyWeight, ProblemInstance, expectation,
    solve_exact,
};

fn instance(n: usize) -> ProblemInstance {
    let costs = (0..n).map(|i| (i % 5 + 1) as f64).collect();
    let weights = (0..n).map(|i| (i % 3 + 1) as f64).collect();
    ProblemInstance::new(costs, weights, n as f64).unwrap()
}

fn uniform(width: usize) -> OutcomeDistribution {
    let p = 1.0 / (1u64 << width) as f64;
    OutcomeDistribution::from_probabilities(
        (0..1u64 << width).map(|i| (format!("{i:0width$b}"), p)),
    )
    .unwrap()
}

/// Benchmark brute-force enumeration
fn bench_solve_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_exact");

    for n in &[4, 8, 12, 16] {
        let problem = instance(*n);
        group.bench_with_input(BenchmarkId::new("items", n), &problem, |b, p| {
            b.iter(|| solve_exact(black_box(p)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the penalized expectation over a full distribution
fn bench_expectation(c: &mut Criterion) {
    let mut group = c.benchmark_group("expectation");

    for n in &[4, 8, 12] {
        let problem = instance(*n);
        // Two ancilla bits on top of the choice register.
        let dist = uniform(n + 2);
        let objective = PenalizedObjective::new(&problem, PenaltyWeight::integer(10));
        group.bench_with_input(BenchmarkId::new("width", n + 2), &dist, |b, d| {
            b.iter(|| expectation(black_box(d), &objective).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solve_exact, bench_expectation);
criterion_main!(benches);
