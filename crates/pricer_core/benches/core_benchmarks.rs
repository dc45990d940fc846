//! Criterion benchmarks for pricer_core root finders.
//!
//! Compares Brent and Newton-Raphson on a smooth monotone target shaped like
//! an implied-volatility inversion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};

/// Smooth increasing function with a root near 0.2.
fn target(x: f64) -> f64 {
    x * x * x + 0.5 * x - 0.108
}

fn target_prime(x: f64) -> f64 {
    3.0 * x * x + 0.5
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("root_finding");

    for tolerance in [1e-6, 1e-10, 1e-14] {
        let config = SolverConfig::new(tolerance, 200);

        let brent = BrentSolver::new(config);
        group.bench_with_input(BenchmarkId::new("brent", tolerance), &brent, |b, s| {
            b.iter(|| s.find_root(target, black_box(1e-4), black_box(5.0)).unwrap());
        });

        let newton = NewtonRaphsonSolver::new(config);
        group.bench_with_input(BenchmarkId::new("newton", tolerance), &newton, |b, s| {
            b.iter(|| s.find_root(target, target_prime, black_box(1.0)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solvers);
criterion_main!(benches);
