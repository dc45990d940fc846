//! Criterion benchmarks for pricer_risk strategy and scenario calculations.
//!
//! Benchmarks cover:
//! - Strategy construction through the factory
//! - Scenario risk evaluation, sequential vs parallel sweeps
//! - Empirical risk measures on large P&L vectors

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::models::ValuationModel;
use pricer_risk::parallel::ParallelConfig;
use pricer_risk::scenarios::{GridConfig, RiskConfig, RiskEngine, RiskMeasures, ScenarioSet};
use pricer_risk::strategy::StrategyFactory;

/// Benchmark strategy construction (every leg priced once).
fn bench_strategy_factory(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategy_factory");

    let models = [
        ("european", ValuationModel::European),
        ("american_100", ValuationModel::American { steps: 100 }),
    ];
    for (label, model) in models {
        let factory = StrategyFactory::new(model);
        group.bench_function(BenchmarkId::new("iron_condor", label), |b| {
            b.iter(|| {
                factory
                    .create(black_box("iron_condor"), 100.0, 100.0, 0.05, 0.2, 1.0, true)
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark scenario risk, sequential vs parallel.
fn bench_risk_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("risk_evaluation");
    group.sample_size(20);

    let strategy = StrategyFactory::new(ValuationModel::American { steps: 50 })
        .create("iron_condor", 100.0, 100.0, 0.05, 0.2, 1.0, true)
        .unwrap();

    for points in [101, 1001] {
        let scenarios = ScenarioSet::LinearGrid(GridConfig {
            lower: 0.8,
            upper: 1.2,
            points,
        });

        let sequential = RiskEngine::new(RiskConfig {
            parallel: ParallelConfig::sequential(),
            ..RiskConfig::default()
        });
        group.bench_with_input(BenchmarkId::new("sequential", points), &scenarios, |b, s| {
            b.iter(|| sequential.evaluate_strategy(&strategy, 0.95, black_box(s)).unwrap());
        });

        let parallel = RiskEngine::new(RiskConfig {
            parallel: ParallelConfig::new(16, 1),
            ..RiskConfig::default()
        });
        group.bench_with_input(BenchmarkId::new("parallel", points), &scenarios, |b, s| {
            b.iter(|| parallel.evaluate_strategy(&strategy, 0.95, black_box(s)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark VaR/ES on raw P&L (dominated by the sort).
fn bench_risk_measures(c: &mut Criterion) {
    let mut group = c.benchmark_group("risk_measures");

    for n in [1_000, 100_000] {
        let pnl: Vec<f64> = (0..n)
            .map(|i| ((i * 7919 % 1000) as f64 - 500.0) * 0.01)
            .collect();
        group.bench_with_input(BenchmarkId::new("from_pnl", n), &pnl, |b, pnl| {
            b.iter(|| RiskMeasures::from_pnl(black_box(pnl), 0.99).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_strategy_factory,
    bench_risk_evaluation,
    bench_risk_measures
);
criterion_main!(benches);
