use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use farmkpi::catalog::seed_metric_set;
use farmkpi::config::{EngineConfig, FarmKpiConfig};
use farmkpi::{evaluate, reconstruct, HistoryPoint, MetricSet};
use std::hint::black_box;

/// Seed metrics with `days` daily readings. Each metric skips every fifth
/// day at an offset taken from its id, so the composites stay sparse.
fn metrics_with_history(days: u64) -> MetricSet {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let seed = seed_metric_set().unwrap();
    seed.map_metrics(|metric| {
        let mut metric = metric.clone();
        let base = metric.current_value.unwrap_or(50.0);
        let skip = metric.id.len() as u64 % 5;
        metric.history = (0..days)
            .filter(|d| d % 5 != skip)
            .map(|d| {
                let wobble = ((d % 17) as f64 - 8.0) / 8.0;
                HistoryPoint::new(start + Days::new(d), base * (1.0 + 0.1 * wobble))
            })
            .collect();
        metric
    })
}

fn benchmark_reconstruction(c: &mut Criterion) {
    let engine = EngineConfig::from_config(&FarmKpiConfig::default()).unwrap();
    let mut group = c.benchmark_group("reconstruct");

    for years in [1u64, 3, 5] {
        let metrics = metrics_with_history(years * 365);
        group.bench_with_input(BenchmarkId::from_parameter(years), &metrics, |b, metrics| {
            b.iter(|| reconstruct(black_box(metrics.as_slice()), &engine.formulas))
        });
    }
    group.finish();
}

fn benchmark_full_evaluation(c: &mut Criterion) {
    let engine = EngineConfig::from_config(&FarmKpiConfig::default()).unwrap();
    let metrics = metrics_with_history(5 * 365);

    c.bench_function("evaluate_five_years", |b| {
        b.iter(|| evaluate(black_box(&metrics), &engine))
    });
}

criterion_group!(benches, benchmark_reconstruction, benchmark_full_evaluation);
criterion_main!(benches);
