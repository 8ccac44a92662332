use chrono::NaiveDate;
use farmkpi::catalog::{ids, seed_metric_set};
use farmkpi::config::{EngineConfig, FarmKpiConfig};
use farmkpi::{
    classify, classify_composite, evaluate, normalize, reconstruct, CompositeKind, CompositeTier,
    HistoryPoint, MetricSet, StatusScale, Thresholds, Tier,
};
use pretty_assertions::assert_eq;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
}

fn engine_with_placeholder(score: f64) -> EngineConfig {
    let mut config = FarmKpiConfig::default();
    config.aggregation.data_analysis_score = score;
    EngineConfig::from_config(&config).unwrap()
}

fn with_histories(points: &[(&str, &[(u32, f64)])]) -> MetricSet {
    seed_metric_set().unwrap().map_metrics(|metric| {
        let mut metric = metric.clone();
        if let Some((_, series)) = points.iter().find(|(id, _)| *id == metric.id) {
            metric.history = series
                .iter()
                .map(|(d, value)| HistoryPoint::new(day(*d), *value))
                .collect();
        }
        metric
    })
}

/// One optimal reading per metric on day 1
fn optimal_day() -> MetricSet {
    with_histories(&[
        (ids::WATER_USE_EFFICIENCY, &[(1, 1.0)]),
        (ids::RENEWABLE_ENERGY, &[(1, 99.0)]),
        (ids::WASTE_RECYCLING, &[(1, 99.0)]),
        (ids::LOCAL_FOOD_ACCESS, &[(1, 90.0)]),
        (ids::COMMUNITY_PARTICIPATION, &[(1, 95.0)]),
        (ids::FOOD_SAFETY, &[(1, 100.0)]),
        (ids::SMART_TECH_INVESTMENT, &[(1, 25.0)]),
        (ids::MONITORING_EFFICIENCY, &[(1, 99.5)]),
    ])
}

#[test]
fn test_water_use_scenario_is_acceptable() {
    let thresholds = Thresholds::lower_is_better(2.0, 3.0, 4.0);
    let tier = classify(2.8, &thresholds);
    assert_eq!(tier, Tier::Acceptable);
    assert_eq!(tier.score(), 0.75);

    let set = seed_metric_set().unwrap();
    assert_eq!(normalize(set.get(ids::WATER_USE_EFFICIENCY).unwrap()), Some(0.75));
}

#[test]
fn test_global_status_scenarios() {
    let global = StatusScale::Global;
    assert_eq!(classify_composite(Some(0.82), global), CompositeTier::Excellent);
    assert_eq!(classify_composite(Some(0.64), global), CompositeTier::Regular);
    assert_eq!(classify_composite(Some(0.50), global), CompositeTier::Regular);
    assert_eq!(classify_composite(Some(0.49), global), CompositeTier::Deficient);
}

#[test]
fn test_history_is_sparse_where_inputs_are_missing() {
    let metrics = with_histories(&[
        (ids::WATER_USE_EFFICIENCY, &[(1, 2.5), (2, 2.5), (3, 2.5)]),
        (ids::RENEWABLE_ENERGY, &[(3, 85.0), (1, 85.0)]),
        (ids::WASTE_RECYCLING, &[(2, 90.0), (1, 90.0), (3, 90.0)]),
    ]);
    let engine = engine_with_placeholder(0.75);
    let histories = reconstruct(metrics.as_slice(), &engine.formulas);

    assert_eq!(
        histories.environmental,
        vec![HistoryPoint::new(day(1), 0.75), HistoryPoint::new(day(3), 0.75)]
    );
}

#[test]
fn test_uniform_optimal_gives_one_everywhere() {
    let evaluation = evaluate(&optimal_day(), &engine_with_placeholder(1.0));
    for kind in CompositeKind::ALL {
        let report = evaluation.composite(kind).unwrap();
        assert_eq!(report.value, 1.0, "{}", kind);
        assert_eq!(report.history, vec![HistoryPoint::new(day(1), 1.0)]);
        assert_eq!(report.status, CompositeTier::Excellent);
    }
}

#[test]
fn test_default_placeholder_caps_technological_index() {
    let evaluation = evaluate(&optimal_day(), &engine_with_placeholder(0.75));
    let value = |kind| evaluation.composite(kind).unwrap().value;
    assert_eq!(value(CompositeKind::Environmental), 1.0);
    assert_eq!(value(CompositeKind::Social), 1.0);
    assert_eq!(value(CompositeKind::Technological), 0.92);
    assert_eq!(value(CompositeKind::Global), 0.98);
}

#[test]
fn test_missing_constituent_removes_date_from_global() {
    // Day 2 has everything except food safety
    let metrics = with_histories(&[
        (ids::WATER_USE_EFFICIENCY, &[(1, 1.0), (2, 1.0)]),
        (ids::RENEWABLE_ENERGY, &[(1, 99.0), (2, 99.0)]),
        (ids::WASTE_RECYCLING, &[(1, 99.0), (2, 99.0)]),
        (ids::LOCAL_FOOD_ACCESS, &[(1, 90.0), (2, 90.0)]),
        (ids::COMMUNITY_PARTICIPATION, &[(1, 95.0), (2, 95.0)]),
        (ids::FOOD_SAFETY, &[(1, 100.0)]),
        (ids::SMART_TECH_INVESTMENT, &[(1, 25.0), (2, 25.0)]),
        (ids::MONITORING_EFFICIENCY, &[(1, 99.5), (2, 99.5)]),
    ]);
    let histories = reconstruct(metrics.as_slice(), &engine_with_placeholder(1.0).formulas);

    assert_eq!(histories.environmental.len(), 2);
    assert_eq!(histories.technological.len(), 2);
    assert_eq!(histories.social, vec![HistoryPoint::new(day(1), 1.0)]);
    assert_eq!(histories.global, vec![HistoryPoint::new(day(1), 1.0)]);
}

#[test]
fn test_evaluation_is_idempotent() {
    let metrics = with_histories(&[
        (ids::WATER_USE_EFFICIENCY, &[(1, 2.2), (5, 3.7), (9, 1.1)]),
        (ids::RENEWABLE_ENERGY, &[(1, 70.0), (5, 96.0), (9, 50.0)]),
        (ids::WASTE_RECYCLING, &[(1, 88.0), (5, 60.0), (9, 99.0)]),
    ]);
    let engine = engine_with_placeholder(0.75);

    let first = evaluate(&metrics, &engine);
    let second = evaluate(&metrics, &engine);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_renamed_constituent_degrades_gracefully() {
    let metrics = MetricSet::new(
        seed_metric_set()
            .unwrap()
            .iter()
            .filter(|m| m.id != ids::RENEWABLE_ENERGY)
            .cloned()
            .collect(),
    )
    .unwrap();
    let evaluation = evaluate(&metrics, &engine_with_placeholder(0.75));

    let isa = evaluation.composite(CompositeKind::Environmental).unwrap();
    assert_eq!(isa.value, 0.0);
    assert_eq!(isa.status, CompositeTier::Deficient);
    // Siblings still evaluate
    assert_eq!(evaluation.composite(CompositeKind::Social).unwrap().value, 0.75);
}
