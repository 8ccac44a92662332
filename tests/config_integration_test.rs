use farmkpi::catalog::{ids, seed_metric_set};
use farmkpi::config::{load_config_from_path, EngineConfig, FarmKpiConfig};
use farmkpi::{evaluate, CompositeKind, CompositeTier, ErrorCode, Thresholds, Tier};
use indoc::indoc;
use std::fs;
use tempfile::TempDir;

fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".farmkpi.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_threshold_override_changes_metric_tier() {
    let (_dir, path) = write_config(indoc! {r#"
        [thresholds.eua]
        interpretation = "lower_is_better"
        optimal_max = 3.0
        acceptable_max = 3.5
        attention_max = 4.0
    "#});
    let config = load_config_from_path(&path).unwrap();
    let engine = EngineConfig::from_config(&config).unwrap();

    let mut metrics = seed_metric_set().unwrap();
    metrics.apply_overrides(engine.metric_overrides()).unwrap();
    let evaluation = evaluate(&metrics, &engine);

    assert_eq!(
        evaluation.metric(ids::WATER_USE_EFFICIENCY).unwrap().tier,
        Some(Tier::Optimal)
    );
}

#[test]
fn test_mode_mismatch_is_fatal() {
    let (_dir, path) = write_config(indoc! {r#"
        [thresholds.eua]
        interpretation = "higher_is_better"
        optimal_min = 3.0
    "#});
    let config = load_config_from_path(&path).unwrap();
    let engine = EngineConfig::from_config(&config).unwrap();

    let mut metrics = seed_metric_set().unwrap();
    let err = metrics.apply_overrides(engine.metric_overrides()).unwrap_err();
    assert!(err.to_string().contains("eua"));
    // The metric keeps its built-in thresholds
    assert_eq!(
        metrics.get(ids::WATER_USE_EFFICIENCY).unwrap().thresholds,
        Thresholds::lower_is_better(2.0, 3.0, 4.0)
    );
}

#[test]
fn test_unknown_metric_override_is_skipped() {
    let mut config = FarmKpiConfig::default();
    config
        .thresholds
        .insert("nitrogen".to_string(), Thresholds::higher_is_better(1.0, 0.5, 0.1));
    let engine = EngineConfig::from_config(&config).unwrap();

    let mut metrics = seed_metric_set().unwrap();
    assert!(metrics.apply_overrides(engine.metric_overrides()).is_ok());
}

#[test]
fn test_unknown_interpretation_tag_is_a_parse_error() {
    let (_dir, path) = write_config(indoc! {r#"
        [thresholds.per]
        interpretation = "more_is_merrier"
    "#});
    let err = load_config_from_path(&path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_PARSE);
}

#[test]
fn test_misnamed_cut_points_are_parse_errors() {
    for table in [
        indoc! {r#"
            [thresholds.per]
            interpretation = "higher_is_better"
            optimal_max = 90.0
        "#},
        indoc! {r#"
            [thresholds.per]
            interpretation = "higher_is_better"
            optimal_min = 90.0
            acceptable_mni = 70.0
        "#},
        indoc! {r#"
            [composite_thresholds.igd]
            interpretation = "higher_is_better"
            optimal_minimum = 0.9
        "#},
    ] {
        let (_dir, path) = write_config(table);
        let err = load_config_from_path(&path).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_PARSE, "{}", table);
    }
}

#[test]
fn test_status_bands_and_placeholder_from_config() {
    let (_dir, path) = write_config(indoc! {r#"
        [aggregation]
        data_analysis_score = 1.0

        [status.global]
        excellent = 0.95
        good = 0.76
        regular = 0.5
    "#});
    let engine = EngineConfig::from_config(&load_config_from_path(&path).unwrap()).unwrap();
    let evaluation = evaluate(&seed_metric_set().unwrap(), &engine);

    // 0.3 + 0.3 + 0.3 with the full placeholder
    assert_eq!(
        evaluation.composite(CompositeKind::Technological).unwrap().value,
        0.9
    );
    let igd = evaluation.composite(CompositeKind::Global).unwrap();
    // 0.2625 + 0.2625 + 0.27 lands just under 0.795
    assert_eq!(igd.value, 0.79);
    assert_eq!(igd.status, CompositeTier::Good);
}

#[test]
fn test_every_problem_is_reported_at_once() {
    let (_dir, path) = write_config(indoc! {r#"
        [aggregation]
        data_analysis_score = -1.0

        [status.standard]
        excellent = 0.1
        good = 0.7
        regular = 0.5

        [composite_thresholds.xyz]
        interpretation = "higher_is_better"
        optimal_min = 0.9
    "#});
    let err = load_config_from_path(&path).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("3 error(s)"), "{}", message);
    assert_eq!(err.code(), ErrorCode::VALIDATION_GENERIC);
}
