use chrono::NaiveDate;
use farmkpi::catalog::{ids, seed_metric_set};
use farmkpi::config::{EngineConfig, FarmKpiConfig};
use farmkpi::import::{read_import, RejectReason};
use farmkpi::{evaluate, CompositeKind, DateRange, HistoryPoint};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_invalid_calendar_date_leaves_history_untouched() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "bad.csv", "kpi,date,value\neua,2024-13-45,3.0\n");

    let mut metrics = seed_metric_set().unwrap();
    let summary = metrics.apply_import(read_import(&path).unwrap());

    assert_eq!(summary.merged_count(), 0);
    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(
        summary.rejected[0].reason,
        RejectReason::InvalidDate("2024-13-45".to_string())
    );
    let eua = metrics.get(ids::WATER_USE_EFFICIENCY).unwrap();
    assert!(eua.history.is_empty());
    assert_eq!(eua.current_value, Some(2.8));
}

#[test]
fn test_second_import_overrides_shared_dates() {
    let dir = TempDir::new().unwrap();
    let first = write_csv(
        &dir,
        "first.csv",
        indoc! {"
            kpi,date,value
            per,2024-01-01,70
            per,2024-01-02,75
        "},
    );
    let second = write_csv(
        &dir,
        "second.csv",
        indoc! {"
            kpi,date,value
            per,2024-01-02,96
            per,2023-12-31,60
            ghost,2024-01-02,1
        "},
    );

    let mut metrics = seed_metric_set().unwrap();
    metrics.apply_import(read_import(&first).unwrap());
    let summary = metrics.apply_import(read_import(&second).unwrap());

    let per = metrics.get(ids::RENEWABLE_ENERGY).unwrap();
    assert_eq!(
        per.history,
        vec![
            HistoryPoint::new(date("2023-12-31"), 60.0),
            HistoryPoint::new(date("2024-01-01"), 70.0),
            HistoryPoint::new(date("2024-01-02"), 96.0),
        ]
    );
    assert_eq!(per.current_value, Some(96.0));
    assert_eq!(summary.unmatched, vec!["ghost".to_string()]);
}

#[test]
fn test_imported_history_feeds_composites_within_range() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "env.csv",
        indoc! {"
            kpi,date,value
            eua,2024-01-01,1.5
            per,2024-01-01,99
            irr,2024-01-01,99
            eua,2024-02-01,5.0
            per,2024-02-01,10
            irr,2024-02-01,10
        "},
    );

    let mut metrics = seed_metric_set().unwrap();
    metrics.apply_import(read_import(&path).unwrap());
    let engine = EngineConfig::from_config(&FarmKpiConfig::default()).unwrap();

    let full = evaluate(&metrics, &engine);
    let isa = full.composite(CompositeKind::Environmental).unwrap();
    assert_eq!(isa.history.len(), 2);
    assert_eq!(isa.value, 0.25);

    let january = DateRange::new(None, Some(date("2024-01-31"))).apply(&metrics);
    let filtered = evaluate(&january, &engine);
    let isa = filtered.composite(CompositeKind::Environmental).unwrap();
    assert_eq!(isa.history, vec![HistoryPoint::new(date("2024-01-01"), 1.0)]);
    assert_eq!(isa.value, 1.0);
}
