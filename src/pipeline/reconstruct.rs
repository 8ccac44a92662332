//! Replays the composite formulas over every historical date.
//!
//! Dates come from the union of all metric histories, in calendar order.
//! A composite only gets a point on dates where all of its inputs are
//! available, so the resulting series are sparse rather than zero-filled.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info_span};

use crate::core::{CompositeKind, HistoryPoint, Metric, MetricSet, Thresholds};
use crate::scoring::{normalize, normalize_value, CompositeValues, FormulaSet, ScoreSource};

/// Per-metric lookup of the value recorded on each date.
///
/// When a history carries the same date twice, the first point wins.
#[derive(Debug, Default)]
pub struct HistoryIndex<'a> {
    series: HashMap<&'a str, (BTreeMap<NaiveDate, f64>, &'a Thresholds)>,
    dates: BTreeSet<NaiveDate>,
}

impl<'a> HistoryIndex<'a> {
    pub fn build(metrics: &'a [Metric]) -> Self {
        let mut index = HistoryIndex::default();
        for metric in metrics {
            let mut by_date = BTreeMap::new();
            for point in &metric.history {
                by_date.entry(point.date).or_insert(point.value);
                index.dates.insert(point.date);
            }
            index
                .series
                .entry(metric.id.as_str())
                .or_insert((by_date, &metric.thresholds));
        }
        index
    }

    /// Every distinct date, ascending
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    /// Metric values as they were on `date`
    pub fn snapshot(&self, date: NaiveDate) -> Snapshot<'_, 'a> {
        Snapshot { index: self, date }
    }
}

/// The metric set as seen on one historical date. Metrics without a
/// reading on that date are unavailable.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'i, 'a> {
    index: &'i HistoryIndex<'a>,
    date: NaiveDate,
}

impl ScoreSource for Snapshot<'_, '_> {
    fn score(&self, metric_id: &str) -> Option<f64> {
        let (values, thresholds) = self.index.series.get(metric_id)?;
        normalize_value(values.get(&self.date).copied(), thresholds)
    }
}

/// Scores from each metric's current value
#[derive(Debug, Clone, Copy)]
pub struct CurrentScores<'a>(pub &'a MetricSet);

impl ScoreSource for CurrentScores<'_> {
    fn score(&self, metric_id: &str) -> Option<f64> {
        self.0.get(metric_id).and_then(normalize)
    }
}

/// Historical series of every composite index, each sorted by date
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompositeHistories {
    pub environmental: Vec<HistoryPoint>,
    pub social: Vec<HistoryPoint>,
    pub technological: Vec<HistoryPoint>,
    pub global: Vec<HistoryPoint>,
}

impl CompositeHistories {
    pub fn get(&self, kind: CompositeKind) -> &[HistoryPoint] {
        match kind {
            CompositeKind::Environmental => &self.environmental,
            CompositeKind::Social => &self.social,
            CompositeKind::Technological => &self.technological,
            CompositeKind::Global => &self.global,
        }
    }

    fn series_mut(&mut self, kind: CompositeKind) -> &mut Vec<HistoryPoint> {
        match kind {
            CompositeKind::Environmental => &mut self.environmental,
            CompositeKind::Social => &mut self.social,
            CompositeKind::Technological => &mut self.technological,
            CompositeKind::Global => &mut self.global,
        }
    }

    /// Most recent value of a composite, if it has any history
    pub fn latest(&self, kind: CompositeKind) -> Option<f64> {
        self.get(kind).last().map(|point| point.value)
    }

    // Only defined values are recorded
    fn record(&mut self, date: NaiveDate, values: &CompositeValues) {
        for kind in CompositeKind::ALL {
            if let Some(value) = values.get(kind) {
                self.series_mut(kind).push(HistoryPoint::new(date, value));
            }
        }
    }
}

/// Recompute every composite at every date found in any metric history.
pub fn reconstruct(metrics: &[Metric], formulas: &FormulaSet) -> CompositeHistories {
    let index = HistoryIndex::build(metrics);
    let _span = info_span!("reconstruct", dates = index.date_count()).entered();

    let mut histories = CompositeHistories::default();
    for date in index.dates() {
        let values = formulas.evaluate(&index.snapshot(date));
        histories.record(date, &values);
    }

    debug!(
        isa = histories.environmental.len(),
        iis = histories.social.len(),
        idt = histories.technological.len(),
        igd = histories.global.len(),
        "Reconstructed composite histories"
    );
    histories
}
