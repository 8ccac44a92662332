//! Full evaluation pass: metric statuses, composite histories, current
//! composite values and their qualitative status.

use serde::Serialize;
use tracing::{info_span, warn};

use crate::config::EngineConfig;
use crate::core::{
    Category, CompositeKind, CompositeTier, HistoryPoint, MetricSet, StatusColor, Thresholds,
    Tier,
};
use crate::scoring::{aggregate, classify, CompositeValues, FormulaSet, Input, ScoreSource};

use super::reconstruct::{reconstruct, CompositeHistories, CurrentScores};

/// Unit shown for every composite index
pub const COMPOSITE_UNIT: &str = "Index";

/// Card data for one base metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricStatus {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub category: Category,
    pub current_value: Option<f64>,
    pub tier: Option<Tier>,
    pub color: Option<StatusColor>,
    pub score: Option<f64>,
}

/// Card and chart data for one composite index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeReport {
    pub kind: CompositeKind,
    pub name: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub status: CompositeTier,
    pub color: StatusColor,
    pub history: Vec<HistoryPoint>,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub metrics: Vec<MetricStatus>,
    pub composites: Vec<CompositeReport>,
}

impl Evaluation {
    pub fn composite(&self, kind: CompositeKind) -> Option<&CompositeReport> {
        self.composites.iter().find(|report| report.kind == kind)
    }

    pub fn metric(&self, id: &str) -> Option<&MetricStatus> {
        self.metrics.iter().find(|status| status.id == id)
    }
}

// Pure function: Classify each metric's current value
fn metric_statuses(metrics: &MetricSet) -> Vec<MetricStatus> {
    metrics
        .iter()
        .map(|metric| {
            let tier = metric
                .current_value
                .filter(|v| !v.is_nan())
                .map(|v| classify(v, &metric.thresholds));
            MetricStatus {
                id: metric.id.clone(),
                name: metric.name.clone(),
                unit: metric.unit.clone(),
                category: metric.category,
                current_value: metric.current_value,
                tier,
                color: tier.map(|t| t.color()),
                score: tier.map(|t| t.score()),
            }
        })
        .collect()
}

/// Current value of every composite.
///
/// A composite with history reports its latest point. Without history a
/// first-stage index is recomputed from the metrics' current values, and the
/// global index from the three first-stage values. Anything still
/// unavailable becomes 0.
pub fn current_values(
    metrics: &MetricSet,
    formulas: &FormulaSet,
    histories: &CompositeHistories,
) -> CompositeValues {
    let scores = CurrentScores(metrics);
    let recomputed = formulas.evaluate(&scores);

    let mut current = CompositeValues::default();
    for kind in CompositeKind::FIRST_STAGE {
        let value = histories
            .latest(kind)
            .or_else(|| recomputed.get(kind))
            .unwrap_or(0.0);
        current.set(kind, Some(value));
    }

    let global = histories.latest(CompositeKind::Global).unwrap_or_else(|| {
        aggregate(formulas.formula(CompositeKind::Global), |input| match input {
            Input::Composite { index } => current.get(*index),
            Input::Fixed { score, .. } => Some(*score),
            Input::Metric { id } => scores.score(id),
        })
        .unwrap_or(0.0)
    });
    current.set(CompositeKind::Global, Some(global));
    current
}

/// Evaluate the whole metric set.
///
/// Never fails: missing data surfaces as `None` on metrics and as sparse
/// composite histories.
pub fn evaluate(metrics: &MetricSet, engine: &EngineConfig) -> Evaluation {
    let _span = info_span!("evaluate", metrics = metrics.len()).entered();

    let known: Vec<&str> = metrics.ids().collect();
    let missing = engine.formulas.missing_metrics(&known);
    if !missing.is_empty() {
        warn!(
            missing = ?missing,
            "Formula inputs not found in the metric set; dependent indices are unavailable"
        );
    }

    let histories = reconstruct(metrics.as_slice(), &engine.formulas);
    let current = current_values(metrics, &engine.formulas, &histories);

    let composites = CompositeKind::ALL
        .into_iter()
        .map(|kind| {
            let value = current.get(kind).unwrap_or(0.0);
            let status = engine.status.classify(Some(value), kind.into());
            CompositeReport {
                kind,
                name: kind.name(),
                unit: COMPOSITE_UNIT,
                value,
                status,
                color: status.color(),
                history: histories.get(kind).to_vec(),
                thresholds: engine.composite_thresholds(kind),
            }
        })
        .collect();

    Evaluation {
        metrics: metric_statuses(metrics),
        composites,
    }
}
