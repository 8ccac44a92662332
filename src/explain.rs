//! Plain-text explanations of how a metric is measured and how a composite
//! index is computed from the current data.

use std::fmt::Write;

use crate::catalog::measurement_formula;
use crate::config::EngineConfig;
use crate::core::{CompositeKind, ItemRef, Metric, MetricSet, Tier};
use crate::pipeline::CurrentScores;
use crate::scoring::{classify, FormulaSet, Input, ScoreSource};

/// Fixed-point rendering; unavailable values print as "N/A".
pub fn format_value(value: Option<f64>, digits: usize) -> String {
    match value.filter(|v| !v.is_nan()) {
        Some(v) => format!("{:.*}", digits, v),
        None => "N/A".to_string(),
    }
}

/// Explanation of a metric or composite; `None` for an unknown metric id.
pub fn explain(item: &ItemRef, metrics: &MetricSet, engine: &EngineConfig) -> Option<String> {
    match item {
        ItemRef::Metric(id) => metrics.get(id).map(explain_metric),
        ItemRef::Composite(kind) => Some(explain_composite(*kind, metrics, &engine.formulas)),
    }
}

pub fn explain_metric(metric: &Metric) -> String {
    let mut out = String::new();
    writeln!(out, "{} ({})", metric.name, metric.id).unwrap();
    if let Some(formula) = measurement_formula(&metric.id) {
        writeln!(out, "Formula: {}", formula).unwrap();
    }
    if !metric.description.is_empty() {
        writeln!(out, "{}", metric.description).unwrap();
    }
    let interpretation = metric.interpretation();
    writeln!(
        out,
        "Interpretation: {} ({})",
        interpretation,
        interpretation.direction_hint()
    )
    .unwrap();

    let thresholds = metric
        .thresholds
        .field_names()
        .iter()
        .zip(metric.thresholds.cut_points())
        .map(|(name, value)| match value {
            Some(v) => format!("{} = {}", name, format_value(Some(v), 2)),
            None => format!("{} = not set", name),
        })
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "Thresholds: {}", thresholds).unwrap();

    let tier: Option<Tier> = metric
        .current_value
        .filter(|v| !v.is_nan())
        .map(|v| classify(v, &metric.thresholds));
    match tier {
        Some(tier) => {
            writeln!(
                out,
                "Current value: {} {} ({}, score {})",
                format_value(metric.current_value, 2),
                metric.unit,
                tier,
                format_value(Some(tier.score()), 2)
            )
            .unwrap();
        }
        None => {
            writeln!(out, "Current value: N/A").unwrap();
        }
    }
    out
}

// Pure function: Short uppercase symbol used inside formulas
fn symbol(input: &Input) -> String {
    match input {
        Input::Metric { id } => id.to_uppercase(),
        Input::Fixed { label, .. } => label.to_uppercase(),
        Input::Composite { index } => index.id().to_uppercase(),
    }
}

pub fn explain_composite(kind: CompositeKind, metrics: &MetricSet, formulas: &FormulaSet) -> String {
    let formula = formulas.formula(kind);
    let scores = CurrentScores(metrics);
    let current = formulas.evaluate(&scores);

    let mut out = String::new();
    writeln!(out, "{}", kind.name()).unwrap();
    writeln!(out, "{}", kind.description()).unwrap();

    let expression = formula
        .terms
        .iter()
        .map(|term| format!("{} * {}", term.weight, symbol(&term.input)))
        .collect::<Vec<_>>()
        .join(" + ");
    writeln!(out, "Formula: {} = {}", kind.id().to_uppercase(), expression).unwrap();
    writeln!(out, "Where:").unwrap();

    for term in &formula.terms {
        let line = match &term.input {
            Input::Metric { id } => {
                let name = metrics.get(id).map_or("unknown metric", |m| m.name.as_str());
                format!(
                    "{} (normalized) = {}  {}",
                    symbol(&term.input),
                    format_value(scores.score(id), 2),
                    name
                )
            }
            Input::Fixed { score, .. } => format!(
                "{} = {}  fixed score, no measured metric feeds this term yet",
                symbol(&term.input),
                format_value(Some(*score), 2)
            ),
            Input::Composite { index } => format!(
                "{} = {}  {}",
                symbol(&term.input),
                format_value(current.get(*index), 2),
                index.name()
            ),
        };
        writeln!(out, "  {}", line).unwrap();
    }

    if kind.is_global() {
        writeln!(
            out,
            "Each index above is computed from the base metrics and their normalized scores."
        )
        .unwrap();
    } else {
        writeln!(
            out,
            "Normalized scores range from 0.25 (Critical) to 1.00 (Optimal)."
        )
        .unwrap();
    }
    out
}
