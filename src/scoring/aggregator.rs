//! Weighted composite formulas
//!
//! Each composite index is a fixed weighted sum. First-stage indices read
//! normalized metric scores (or a fixed score); the global index reads the
//! already computed first-stage values. Any unavailable input makes the
//! whole sum unavailable.

use crate::core::{CompositeKind, Error, Result};
use serde::{Deserialize, Serialize};

/// Tolerance used when checking that weights add up to one
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Score used for the data-analysis-efficiency term of the technological
/// index until a real metric feeds it
pub const DEFAULT_DATA_ANALYSIS_SCORE: f64 = 0.75;

/// Where a formula term gets its value from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Input {
    /// Normalized score of a base metric
    Metric { id: String },
    /// A constant score standing in for a metric that is not measured
    Fixed { label: String, score: f64 },
    /// Value of another composite index
    Composite { index: CompositeKind },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub weight: f64,
    pub input: Input,
}

impl Term {
    pub fn metric(weight: f64, id: &str) -> Self {
        Self {
            weight,
            input: Input::Metric { id: id.to_string() },
        }
    }

    pub fn fixed(weight: f64, label: &str, score: f64) -> Self {
        Self {
            weight,
            input: Input::Fixed {
                label: label.to_string(),
                score,
            },
        }
    }

    pub fn composite(weight: f64, index: CompositeKind) -> Self {
        Self {
            weight,
            input: Input::Composite { index },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub kind: CompositeKind,
    pub terms: Vec<Term>,
}

impl Formula {
    // Pure function: Check if a weight is in valid range
    fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    // Pure function: Collect every problem with this formula
    fn collect_validations(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for term in &self.terms {
            if !Self::is_valid_weight(term.weight) {
                errors.push(format!(
                    "{}: weight {} must be between 0.0 and 1.0",
                    self.kind, term.weight
                ));
            }
            match &term.input {
                Input::Fixed { label, score } if !(0.0..=1.0).contains(score) => {
                    errors.push(format!(
                        "{}: fixed score for {} must be between 0.0 and 1.0, got {}",
                        self.kind, label, score
                    ));
                }
                Input::Composite { index } if !self.kind.is_global() => {
                    errors.push(format!(
                        "{}: first-stage index cannot depend on composite {}",
                        self.kind, index
                    ));
                }
                Input::Composite { index } if index.is_global() => {
                    errors.push(format!("{}: global index cannot depend on itself", self.kind));
                }
                Input::Metric { id } if self.kind.is_global() => {
                    errors.push(format!(
                        "{}: global index reads composite values, not metric '{}'",
                        self.kind, id
                    ));
                }
                _ => {}
            }
        }

        let sum: f64 = self.terms.iter().map(|t| t.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            errors.push(format!(
                "{}: weights must sum to 1.0, but sum to {:.3}",
                self.kind, sum
            ));
        }

        errors
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        let errors = self.collect_validations();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }

    /// Metric ids this formula reads
    pub fn metric_ids(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().filter_map(|term| match &term.input {
            Input::Metric { id } => Some(id.as_str()),
            _ => None,
        })
    }
}

/// Round to two decimals; applied after every aggregation stage.
///
/// Rounds the exact decimal value of the binary sum, so `0.9249999999999999`
/// becomes `0.92`. The only exact ties at the third decimal are odd
/// multiples of 1/8 (`0.125`, `0.625`, ...) and those round away from zero.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return (value * 100.0).round() / 100.0;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Weighted sum of a formula's inputs, rounded to two decimals.
///
/// Returns `None` as soon as any input resolves to `None`.
pub fn aggregate(formula: &Formula, resolve: impl Fn(&Input) -> Option<f64>) -> Option<f64> {
    formula
        .terms
        .iter()
        .try_fold(0.0, |acc, term| {
            resolve(&term.input).map(|value| acc + term.weight * value)
        })
        .map(round2)
}

/// Source of normalized metric scores for one point in time
pub trait ScoreSource {
    /// Normalized score of `metric_id`, `None` if the metric is unknown or
    /// has no reading.
    fn score(&self, metric_id: &str) -> Option<f64>;
}

/// Value of every composite index at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeValues {
    pub environmental: Option<f64>,
    pub social: Option<f64>,
    pub technological: Option<f64>,
    pub global: Option<f64>,
}

impl CompositeValues {
    pub fn get(&self, kind: CompositeKind) -> Option<f64> {
        match kind {
            CompositeKind::Environmental => self.environmental,
            CompositeKind::Social => self.social,
            CompositeKind::Technological => self.technological,
            CompositeKind::Global => self.global,
        }
    }

    pub fn set(&mut self, kind: CompositeKind, value: Option<f64>) {
        match kind {
            CompositeKind::Environmental => self.environmental = value,
            CompositeKind::Social => self.social = value,
            CompositeKind::Technological => self.technological = value,
            CompositeKind::Global => self.global = value,
        }
    }
}

/// The complete, validated set of composite formulas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaSet {
    formulas: Vec<Formula>,
}

impl FormulaSet {
    /// Build a set with exactly one formula per composite index.
    pub fn new(formulas: Vec<Formula>) -> Result<Self> {
        let mut errors: Vec<String> = Vec::new();

        for kind in CompositeKind::ALL {
            match formulas.iter().filter(|f| f.kind == kind).count() {
                1 => {}
                0 => errors.push(format!("missing formula for {}", kind)),
                n => errors.push(format!("{} formulas given for {}", n, kind)),
            }
        }
        errors.extend(formulas.iter().flat_map(Formula::collect_validations));

        if !errors.is_empty() {
            return Err(Error::validations(errors));
        }

        // Store in evaluation order so global comes after its inputs
        let mut ordered = formulas;
        ordered.sort_by_key(|f| f.kind);
        Ok(Self { formulas: ordered })
    }

    /// Built-in formulas with the given data-analysis placeholder score.
    pub fn standard(data_analysis_score: f64) -> Result<Self> {
        use crate::catalog::ids;

        Self::new(vec![
            Formula {
                kind: CompositeKind::Environmental,
                terms: vec![
                    Term::metric(0.4, ids::WATER_USE_EFFICIENCY),
                    Term::metric(0.3, ids::RENEWABLE_ENERGY),
                    Term::metric(0.3, ids::WASTE_RECYCLING),
                ],
            },
            Formula {
                kind: CompositeKind::Social,
                terms: vec![
                    Term::metric(0.5, ids::LOCAL_FOOD_ACCESS),
                    Term::metric(0.3, ids::COMMUNITY_PARTICIPATION),
                    Term::metric(0.2, ids::FOOD_SAFETY),
                ],
            },
            Formula {
                kind: CompositeKind::Technological,
                terms: vec![
                    Term::metric(0.4, ids::SMART_TECH_INVESTMENT),
                    Term::metric(0.3, ids::MONITORING_EFFICIENCY),
                    Term::fixed(0.3, ids::DATA_ANALYSIS_EFFICIENCY, data_analysis_score),
                ],
            },
            Formula {
                kind: CompositeKind::Global,
                terms: vec![
                    Term::composite(0.35, CompositeKind::Environmental),
                    Term::composite(0.35, CompositeKind::Social),
                    Term::composite(0.30, CompositeKind::Technological),
                ],
            },
        ])
    }

    pub fn formula(&self, kind: CompositeKind) -> &Formula {
        // `new` guarantees one formula per kind, sorted in `CompositeKind::ALL` order
        &self.formulas[kind as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.formulas.iter()
    }

    /// Metric ids referenced by any formula but absent from `known`.
    pub fn missing_metrics<'a>(&'a self, known: &[&str]) -> Vec<&'a str> {
        let mut missing: Vec<&str> = self
            .formulas
            .iter()
            .flat_map(Formula::metric_ids)
            .filter(|id| !known.contains(id))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Evaluate every index in dependency order.
    pub fn evaluate(&self, scores: &impl ScoreSource) -> CompositeValues {
        let mut values = CompositeValues::default();
        for formula in &self.formulas {
            let value = aggregate(formula, |input| match input {
                Input::Metric { id } => scores.score(id),
                Input::Fixed { score, .. } => Some(*score),
                Input::Composite { index } => values.get(*index),
            });
            values.set(formula.kind, value);
        }
        values
    }
}
