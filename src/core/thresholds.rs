//! Threshold sets for base metrics and composite indices.
//!
//! The interpretation mode is the enum discriminant, so a threshold set can
//! never disagree with the direction it is read in. An unknown
//! `interpretation` tag is rejected by serde when the configuration is
//! loaded, long before anything is evaluated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a raw metric value maps onto "better" and "worse".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    HigherIsBetter,
    LowerIsBetter,
    Percentage,
}

impl Interpretation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interpretation::HigherIsBetter => "higher_is_better",
            Interpretation::LowerIsBetter => "lower_is_better",
            Interpretation::Percentage => "percentage",
        }
    }

    /// Short phrase used in explanations
    pub fn direction_hint(&self) -> &'static str {
        match self {
            Interpretation::HigherIsBetter => "a higher value is better",
            Interpretation::LowerIsBetter => "a lower value is better",
            Interpretation::Percentage => "compliance percentage, 100% is the target",
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Up to three cut points, named after the interpretation they belong to.
///
/// Absent cut points are open bounds; the classifier decides what "open"
/// means for each tier and direction. A cut point named for another mode,
/// or misspelled, is a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "interpretation", rename_all = "snake_case", deny_unknown_fields)]
pub enum Thresholds {
    HigherIsBetter {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        optimal_min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        acceptable_min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attention_min: Option<f64>,
    },
    LowerIsBetter {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        optimal_max: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        acceptable_max: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attention_max: Option<f64>,
    },
    Percentage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        optimal_percentage: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        acceptable_percentage: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attention_percentage: Option<f64>,
    },
}

impl Thresholds {
    pub fn higher_is_better(optimal: f64, acceptable: f64, attention: f64) -> Self {
        Thresholds::HigherIsBetter {
            optimal_min: Some(optimal),
            acceptable_min: Some(acceptable),
            attention_min: Some(attention),
        }
    }

    pub fn lower_is_better(optimal: f64, acceptable: f64, attention: f64) -> Self {
        Thresholds::LowerIsBetter {
            optimal_max: Some(optimal),
            acceptable_max: Some(acceptable),
            attention_max: Some(attention),
        }
    }

    pub fn percentage(optimal: f64, acceptable: f64, attention: f64) -> Self {
        Thresholds::Percentage {
            optimal_percentage: Some(optimal),
            acceptable_percentage: Some(acceptable),
            attention_percentage: Some(attention),
        }
    }

    pub fn interpretation(&self) -> Interpretation {
        match self {
            Thresholds::HigherIsBetter { .. } => Interpretation::HigherIsBetter,
            Thresholds::LowerIsBetter { .. } => Interpretation::LowerIsBetter,
            Thresholds::Percentage { .. } => Interpretation::Percentage,
        }
    }

    /// Cut points in tier order: optimal, acceptable, attention.
    pub fn cut_points(&self) -> [Option<f64>; 3] {
        match *self {
            Thresholds::HigherIsBetter {
                optimal_min,
                acceptable_min,
                attention_min,
            } => [optimal_min, acceptable_min, attention_min],
            Thresholds::LowerIsBetter {
                optimal_max,
                acceptable_max,
                attention_max,
            } => [optimal_max, acceptable_max, attention_max],
            Thresholds::Percentage {
                optimal_percentage,
                acceptable_percentage,
                attention_percentage,
            } => [optimal_percentage, acceptable_percentage, attention_percentage],
        }
    }

    /// Validate the set at construction time. Cut points must be finite.
    /// Ordering problems are reported separately by [`Thresholds::ordering_warning`]
    /// because they still classify deterministically.
    pub fn validate(&self) -> Result<(), String> {
        let names = self.field_names();
        let errors: Vec<String> = self
            .cut_points()
            .iter()
            .zip(names)
            .filter_map(|(value, name)| match value {
                Some(v) if !v.is_finite() => Some(format!("{} must be a finite number", name)),
                _ => None,
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join(", "))
        }
    }

    /// Returns a message when the present cut points are not ordered from
    /// best to worst for their direction.
    pub fn ordering_warning(&self) -> Option<String> {
        let present: Vec<f64> = self.cut_points().iter().flatten().copied().collect();
        let ordered = match self.interpretation() {
            Interpretation::LowerIsBetter => present.windows(2).all(|w| w[0] <= w[1]),
            _ => present.windows(2).all(|w| w[0] >= w[1]),
        };
        (!ordered).then(|| {
            format!(
                "{} cut points are not ordered from best to worst: {:?}",
                self.interpretation(),
                present
            )
        })
    }

    pub fn field_names(&self) -> [&'static str; 3] {
        match self {
            Thresholds::HigherIsBetter { .. } => ["optimal_min", "acceptable_min", "attention_min"],
            Thresholds::LowerIsBetter { .. } => ["optimal_max", "acceptable_max", "attention_max"],
            Thresholds::Percentage { .. } => [
                "optimal_percentage",
                "acceptable_percentage",
                "attention_percentage",
            ],
        }
    }
}
