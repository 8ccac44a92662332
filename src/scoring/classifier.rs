//! Pure tier classification of a raw metric value.
//!
//! Cut points are checked best tier first and the first match wins. Every
//! boundary is inclusive on the better side.
//!
//! Absent cut points fall back to engine defaults that differ by direction:
//!
//! | mode               | optimal   | acceptable | attention |
//! |--------------------|-----------|------------|-----------|
//! | `higher_is_better` | `+inf`    | `-inf`     | `-inf`    |
//! | `lower_is_better`  | `-inf`    | `+inf`     | `+inf`    |
//! | `percentage`       | `100`     | `0`        | `0`       |
//!
//! A missing optimal bound therefore makes `Optimal` unreachable in every
//! mode except `percentage`, and a missing acceptable bound makes
//! everything below optimal `Acceptable`.
use crate::core::{Thresholds, Tier};

/// Engine defaults for percentage thresholds
pub const DEFAULT_OPTIMAL_PERCENTAGE: f64 = 100.0;
pub const DEFAULT_ACCEPTABLE_PERCENTAGE: f64 = 0.0;
pub const DEFAULT_ATTENTION_PERCENTAGE: f64 = 0.0;

/// Classify `value` against `thresholds`.
///
/// `value` is expected to be a real reading; NaN compares false against
/// every bound and lands in `Critical`. Callers filter unavailable values
/// before getting here (see [`super::normalizer`]).
pub fn classify(value: f64, thresholds: &Thresholds) -> Tier {
    match *thresholds {
        Thresholds::HigherIsBetter {
            optimal_min,
            acceptable_min,
            attention_min,
        } => classify_ascending(
            value,
            optimal_min.unwrap_or(f64::INFINITY),
            acceptable_min.unwrap_or(f64::NEG_INFINITY),
            attention_min.unwrap_or(f64::NEG_INFINITY),
        ),
        Thresholds::LowerIsBetter {
            optimal_max,
            acceptable_max,
            attention_max,
        } => classify_descending(
            value,
            optimal_max.unwrap_or(f64::NEG_INFINITY),
            acceptable_max.unwrap_or(f64::INFINITY),
            attention_max.unwrap_or(f64::INFINITY),
        ),
        Thresholds::Percentage {
            optimal_percentage,
            acceptable_percentage,
            attention_percentage,
        } => classify_ascending(
            value,
            optimal_percentage.unwrap_or(DEFAULT_OPTIMAL_PERCENTAGE),
            acceptable_percentage.unwrap_or(DEFAULT_ACCEPTABLE_PERCENTAGE),
            attention_percentage.unwrap_or(DEFAULT_ATTENTION_PERCENTAGE),
        ),
    }
}

fn classify_ascending(value: f64, optimal: f64, acceptable: f64, attention: f64) -> Tier {
    if value >= optimal {
        Tier::Optimal
    } else if value >= acceptable {
        Tier::Acceptable
    } else if value >= attention {
        Tier::Attention
    } else {
        Tier::Critical
    }
}

fn classify_descending(value: f64, optimal: f64, acceptable: f64, attention: f64) -> Tier {
    if value <= optimal {
        Tier::Optimal
    } else if value <= acceptable {
        Tier::Acceptable
    } else if value <= attention {
        Tier::Attention
    } else {
        Tier::Critical
    }
}
