use super::classifier::classify;
use crate::core::{Metric, Thresholds};

/// Normalized score of a reading, or `None` when the reading is unavailable.
///
/// A NaN reading counts as unavailable and never reaches the classifier.
pub fn normalize_value(value: Option<f64>, thresholds: &Thresholds) -> Option<f64> {
    value
        .filter(|v| !v.is_nan())
        .map(|v| classify(v, thresholds).score())
}

/// Normalized score of a metric's current value.
pub fn normalize(metric: &Metric) -> Option<f64> {
    normalize_value(metric.current_value, &metric.thresholds)
}
