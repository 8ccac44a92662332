//! Date-range filtering of metric histories, applied before evaluation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{Metric, MetricSet};

/// Inclusive date window; an open end admits everything on that side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Copy of `metric` keeping only history points inside the range
    pub fn filter_metric(&self, metric: &Metric) -> Metric {
        Metric {
            history: metric
                .history
                .iter()
                .filter(|point| self.contains(point.date))
                .copied()
                .collect(),
            ..metric.clone()
        }
    }

    pub fn apply(&self, metrics: &MetricSet) -> MetricSet {
        if self.is_unbounded() {
            return metrics.clone();
        }
        metrics.map_metrics(|metric| self.filter_metric(metric))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ids, seed_metric_set};
    use crate::core::HistoryPoint;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = DateRange::new(Some(date(2)), Some(date(4)));
        assert!(!range.contains(date(1)));
        assert!(range.contains(date(2)));
        assert!(range.contains(date(4)));
        assert!(!range.contains(date(5)));
        assert!(DateRange::default().contains(date(30)));
    }

    #[test]
    fn test_apply_filters_histories_only() {
        let set = seed_metric_set().unwrap().map_metrics(|m| {
            let mut m = m.clone();
            m.history = (1..=5).map(|d| HistoryPoint::new(date(d), 1.0)).collect();
            m
        });
        let filtered = DateRange::new(Some(date(4)), None).apply(&set);
        let eua = filtered.get(ids::WATER_USE_EFFICIENCY).unwrap();
        assert_eq!(eua.history.len(), 2);
        assert_eq!(eua.current_value, set.get(ids::WATER_USE_EFFICIENCY).unwrap().current_value);
    }
}
