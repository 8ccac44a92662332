//! Merging imported points into metric histories.

use std::collections::BTreeMap;

use crate::core::{HistoryPoint, MetricSet};

use super::csv::{ImportBatch, RejectedRow};

/// What an import changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    /// Points merged per metric id
    pub merged: BTreeMap<String, usize>,
    pub rejected: Vec<RejectedRow>,
    /// Identifiers in the file that match no metric
    pub unmatched: Vec<String>,
}

impl ImportSummary {
    pub fn merged_count(&self) -> usize {
        self.merged.values().sum()
    }
}

/// Merge `imported` into `existing`.
///
/// Points sharing a date collapse to one, the later one winning, so an
/// import overrides stored values and later rows override earlier rows.
/// The result is sorted by date.
pub fn merge_history(existing: &[HistoryPoint], imported: &[HistoryPoint]) -> Vec<HistoryPoint> {
    let by_date: BTreeMap<_, _> = existing
        .iter()
        .chain(imported)
        .map(|point| (point.date, point.value))
        .collect();
    by_date
        .into_iter()
        .map(|(date, value)| HistoryPoint::new(date, value))
        .collect()
}

impl MetricSet {
    /// Merge a parsed import into the matching metrics.
    ///
    /// A metric that receives points takes the last merged point as its
    /// current value.
    pub fn apply_import(&mut self, batch: ImportBatch) -> ImportSummary {
        let mut summary = ImportSummary {
            rejected: batch.rejected,
            ..ImportSummary::default()
        };

        for (id, points) in batch.points {
            let Some(metric) = self.get_mut(&id) else {
                log::warn!("Ignoring {} imported point(s) for unknown metric '{}'", points.len(), id);
                summary.unmatched.push(id);
                continue;
            };

            metric.history = merge_history(&metric.history, &points);
            if let Some(last) = metric.history.last() {
                metric.current_value = Some(last.value);
            }
            summary.merged.insert(id, points.len());
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ids, seed_metric_set};
    use crate::import::parse_import;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn point(day: u32, value: f64) -> HistoryPoint {
        HistoryPoint::new(NaiveDate::from_ymd_opt(2024, 2, day).unwrap(), value)
    }

    #[test]
    fn test_import_wins_on_shared_dates() {
        let existing = vec![point(3, 1.0), point(1, 1.0)];
        let imported = vec![point(2, 2.0), point(3, 3.0)];
        assert_eq!(
            merge_history(&existing, &imported),
            vec![point(1, 1.0), point(2, 2.0), point(3, 3.0)]
        );
    }

    #[test]
    fn test_later_row_wins_within_an_import() {
        assert_eq!(
            merge_history(&[], &[point(1, 1.0), point(1, 5.0)]),
            vec![point(1, 5.0)]
        );
    }

    #[test]
    fn test_apply_import_updates_current_value_and_reports_unmatched() {
        let mut set = seed_metric_set().unwrap();
        let summary = set.apply_import(parse_import(
            "id,date,value\neua,2024-02-02,1.9\neua,2024-02-01,3.1\nxyz,2024-02-01,1\nper,bad,1\n",
        ));

        let eua = set.get(ids::WATER_USE_EFFICIENCY).unwrap();
        assert_eq!(eua.history, vec![point(1, 3.1), point(2, 1.9)]);
        assert_eq!(eua.current_value, Some(1.9));
        assert_eq!(summary.merged_count(), 2);
        assert_eq!(summary.unmatched, vec!["xyz".to_string()]);
        assert_eq!(summary.rejected.len(), 1);
        // untouched metric keeps its seed value
        assert_eq!(set.get(ids::RENEWABLE_ENERGY).unwrap().current_value, Some(85.0));
    }
}
