//! The single owner of the metric collection.
//!
//! Every mutation (threshold edit, bulk import) goes through here; derived
//! composites are recomputed from scratch afterwards.

use super::errors::{Error, Result};
use super::thresholds::Thresholds;
use super::types::Metric;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSet {
    metrics: Vec<Metric>,
}

impl MetricSet {
    /// Build a set, rejecting duplicate ids and malformed thresholds.
    pub fn new(metrics: Vec<Metric>) -> Result<Self> {
        let mut seen = HashSet::new();
        let errors: Vec<String> = metrics
            .iter()
            .filter_map(|metric| {
                if !seen.insert(metric.id.as_str()) {
                    return Some(format!("duplicate metric id '{}'", metric.id));
                }
                metric
                    .thresholds
                    .validate()
                    .err()
                    .map(|e| format!("{}: {}", metric.id, e))
            })
            .collect();

        if !errors.is_empty() {
            return Err(Error::validations(errors));
        }

        for metric in &metrics {
            if let Some(warning) = metric.thresholds.ordering_warning() {
                log::warn!("{}: {}", metric.id, warning);
            }
        }

        Ok(Self { metrics })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }

    pub fn as_slice(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Metric> {
        self.metrics.iter_mut().find(|m| m.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|m| m.id.as_str())
    }

    /// Apply `f` to every metric, producing a new set with the same ids.
    pub fn map_metrics(&self, f: impl Fn(&Metric) -> Metric) -> Self {
        Self {
            metrics: self.metrics.iter().map(f).collect(),
        }
    }

    // Pure function: Check a replacement against the metric it targets
    fn check_thresholds(&self, id: &str, thresholds: &Thresholds) -> Result<()> {
        thresholds
            .validate()
            .map_err(|e| Error::config_with_field(e, id))?;

        let metric = self.get(id).ok_or_else(|| Error::unknown_id(id))?;
        let expected = metric.interpretation();
        let found = thresholds.interpretation();
        if expected != found {
            return Err(Error::mode_mismatch(id, expected.as_str(), found.as_str()));
        }
        Ok(())
    }

    // Caller has already checked the replacement
    fn replace_thresholds(&mut self, id: &str, thresholds: Thresholds) {
        if let Some(warning) = thresholds.ordering_warning() {
            log::warn!("{}: {}", id, warning);
        }
        if let Some(metric) = self.get_mut(id) {
            metric.thresholds = thresholds;
        }
    }

    /// Replace one metric's thresholds. The new set must keep the metric's
    /// interpretation mode.
    pub fn set_thresholds(&mut self, id: &str, thresholds: Thresholds) -> Result<()> {
        self.check_thresholds(id, &thresholds)?;
        self.replace_thresholds(id, thresholds);
        Ok(())
    }

    /// Merge a user override table on top of the current thresholds.
    ///
    /// Overrides naming a metric that is not in the set are skipped with a
    /// warning. Every other problem is collected and returned together, and
    /// the set is only modified when there are none.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, Thresholds>) -> Result<()> {
        let known: Vec<(&String, &Thresholds)> = overrides
            .iter()
            .filter(|(id, _)| {
                let found = self.get(id).is_some();
                if !found {
                    log::warn!("Ignoring threshold override for unknown metric '{}'", id);
                }
                found
            })
            .collect();

        let errors: Vec<String> = known
            .iter()
            .filter_map(|(id, thresholds)| self.check_thresholds(id, thresholds).err())
            .map(|e| e.to_string())
            .collect();
        if !errors.is_empty() {
            return Err(Error::validations(errors));
        }

        for (id, thresholds) in known {
            self.replace_thresholds(id, *thresholds);
        }
        Ok(())
    }
}
