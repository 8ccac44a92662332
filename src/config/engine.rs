//! Resolved engine settings built from a validated [`FarmKpiConfig`].

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::catalog::default_composite_thresholds;
use crate::core::{CompositeKind, Error, Interpretation, Result, Thresholds};
use crate::scoring::{CompositeStatusConfig, FormulaSet};

use super::validation::validate_config_result;
use super::FarmKpiConfig;

/// Everything the evaluation pipeline needs besides the metrics themselves
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub formulas: FormulaSet,
    pub status: CompositeStatusConfig,
    composite_thresholds: BTreeMap<CompositeKind, Thresholds>,
    metric_overrides: BTreeMap<String, Thresholds>,
}

impl EngineConfig {
    pub fn from_config(config: &FarmKpiConfig) -> Result<Self> {
        validate_config_result(config)?;

        let composite_thresholds = config
            .composite_thresholds
            .iter()
            .map(|(id, thresholds)| {
                CompositeKind::from_str(id)
                    .map(|kind| (kind, *thresholds))
                    .map_err(|_| Error::unknown_id(id.clone()))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self {
            formulas: FormulaSet::standard(config.aggregation.data_analysis_score)?,
            status: config.status,
            composite_thresholds,
            metric_overrides: config.thresholds.clone(),
        })
    }

    /// Chart thresholds of a composite, the override if one is set.
    pub fn composite_thresholds(&self, kind: CompositeKind) -> Thresholds {
        self.composite_thresholds
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_composite_thresholds(kind))
    }

    pub fn set_composite_thresholds(
        &mut self,
        kind: CompositeKind,
        thresholds: Thresholds,
    ) -> Result<()> {
        thresholds
            .validate()
            .map_err(|e| Error::config_with_field(e, kind.id()))?;
        if thresholds.interpretation() != Interpretation::HigherIsBetter {
            return Err(Error::mode_mismatch(
                kind.id(),
                Interpretation::HigherIsBetter.as_str(),
                thresholds.interpretation().as_str(),
            ));
        }
        self.composite_thresholds.insert(kind, thresholds);
        Ok(())
    }

    /// Metric threshold overrides from the configuration file
    pub fn metric_overrides(&self) -> &BTreeMap<String, Thresholds> {
        &self.metric_overrides
    }
}
