use crate::core::Thresholds;
use crate::scoring::{CompositeStatusConfig, DEFAULT_DATA_ANALYSIS_SCORE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration structure, as read from `.farmkpi.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FarmKpiConfig {
    /// Metric threshold overrides keyed by metric id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub thresholds: BTreeMap<String, Thresholds>,

    /// Chart thresholds for composite indices keyed by index id (isa, iis, idt, igd)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub composite_thresholds: BTreeMap<String, Thresholds>,

    /// Aggregation settings
    #[serde(default)]
    pub aggregation: AggregationConfig,

    /// Composite status bands
    #[serde(default)]
    pub status: CompositeStatusConfig,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AggregationConfig {
    /// Score used for the data-analysis-efficiency term of the
    /// technological index
    #[serde(default = "default_data_analysis_score")]
    pub data_analysis_score: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            data_analysis_score: default_data_analysis_score(),
        }
    }
}

fn default_data_analysis_score() -> f64 {
    DEFAULT_DATA_ANALYSIS_SCORE
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    pub default_format: Option<String>,
}

impl FarmKpiConfig {
    pub fn default_format(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|output| output.default_format.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FarmKpiConfig = toml::from_str("").unwrap();
        assert_eq!(config, FarmKpiConfig::default());
        assert_eq!(config.aggregation.data_analysis_score, 0.75);
        assert_eq!(config.status, CompositeStatusConfig::default());
    }

    #[test]
    fn test_full_config_parses() {
        let config: FarmKpiConfig = toml::from_str(indoc! {r#"
            [thresholds.eua]
            interpretation = "lower_is_better"
            optimal_max = 1.5
            acceptable_max = 2.5
            attention_max = 3.5

            [composite_thresholds.igd]
            interpretation = "higher_is_better"
            optimal_min = 0.9

            [aggregation]
            data_analysis_score = 0.5

            [status.global]
            excellent = 0.9
            good = 0.7
            regular = 0.4

            [output]
            default_format = "json"
        "#})
        .unwrap();

        assert_eq!(
            config.thresholds["eua"],
            Thresholds::lower_is_better(1.5, 2.5, 3.5)
        );
        assert!(config.composite_thresholds.contains_key("igd"));
        assert_eq!(config.aggregation.data_analysis_score, 0.5);
        assert_eq!(config.status.global.excellent, 0.9);
        assert_eq!(config.status.standard.excellent, 0.85);
        assert_eq!(config.default_format(), Some("json"));
    }
}
