//! Configuration: the `.farmkpi.toml` file format, its discovery and
//! validation, and the resolved [`EngineConfig`] handed to the pipeline.

mod core;
pub mod engine;
pub mod loader;
pub mod validation;

pub use self::core::{AggregationConfig, FarmKpiConfig, OutputConfig};
pub use engine::EngineConfig;
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use validation::{validate_config, validate_config_result, ConfigIssue};

/// Starter configuration written by `farmkpi init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# farmkpi configuration
#
# Threshold overrides for base metrics. The interpretation must match the
# metric's built-in interpretation.
#
# [thresholds.eua]
# interpretation = "lower_is_better"
# optimal_max = 2.0
# acceptable_max = 3.0
# attention_max = 4.0

# Chart thresholds for composite indices (isa, iis, idt, igd).
#
# [composite_thresholds.igd]
# interpretation = "higher_is_better"
# optimal_min = 0.80
# acceptable_min = 0.65
# attention_min = 0.50

[aggregation]
# Score used for data analysis efficiency inside the technological index
data_analysis_score = 0.75

[status.standard]
excellent = 0.85
good = 0.70
regular = 0.50

[status.global]
excellent = 0.80
good = 0.65
regular = 0.50

[output]
# terminal, json or markdown
default_format = "terminal"
"#;
