//! Validation with error accumulation for configuration.
//!
//! Every check runs, and all problems are reported together so a broken
//! `.farmkpi.toml` can be fixed in one pass.

use std::fmt;
use std::str::FromStr;

use stillwater::{NonEmptyVec, Validation};

use crate::core::{CompositeKind, Error, Interpretation, Result, Thresholds};

use super::FarmKpiConfig;

/// One configuration problem with the dotted path of the field it concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub type ConfigValidation<T> = Validation<T, NonEmptyVec<ConfigIssue>>;

// Pure function: Turn collected issues into a validation
fn from_issues(issues: Vec<ConfigIssue>) -> ConfigValidation<()> {
    match NonEmptyVec::from_vec(issues) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}

/// Validate the entire config, accumulating ALL issues.
pub fn validate_config(config: &FarmKpiConfig) -> ConfigValidation<()> {
    let mut issues = Vec::new();
    issues.extend(metric_threshold_issues(config));
    issues.extend(composite_threshold_issues(config));
    issues.extend(aggregation_issues(config));
    issues.extend(status_issues(config));
    from_issues(issues)
}

/// Fail-fast wrapper around [`validate_config`].
pub fn validate_config_result(config: &FarmKpiConfig) -> Result<()> {
    match validate_config(config) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(issues) => Err(Error::validations(
            issues.into_iter().map(|issue| issue.to_string()).collect(),
        )),
    }
}

fn threshold_issue(field: String, thresholds: &Thresholds) -> Option<ConfigIssue> {
    thresholds
        .validate()
        .err()
        .map(|message| ConfigIssue::new(field, message))
}

fn metric_threshold_issues(config: &FarmKpiConfig) -> Vec<ConfigIssue> {
    config
        .thresholds
        .iter()
        .filter_map(|(id, thresholds)| threshold_issue(format!("thresholds.{}", id), thresholds))
        .collect()
}

fn composite_threshold_issues(config: &FarmKpiConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    for (id, thresholds) in &config.composite_thresholds {
        let field = format!("composite_thresholds.{}", id);
        if CompositeKind::from_str(id).is_err() {
            issues.push(ConfigIssue::new(
                field,
                "unknown composite index (expected isa, iis, idt or igd)",
            ));
            continue;
        }
        if thresholds.interpretation() != Interpretation::HigherIsBetter {
            issues.push(ConfigIssue::new(
                field.clone(),
                format!(
                    "composite thresholds must be higher_is_better, got {}",
                    thresholds.interpretation()
                ),
            ));
        }
        issues.extend(threshold_issue(field, thresholds));
    }
    issues
}

fn aggregation_issues(config: &FarmKpiConfig) -> Vec<ConfigIssue> {
    let score = config.aggregation.data_analysis_score;
    if (0.0..=1.0).contains(&score) {
        Vec::new()
    } else {
        vec![ConfigIssue::new(
            "aggregation.data_analysis_score",
            format!("must be between 0.0 and 1.0, got {}", score),
        )]
    }
}

fn status_issues(config: &FarmKpiConfig) -> Vec<ConfigIssue> {
    [
        ("status.standard", &config.status.standard),
        ("status.global", &config.status.global),
    ]
    .into_iter()
    .filter_map(|(field, bands)| {
        bands
            .validate()
            .err()
            .map(|message| ConfigIssue::new(field, message))
    })
    .collect()
}
