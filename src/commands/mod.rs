pub mod evaluate;
pub mod explain;
pub mod init;

use crate::catalog::seed_metric_set;
use crate::config::{load_config, EngineConfig, FarmKpiConfig};
use crate::core::MetricSet;
use crate::import::{read_import, ImportSummary};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load the effective configuration and resolve it for the engine.
pub(crate) fn load_engine(config_path: Option<&Path>) -> Result<(FarmKpiConfig, EngineConfig)> {
    let config = load_config(config_path).context("Failed to load configuration")?;
    let engine = EngineConfig::from_config(&config).context("Invalid configuration")?;
    Ok((config, engine))
}

/// Seed catalog, plus every import file in order, plus threshold overrides.
pub(crate) fn load_metrics(data: &[PathBuf], engine: &EngineConfig) -> Result<MetricSet> {
    let mut metrics = seed_metric_set().context("Built-in metric catalog is invalid")?;

    for path in data {
        let batch = read_import(path)
            .with_context(|| format!("Failed to read import file {}", path.display()))?;
        let summary = metrics.apply_import(batch);
        report_import(path, &summary);
    }

    metrics
        .apply_overrides(engine.metric_overrides())
        .context("Invalid threshold overrides")?;
    Ok(metrics)
}

fn report_import(path: &Path, summary: &ImportSummary) {
    log::info!(
        "Imported {}: {} point(s) into {} metric(s)",
        path.display(),
        summary.merged_count(),
        summary.merged.len()
    );
    eprintln!(
        "{}: {} point(s) merged, {} row(s) rejected",
        path.display(),
        summary.merged_count(),
        summary.rejected.len()
    );
    for row in &summary.rejected {
        eprintln!("  rejected {}", row);
    }
    if !summary.unmatched.is_empty() {
        eprintln!("  unknown identifiers: {}", summary.unmatched.join(", "));
    }
}
