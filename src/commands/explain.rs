use crate::core::ItemRef;
use crate::explain::explain;
use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{load_engine, load_metrics};

pub fn handle_explain(id: &str, data: &[PathBuf], config: Option<PathBuf>) -> Result<()> {
    let (_, engine) = load_engine(config.as_deref())?;
    let metrics = load_metrics(data, &engine)?;

    let item = ItemRef::resolve(id, metrics.ids())
        .with_context(|| format!("Unknown metric or index '{}'", id))?;
    let text = explain(&item, &metrics, &engine)
        .with_context(|| format!("Unknown metric or index '{}'", id))?;
    print!("{}", text);
    Ok(())
}
