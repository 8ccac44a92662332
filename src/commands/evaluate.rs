use crate::filter::DateRange;
use crate::formatting::ColorMode;
use crate::io::{create_writer, OutputFormat};
use crate::pipeline::evaluate;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::{load_engine, load_metrics};

pub struct EvaluateConfig {
    pub data: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub plain: bool,
}

pub fn handle_evaluate(config: EvaluateConfig) -> Result<()> {
    let (file_config, engine) = load_engine(config.config.as_deref())?;

    let format = match config.format {
        Some(format) => format,
        None => file_config
            .default_format()
            .map(str::parse::<OutputFormat>)
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("Invalid output.default_format")?
            .unwrap_or_default(),
    };

    let range = DateRange::new(config.from, config.to);
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            anyhow::bail!("--from {} is after --to {}", from, to);
        }
    }

    let metrics = range.apply(&load_metrics(&config.data, &engine)?);
    let evaluation = evaluate(&metrics, &engine);

    let color_mode = ColorMode::from_env(config.plain || config.output.is_some());
    color_mode.apply();
    let use_color = color_mode.should_use_color();

    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut sink = BufWriter::new(file);
            create_writer(format, Box::new(&mut sink), use_color).write_evaluation(&evaluation)?;
            sink.flush()?;
            log::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut sink = stdout.lock();
            create_writer(format, Box::new(&mut sink), use_color).write_evaluation(&evaluation)?;
            sink.flush()?;
        }
    }
    Ok(())
}
