// Export modules for library usage
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod explain;
pub mod filter;
pub mod formatting;
pub mod import;
pub mod io;
pub mod pipeline;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    Category, CompositeKind, CompositeTier, Error, ErrorCode, HistoryPoint, Interpretation,
    ItemRef, Metric, MetricSet, Result, StatusColor, Thresholds, Tier,
};

pub use crate::scoring::{
    aggregate, classify, classify_composite, normalize, normalize_value, round2,
    CompositeStatusConfig, CompositeValues, Formula, FormulaSet, Input, ScoreSource, StatusScale,
    Term,
};

pub use crate::pipeline::{
    evaluate, reconstruct, CompositeHistories, CompositeReport, Evaluation, MetricStatus,
};

pub use crate::config::{EngineConfig, FarmKpiConfig};

pub use crate::filter::DateRange;

pub use crate::import::{merge_history, parse_import, ImportBatch, ImportSummary};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
