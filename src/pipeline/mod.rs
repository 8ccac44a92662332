//! Pure evaluation pipeline.
//!
//! Metric histories flow one way: per-date classification, normalization,
//! aggregation, then composite classification. Nothing here performs I/O
//! or returns an error.

pub mod evaluate;
pub mod reconstruct;

pub use evaluate::{
    current_values, evaluate, CompositeReport, Evaluation, MetricStatus, COMPOSITE_UNIT,
};
pub use reconstruct::{reconstruct, CompositeHistories, CurrentScores, HistoryIndex, Snapshot};
