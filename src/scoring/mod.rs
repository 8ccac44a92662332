//! Metric classification, normalization and composite aggregation

pub mod aggregator;
pub mod classifier;
pub mod composite_status;
pub mod normalizer;

pub use aggregator::{
    aggregate, round2, CompositeValues, Formula, FormulaSet, Input, ScoreSource, Term,
    DEFAULT_DATA_ANALYSIS_SCORE,
};
pub use classifier::classify;
pub use composite_status::{classify_composite, CompositeStatusConfig, StatusBands, StatusScale};
pub use normalizer::{normalize, normalize_value};
