//! Domain types shared by every stage of the engine

pub mod errors;
pub mod metric_set;
pub mod thresholds;
pub mod tier;
pub mod types;

pub use errors::{Error, ErrorCode, Result};
pub use metric_set::MetricSet;
pub use thresholds::{Interpretation, Thresholds};
pub use tier::{CompositeTier, StatusColor, Tier};
pub use types::{Category, CompositeKind, HistoryPoint, ItemRef, Metric};
