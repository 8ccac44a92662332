//! Bulk history import and merge

pub mod csv;
pub mod merge;

pub use csv::{parse_import, read_import, ImportBatch, RejectReason, RejectedRow};
pub use merge::{merge_history, ImportSummary};
