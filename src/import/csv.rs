//! Line-oriented bulk import: a header row followed by `id,date,value` rows.
//!
//! Bad rows are rejected one at a time with a reason and never abort the
//! rest of the file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{Error, HistoryPoint, Result};

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    MissingFields,
    InvalidDate(String),
    InvalidValue(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingFields => f.write_str("expected id,date,value"),
            RejectReason::InvalidDate(date) => {
                write!(f, "invalid date '{}' (expected YYYY-MM-DD)", date)
            }
            RejectReason::InvalidValue(value) => {
                write!(f, "invalid value '{}' (expected a finite number)", value)
            }
        }
    }
}

/// A data row that was discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number in the input, header included
    pub line: usize,
    pub content: String,
    pub reason: RejectReason,
}

impl fmt::Display for RejectedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line, self.reason, self.content)
    }
}

/// Parsed import: accepted points grouped by identifier, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportBatch {
    pub points: BTreeMap<String, Vec<HistoryPoint>>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportBatch {
    pub fn accepted_count(&self) -> usize {
        self.points.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.rejected.is_empty()
    }
}

// Pure function: Strict calendar date, shape checked before parsing
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if !DATE_PATTERN.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

// Pure function: Finite numeric value
fn parse_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_row(line: &str) -> std::result::Result<(String, HistoryPoint), RejectReason> {
    let mut fields = line.split(',').map(str::trim);
    let (Some(id), Some(date), Some(value)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(RejectReason::MissingFields);
    };
    if id.is_empty() || date.is_empty() || value.is_empty() {
        return Err(RejectReason::MissingFields);
    }

    let date = parse_date(date).ok_or_else(|| RejectReason::InvalidDate(date.to_string()))?;
    let value = parse_value(value).ok_or_else(|| RejectReason::InvalidValue(value.to_string()))?;
    Ok((id.to_string(), HistoryPoint::new(date, value)))
}

/// Parse import text. The first line is a header and is ignored.
pub fn parse_import(text: &str) -> ImportBatch {
    let mut batch = ImportBatch::default();

    for (index, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Ok((id, point)) => batch.points.entry(id).or_default().push(point),
            Err(reason) => {
                log::warn!("Skipping import line {}: {}", index + 1, reason);
                batch.rejected.push(RejectedRow {
                    line: index + 1,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    log::debug!(
        "Parsed import: {} accepted, {} rejected",
        batch.accepted_count(),
        batch.rejected.len()
    );
    batch
}

/// Read and parse an import file.
pub fn read_import(path: &Path) -> Result<ImportBatch> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
    Ok(parse_import(&text))
}
