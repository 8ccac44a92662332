//! Common type definitions used across the engine

use super::thresholds::{Interpretation, Thresholds};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One dated reading in a metric's history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl HistoryPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Presentation grouping of base metrics; never used in computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Environmental,
    Social,
    Technological,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Environmental => "Environmental",
            Category::Social => "Social",
            Category::Technological => "Technological & operational",
        }
    }
}

/// A base KPI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    pub category: Category,
    /// Latest reading; `None` when the value is unavailable
    pub current_value: Option<f64>,
    /// Dated readings, in no particular order
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
    pub thresholds: Thresholds,
}

impl Metric {
    pub fn interpretation(&self) -> Interpretation {
        self.thresholds.interpretation()
    }
}

/// The closed set of composite indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompositeKind {
    #[serde(rename = "isa")]
    Environmental,
    #[serde(rename = "iis")]
    Social,
    #[serde(rename = "idt")]
    Technological,
    #[serde(rename = "igd")]
    Global,
}

impl CompositeKind {
    /// Evaluation order: every first-stage index before the global one
    pub const ALL: [CompositeKind; 4] = [
        CompositeKind::Environmental,
        CompositeKind::Social,
        CompositeKind::Technological,
        CompositeKind::Global,
    ];

    pub const FIRST_STAGE: [CompositeKind; 3] = [
        CompositeKind::Environmental,
        CompositeKind::Social,
        CompositeKind::Technological,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            CompositeKind::Environmental => "isa",
            CompositeKind::Social => "iis",
            CompositeKind::Technological => "idt",
            CompositeKind::Global => "igd",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CompositeKind::Environmental => "Environmental Sustainability Index (ISA)",
            CompositeKind::Social => "Social Impact Index (IIS)",
            CompositeKind::Technological => "Technological Development Index (IDT)",
            CompositeKind::Global => "Global Performance Index (IGD)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CompositeKind::Environmental => {
                "Combines the KPIs tied to the direct environmental impact of operations."
            }
            CompositeKind::Social => {
                "Combines the indicators of the social benefit the farm brings to its community."
            }
            CompositeKind::Technological => {
                "Rates the adoption, effectiveness and upkeep of smart-farming technology."
            }
            CompositeKind::Global => {
                "Combines ISA, IIS and IDT into one consolidated view of overall performance."
            }
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, CompositeKind::Global)
    }
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CompositeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "isa" | "environmental" => Ok(CompositeKind::Environmental),
            "iis" | "social" => Ok(CompositeKind::Social),
            "idt" | "technological" => Ok(CompositeKind::Technological),
            "igd" | "global" => Ok(CompositeKind::Global),
            other => Err(format!("unknown composite index '{}'", other)),
        }
    }
}

/// Reference to either a base metric or a composite index.
///
/// Built once at the edge from a user-supplied identifier so the rest of
/// the code dispatches on the variant instead of probing record shapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ItemRef {
    Metric(String),
    Composite(CompositeKind),
}

impl ItemRef {
    /// Resolve an identifier against the composite set first, then the
    /// given metric ids.
    pub fn resolve<'a>(id: &str, mut metric_ids: impl Iterator<Item = &'a str>) -> Option<Self> {
        if let Ok(kind) = id.parse::<CompositeKind>() {
            return Some(ItemRef::Composite(kind));
        }
        metric_ids
            .find(|candidate| *candidate == id)
            .map(|found| ItemRef::Metric(found.to_string()))
    }

    pub fn id(&self) -> &str {
        match self {
            ItemRef::Metric(id) => id,
            ItemRef::Composite(kind) => kind.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_kind_round_trips_through_id() {
        for kind in CompositeKind::ALL {
            assert_eq!(kind.id().parse::<CompositeKind>().unwrap(), kind);
        }
        assert_eq!(
            serde_json::to_string(&CompositeKind::Global).unwrap(),
            "\"igd\""
        );
    }

    #[test]
    fn test_item_ref_resolution() {
        let ids = ["eua", "per"];
        assert_eq!(
            ItemRef::resolve("igd", ids.iter().copied()),
            Some(ItemRef::Composite(CompositeKind::Global))
        );
        assert_eq!(
            ItemRef::resolve("per", ids.iter().copied()),
            Some(ItemRef::Metric("per".into()))
        );
        assert_eq!(ItemRef::resolve("nope", ids.iter().copied()), None);
    }
}
