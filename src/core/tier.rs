//! Status tiers for base metrics and composite indices
use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-level classification of a base metric's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Optimal,
    Acceptable,
    Attention,
    Critical,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::Optimal,
        Tier::Acceptable,
        Tier::Attention,
        Tier::Critical,
    ];

    /// Normalized score used by composite formulas
    pub fn score(&self) -> f64 {
        match self {
            Tier::Optimal => 1.0,
            Tier::Acceptable => 0.75,
            Tier::Attention => 0.5,
            Tier::Critical => 0.25,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Optimal => "Optimal",
            Tier::Acceptable => "Acceptable",
            Tier::Attention => "Needs attention",
            Tier::Critical => "Critical",
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            Tier::Optimal => StatusColor::Green,
            Tier::Acceptable => StatusColor::Yellow,
            Tier::Attention => StatusColor::Orange,
            Tier::Critical => StatusColor::Red,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display color tag attached to a metric card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl StatusColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Green => "green",
            StatusColor::Yellow => "yellow",
            StatusColor::Orange => "orange",
            StatusColor::Red => "red",
        }
    }
}

/// Four-level classification of a composite index's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompositeTier {
    Excellent,
    Good,
    Regular,
    Deficient,
}

impl CompositeTier {
    pub fn label(&self) -> &'static str {
        match self {
            CompositeTier::Excellent => "Excellent",
            CompositeTier::Good => "Good",
            CompositeTier::Regular => "Regular",
            CompositeTier::Deficient => "Deficient",
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            CompositeTier::Excellent => StatusColor::Green,
            CompositeTier::Good => StatusColor::Yellow,
            CompositeTier::Regular => StatusColor::Orange,
            CompositeTier::Deficient => StatusColor::Red,
        }
    }
}

impl fmt::Display for CompositeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
