//! Qualitative status of a composite index value
use crate::core::{CompositeKind, CompositeTier};
use serde::{Deserialize, Serialize};

/// Which band set a composite is judged against.
///
/// All three first-stage indices share the `Standard` bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusScale {
    Standard,
    Global,
}

impl From<CompositeKind> for StatusScale {
    fn from(kind: CompositeKind) -> Self {
        if kind.is_global() {
            StatusScale::Global
        } else {
            StatusScale::Standard
        }
    }
}

/// Lower bounds (inclusive) of the Excellent, Good and Regular bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusBands {
    pub excellent: f64,
    pub good: f64,
    pub regular: f64,
}

impl StatusBands {
    pub const STANDARD: StatusBands = StatusBands {
        excellent: 0.85,
        good: 0.70,
        regular: 0.50,
    };

    pub const GLOBAL: StatusBands = StatusBands {
        excellent: 0.80,
        good: 0.65,
        regular: 0.50,
    };

    pub fn validate(&self) -> Result<(), String> {
        let finite = [self.excellent, self.good, self.regular]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err("status bands must be finite numbers".to_string());
        }
        if self.excellent < self.good || self.good < self.regular {
            return Err(format!(
                "status bands must descend (excellent >= good >= regular), got {} / {} / {}",
                self.excellent, self.good, self.regular
            ));
        }
        Ok(())
    }

    /// First match wins, best band first. `None` is reported as Deficient.
    pub fn classify(&self, value: Option<f64>) -> CompositeTier {
        match value.filter(|v| !v.is_nan()) {
            None => CompositeTier::Deficient,
            Some(v) if v >= self.excellent => CompositeTier::Excellent,
            Some(v) if v >= self.good => CompositeTier::Good,
            Some(v) if v >= self.regular => CompositeTier::Regular,
            Some(_) => CompositeTier::Deficient,
        }
    }
}

/// Band sets for both scales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeStatusConfig {
    #[serde(default = "default_standard_bands")]
    pub standard: StatusBands,
    #[serde(default = "default_global_bands")]
    pub global: StatusBands,
}

impl Default for CompositeStatusConfig {
    fn default() -> Self {
        Self {
            standard: default_standard_bands(),
            global: default_global_bands(),
        }
    }
}

fn default_standard_bands() -> StatusBands {
    StatusBands::STANDARD
}

fn default_global_bands() -> StatusBands {
    StatusBands::GLOBAL
}

impl CompositeStatusConfig {
    pub fn bands(&self, scale: StatusScale) -> &StatusBands {
        match scale {
            StatusScale::Standard => &self.standard,
            StatusScale::Global => &self.global,
        }
    }

    pub fn classify(&self, value: Option<f64>, scale: StatusScale) -> CompositeTier {
        self.bands(scale).classify(value)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.standard
            .validate()
            .map_err(|e| format!("status.standard: {}", e))?;
        self.global
            .validate()
            .map_err(|e| format!("status.global: {}", e))
    }
}

/// Classify with the built-in bands.
pub fn classify_composite(value: Option<f64>, scale: StatusScale) -> CompositeTier {
    CompositeStatusConfig::default().classify(value, scale)
}
