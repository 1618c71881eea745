//! Analysis settings: observation period and display unit.

use serde::{Deserialize, Serialize};

use crate::error::{ReliaError, Result};

/// Display unit for time-denominated metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    #[default]
    Hours,
}

impl TimeUnit {
    /// Conversion factor applied to minute-denominated sums.
    pub fn factor(&self) -> f64 {
        match self {
            TimeUnit::Minutes => 1.0,
            TimeUnit::Hours => 60.0,
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Minutes => "Minutes",
            TimeUnit::Hours => "Hours",
        }
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minutes" | "min" | "m" => Ok(TimeUnit::Minutes),
            "hours" | "hr" | "h" => Ok(TimeUnit::Hours),
            _ => Err(format!("Unknown unit: {}. Use minutes or hours.", s)),
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeUnit::Minutes => write!(f, "minutes"),
            TimeUnit::Hours => write!(f, "hours"),
        }
    }
}

/// Settings shared by the metric computations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Assumed elapsed minutes per record. Downtime is measured against
    /// this to derive operating time.
    pub observation_period: f64,
    /// Unit used for reported durations.
    pub unit: TimeUnit,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            observation_period: 1440.0,
            unit: TimeUnit::default(),
        }
    }
}

impl AnalysisSettings {
    /// Set the observation period in minutes per record.
    pub fn with_period(mut self, minutes: f64) -> Self {
        self.observation_period = minutes;
        self
    }

    /// Set the display unit.
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// The observation period must be a positive number of minutes.
    pub fn validate(&self) -> Result<()> {
        if self.observation_period > 0.0 && self.observation_period.is_finite() {
            Ok(())
        } else {
            Err(ReliaError::Config(format!(
                "observation period must be positive, got {}",
                self.observation_period
            )))
        }
    }
}
