//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::HeatRiskError;

/// Starting baseline ceiling before any skin sample arrives (35 °C)
pub const DEFAULT_INITIAL_BASELINE_F: f64 = 95.0;

/// Minimum time between two baseline refreshes
pub const DEFAULT_BASELINE_REFRESH_INTERVAL_MS: u64 = 10_000;

/// Age assumed when the user leaves the age field blank
pub const DEFAULT_AGE: u32 = 22;

/// Resting heart rate assumed when the user leaves it blank (bpm)
pub const DEFAULT_RESTING_HR: u32 = 70;

/// Tunables for a [`HeatRiskMonitor`](crate::pipeline::HeatRiskMonitor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Baseline skin temperature before the first refresh (°F)
    pub initial_baseline_f: f64,
    /// Minimum spacing between baseline refreshes (ms)
    pub baseline_refresh_interval_ms: u64,
    /// Fallback age
    pub default_age: u32,
    /// Fallback resting heart rate (bpm)
    pub default_resting_hr: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_baseline_f: DEFAULT_INITIAL_BASELINE_F,
            baseline_refresh_interval_ms: DEFAULT_BASELINE_REFRESH_INTERVAL_MS,
            default_age: DEFAULT_AGE,
            default_resting_hr: DEFAULT_RESTING_HR,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, HeatRiskError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String, HeatRiskError> {
        serde_json::to_string_pretty(self).map_err(|e| HeatRiskError::EncodingError(e.to_string()))
    }

    /// Reject values that would make the baseline meaningless
    pub fn validate(&self) -> Result<(), HeatRiskError> {
        if !self.initial_baseline_f.is_finite() {
            return Err(HeatRiskError::ConfigError(format!(
                "initial_baseline_f must be finite, got {}",
                self.initial_baseline_f
            )));
        }
        if self.baseline_refresh_interval_ms == 0 {
            return Err(HeatRiskError::ConfigError(
                "baseline_refresh_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
