//! Baseline management
//!
//! This module tracks the lowest skin temperature observed so far. The floor is
//! the physiological reference for the temperature term of the mPSI and only
//! ever moves down. It is refreshed at most once per interval, however often the
//! host polls it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DEFAULT_BASELINE_REFRESH_INTERVAL_MS, DEFAULT_INITIAL_BASELINE_F};
use crate::error::HeatRiskError;

/// Reference skin temperature floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// Lowest skin temperature accepted so far (°F)
    pub min_skin_temp_f: f64,
    /// Time of the last refresh (ms since epoch, 0 before the first one)
    pub last_updated_at_ms: u64,
}

/// Rate-limited running minimum of skin temperature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineTracker {
    baseline: Baseline,
    refresh_interval_ms: u64,
}

impl Default for BaselineTracker {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_BASELINE_F, DEFAULT_BASELINE_REFRESH_INTERVAL_MS)
    }
}

impl BaselineTracker {
    /// Create a tracker starting from `initial_ceiling_f`
    pub fn new(initial_ceiling_f: f64, refresh_interval_ms: u64) -> Self {
        Self {
            baseline: Baseline {
                min_skin_temp_f: initial_ceiling_f,
                last_updated_at_ms: 0,
            },
            refresh_interval_ms,
        }
    }

    /// Fold the current skin temperature into the floor if the refresh interval
    /// has elapsed. Returns whether a refresh happened.
    ///
    /// A missing or NaN skin reading is not a sample: the window stays open so the
    /// next valid reading is taken as soon as it arrives.
    pub fn maybe_refresh(&mut self, now_ms: u64, skin_temp_f: Option<f64>) -> bool {
        let elapsed = now_ms.saturating_sub(self.baseline.last_updated_at_ms);
        if elapsed <= self.refresh_interval_ms {
            return false;
        }

        let Some(skin) = skin_temp_f.filter(|t| !t.is_nan()) else {
            return false;
        };

        let previous = self.baseline.min_skin_temp_f;
        self.baseline.min_skin_temp_f = previous.min(skin);
        self.baseline.last_updated_at_ms = now_ms;

        debug!(
            now_ms,
            skin_temp_f = skin,
            previous_min_f = previous,
            min_skin_temp_f = self.baseline.min_skin_temp_f,
            "baseline refreshed"
        );
        true
    }

    /// Fold a persisted floor into this tracker.
    ///
    /// The floor only moves down and the refresh interval stays the tracker's own.
    pub fn absorb(&mut self, loaded: Baseline) -> Result<(), HeatRiskError> {
        if !loaded.min_skin_temp_f.is_finite() {
            return Err(HeatRiskError::InvalidBaseline(format!(
                "min_skin_temp_f must be finite, got {}",
                loaded.min_skin_temp_f
            )));
        }

        let previous = self.baseline.min_skin_temp_f;
        self.baseline.min_skin_temp_f = previous.min(loaded.min_skin_temp_f);
        self.baseline.last_updated_at_ms = self
            .baseline
            .last_updated_at_ms
            .max(loaded.last_updated_at_ms);

        debug!(
            previous_min_f = previous,
            loaded_min_f = loaded.min_skin_temp_f,
            min_skin_temp_f = self.baseline.min_skin_temp_f,
            "baseline loaded"
        );
        Ok(())
    }

    /// Current floor
    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn refresh_interval_ms(&self) -> u64 {
        self.refresh_interval_ms
    }

    /// Load a tracker from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the tracker to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_ceiling() {
        let tracker = BaselineTracker::default();
        assert_eq!(tracker.baseline().min_skin_temp_f, 95.0);
        assert_eq!(tracker.baseline().last_updated_at_ms, 0);
    }

    #[test]
    fn test_spaced_samples_track_minimum() {
        let mut tracker = BaselineTracker::default();

        assert!(tracker.maybe_refresh(20_000, Some(90.0)));
        assert!(tracker.maybe_refresh(30_001, Some(85.0)));
        assert!(tracker.maybe_refresh(40_002, Some(95.0)));

        assert_eq!(tracker.baseline().min_skin_temp_f, 85.0);
        assert_eq!(tracker.baseline().last_updated_at_ms, 40_002);
    }

    #[test]
    fn test_burst_within_interval_updates_once() {
        let mut tracker = BaselineTracker::default();

        assert!(tracker.maybe_refresh(20_000, Some(90.0)));
        assert!(!tracker.maybe_refresh(20_001, Some(85.0)));
        assert!(!tracker.maybe_refresh(20_002, Some(95.0)));

        assert_eq!(tracker.baseline().min_skin_temp_f, 90.0);
    }

    #[test]
    fn test_exact_interval_is_not_elapsed() {
        let mut tracker = BaselineTracker::default();
        tracker.maybe_refresh(20_000, Some(90.0));

        assert!(!tracker.maybe_refresh(30_000, Some(80.0)));
        assert!(tracker.maybe_refresh(30_001, Some(80.0)));
        assert_eq!(tracker.baseline().min_skin_temp_f, 80.0);
    }

    #[test]
    fn test_missing_sample_keeps_window_open() {
        let mut tracker = BaselineTracker::default();

        assert!(!tracker.maybe_refresh(20_000, None));
        assert!(!tracker.maybe_refresh(20_001, Some(f64::NAN)));
        assert!(tracker.maybe_refresh(20_002, Some(91.0)));
        assert_eq!(tracker.baseline().min_skin_temp_f, 91.0);
    }

    #[test]
    fn test_warmer_skin_never_raises_floor() {
        let mut tracker = BaselineTracker::default();
        tracker.maybe_refresh(20_000, Some(99.0));
        assert_eq!(tracker.baseline().min_skin_temp_f, 95.0);
    }

    #[test]
    fn test_serialization() {
        let mut tracker = BaselineTracker::new(95.0, 5_000);
        tracker.maybe_refresh(60_000, Some(88.5));

        let json = tracker.to_json().unwrap();
        let loaded = BaselineTracker::from_json(&json).unwrap();

        assert_eq!(loaded.baseline(), tracker.baseline());
        assert_eq!(loaded.refresh_interval_ms(), 5_000);
    }

    #[test]
    fn test_absorb_never_raises_floor() {
        let mut tracker = BaselineTracker::default();
        tracker.maybe_refresh(20_000, Some(85.0));

        tracker
            .absorb(Baseline {
                min_skin_temp_f: 99.0,
                last_updated_at_ms: 0,
            })
            .unwrap();
        assert_eq!(tracker.baseline().min_skin_temp_f, 85.0);
        assert_eq!(tracker.baseline().last_updated_at_ms, 20_000);

        tracker
            .absorb(Baseline {
                min_skin_temp_f: 82.5,
                last_updated_at_ms: 25_000,
            })
            .unwrap();
        assert_eq!(tracker.baseline().min_skin_temp_f, 82.5);
        assert_eq!(tracker.baseline().last_updated_at_ms, 25_000);
        assert_eq!(tracker.refresh_interval_ms(), 10_000);
    }

    #[test]
    fn test_absorb_rejects_non_finite_floor() {
        let mut tracker = BaselineTracker::default();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = tracker.absorb(Baseline {
                min_skin_temp_f: bad,
                last_updated_at_ms: 1,
            });
            assert!(matches!(result, Err(HeatRiskError::InvalidBaseline(_))));
        }
        assert_eq!(tracker.baseline().min_skin_temp_f, 95.0);
        assert_eq!(tracker.baseline().last_updated_at_ms, 0);
    }

    proptest! {
        #[test]
        fn prop_floor_is_non_increasing(
            readings in prop::collection::vec((0u64..30_000, 60.0f64..110.0), 1..64)
        ) {
            let mut tracker = BaselineTracker::default();
            let mut now = 0u64;
            let mut previous = tracker.baseline().min_skin_temp_f;

            for (step, skin) in readings {
                now += step;
                tracker.maybe_refresh(now, Some(skin));
                let current = tracker.baseline().min_skin_temp_f;
                prop_assert!(current <= previous);
                previous = current;
            }
        }
    }
}
