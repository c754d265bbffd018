//! Pipeline orchestration
//!
//! This module provides the public API for Heatstrain. It runs one scoring pass
//! over the cached telemetry, the baseline floor and a user profile, and owns the
//! lifecycle of the most recent result.
//!
//! Pass stages:
//! 1. Physiological strain (mPSI) from skin temperature and heart rate estimate
//! 2. Heat index and risk level from ambient temperature and humidity
//! 3. Personal vulnerability from the profile
//! 4. Weighted composite of the three

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::baseline::{Baseline, BaselineTracker};
use crate::composite::final_score;
use crate::config::EngineConfig;
use crate::environment::{heat_index_from, risk_level};
use crate::error::HeatRiskError;
use crate::personal::VulnerabilityScorer;
use crate::physiology::mpsi;
use crate::telemetry::{FeedEvent, TelemetryCache};
use crate::types::{Channel, ScoreSet, SensorSample, UserProfile};

/// Run one scoring pass over explicit inputs.
///
/// Pure: the same inputs always give the same scores. Missing readings or
/// profile fields come out as NaN in the scores that depend on them.
pub fn score(sample: &SensorSample, baseline: &Baseline, profile: &UserProfile) -> ScoreSet {
    score_with(&VulnerabilityScorer::default(), sample, baseline, profile)
}

/// [`score`] with a custom personal vulnerability scorer
pub fn score_with(
    scorer: &VulnerabilityScorer,
    sample: &SensorSample,
    baseline: &Baseline,
    profile: &UserProfile,
) -> ScoreSet {
    // Stage 1: physiological strain
    let mpsi = mpsi(sample.skin_temp_f, baseline.min_skin_temp_f, profile);

    // Stage 2: environment
    let heat_index_f = heat_index_from(sample.humidity_pct, sample.ambient_temp_f);
    let heat_risk_level = risk_level(heat_index_f);

    // Stage 3: personal vulnerability
    let personal_score = scorer.score(profile);

    // Stage 4: composite
    let final_score = final_score(mpsi, heat_risk_level, personal_score);

    ScoreSet {
        mpsi,
        heat_index_f,
        heat_risk_level,
        personal_score,
        final_score,
    }
}

/// Result lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "scores", rename_all = "snake_case")]
pub enum LifecycleState {
    /// No result on display
    #[default]
    Idle,
    /// A result is on display
    Computed(ScoreSet),
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Computed(_) => "computed",
        }
    }
}

/// Point-in-time view of a monitor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorSnapshot {
    pub sample: SensorSample,
    pub baseline: Baseline,
    pub state: LifecycleState,
}

/// Stateful monitor for one wearer.
///
/// Owns the telemetry cache, the baseline tracker and the last result. A host
/// sharing it across threads wraps the whole monitor in one mutex.
#[derive(Debug, Clone)]
pub struct HeatRiskMonitor {
    config: EngineConfig,
    telemetry: TelemetryCache,
    baseline: BaselineTracker,
    scorer: VulnerabilityScorer,
    state: LifecycleState,
}

impl Default for HeatRiskMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeatRiskMonitor {
    /// Create a monitor with default settings
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a monitor with a specific configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            baseline: BaselineTracker::new(
                config.initial_baseline_f,
                config.baseline_refresh_interval_ms,
            ),
            config,
            telemetry: TelemetryCache::new(),
            scorer: VulnerabilityScorer::default(),
            state: LifecycleState::Idle,
        }
    }

    /// Record a sensor reading
    pub fn observe(&mut self, channel: Channel, value: f64) {
        self.telemetry.observe(channel, value);
    }

    /// Apply a feed event; stamped readings also drive the baseline refresh
    pub fn ingest(&mut self, event: &FeedEvent) {
        self.telemetry.apply(event);
        if let Some(at_ms) = event.at_ms() {
            self.tick(at_ms);
        }
    }

    /// Give the baseline tracker a chance to fold in the current skin temperature
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.baseline
            .maybe_refresh(now_ms, self.telemetry.current(Channel::Skin))
    }

    /// Score the current state and keep the result.
    ///
    /// Computing while a result is already held discards it first.
    pub fn compute(&mut self, profile: &UserProfile) -> ScoreSet {
        if let LifecycleState::Computed(previous) = self.state {
            debug!(final_score = previous.final_score, "discarding previous result");
            self.state = LifecycleState::Idle;
        }

        let profile = profile
            .clone()
            .with_fallbacks(self.config.default_age, self.config.default_resting_hr);
        let scores = score_with(
            &self.scorer,
            &self.telemetry.snapshot(),
            &self.baseline.baseline(),
            &profile,
        );

        debug!(
            mpsi = scores.mpsi,
            heat_index_f = scores.heat_index_f,
            heat_risk_level = ?scores.heat_risk_level,
            personal_score = scores.personal_score,
            final_score = scores.final_score,
            "heat risk computed"
        );

        self.state = LifecycleState::Computed(scores);
        scores
    }

    /// Drop the held result. Returns it, or `None` when already idle.
    pub fn reset(&mut self) -> Option<ScoreSet> {
        match std::mem::take(&mut self.state) {
            LifecycleState::Computed(scores) => {
                debug!("result reset");
                Some(scores)
            }
            LifecycleState::Idle => None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Most recent result, if one is held
    pub fn latest(&self) -> Option<&ScoreSet> {
        match &self.state {
            LifecycleState::Computed(scores) => Some(scores),
            LifecycleState::Idle => None,
        }
    }

    pub fn telemetry(&self) -> &TelemetryCache {
        &self.telemetry
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline.baseline()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            sample: self.telemetry.snapshot(),
            baseline: self.baseline.baseline(),
            state: self.state,
        }
    }

    /// Merge persisted baseline state from JSON.
    ///
    /// Only the floor is taken from the saved state, and only if it is lower than
    /// the current one. The refresh interval always comes from this monitor's config.
    pub fn load_baseline(&mut self, json: &str) -> Result<(), HeatRiskError> {
        let loaded = BaselineTracker::from_json(json)?;
        self.baseline.absorb(loaded.baseline())
    }

    /// Save baseline state to JSON
    pub fn save_baseline(&self) -> Result<String, HeatRiskError> {
        self.baseline
            .to_json()
            .map_err(|e| HeatRiskError::EncodingError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_profile() -> UserProfile {
        UserProfile {
            age: Some(22),
            resting_hr: Some(70),
            work_intensity: 5,
            clothing: Some(2),
            activity: Some(3),
            sleep: Some(2),
            high_blood_pressure: true,
            medications: "Aspirin, Lisinopril ".to_string(),
            ..Default::default()
        }
    }

    fn warm_monitor() -> HeatRiskMonitor {
        let mut monitor = HeatRiskMonitor::new();
        monitor.ingest(&FeedEvent::reading(Channel::Skin, 90.0, Some(20_000)));
        monitor.ingest(&FeedEvent::reading(Channel::Skin, 95.0, Some(20_500)));
        monitor.ingest(&FeedEvent::reading(Channel::Ambient, 90.0, None));
        monitor.ingest(&FeedEvent::reading(Channel::Humidity, 50.0, None));
        monitor
    }

    #[test]
    fn test_score_pass() {
        let sample = SensorSample {
            skin_temp_f: Some(95.0),
            ambient_temp_f: Some(90.0),
            humidity_pct: Some(50.0),
        };
        let baseline = Baseline {
            min_skin_temp_f: 90.0,
            last_updated_at_ms: 20_000,
        };

        let scores = score(&sample, &baseline, &sample_profile());

        let expected_mpsi = 5.0 * 5.0 / (102.65 - 90.0) + 5.0 * 61.0 / 128.0;
        assert!((scores.mpsi - expected_mpsi).abs() < 1e-9);
        assert_eq!(scores.heat_risk_level, Some(3));

        // 2*.145 + 1*.21 + 3*.145 + 2*.145 + 1*.21 + 2*.145
        let expected_personal = 1.725;
        assert!((scores.personal_score - expected_personal).abs() < 1e-9);

        let expected_final =
            0.4 * (expected_mpsi / 10.0) + 0.4 * (3.0 / 5.0) + 0.2 * (expected_personal / 5.0);
        assert!((scores.final_score - expected_final).abs() < 1e-9);
    }

    #[test]
    fn test_score_without_telemetry() {
        let scores = score(
            &SensorSample::default(),
            &BaselineTracker::default().baseline(),
            &sample_profile(),
        );

        assert!(scores.mpsi.is_nan());
        assert!(scores.heat_index_f.is_nan());
        assert_eq!(scores.heat_risk_level, None);
        assert!(scores.personal_score.is_finite());
        assert!(scores.final_score.is_nan());
    }

    #[test]
    fn test_lifecycle() {
        let mut monitor = warm_monitor();
        assert_eq!(monitor.state(), LifecycleState::Idle);
        assert!(monitor.latest().is_none());

        let scores = monitor.compute(&sample_profile());
        assert_eq!(monitor.state(), LifecycleState::Computed(scores));
        assert_eq!(monitor.latest(), Some(&scores));

        assert_eq!(monitor.reset(), Some(scores));
        assert_eq!(monitor.state(), LifecycleState::Idle);
        assert_eq!(monitor.reset(), None);
    }

    #[test]
    fn test_recompute_after_reset_is_identical() {
        let mut monitor = warm_monitor();
        let first = monitor.compute(&sample_profile());
        monitor.reset();
        let second = monitor.compute(&sample_profile());

        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_while_computed_replaces_result() {
        let mut monitor = warm_monitor();
        monitor.compute(&sample_profile());

        monitor.observe(Channel::Ambient, 100.0);
        let second = monitor.compute(&sample_profile());

        assert_eq!(monitor.latest(), Some(&second));
        assert_eq!(second.heat_risk_level, Some(4));
    }

    #[test]
    fn test_baseline_refreshes_from_stamped_readings() {
        let monitor = warm_monitor();
        // second skin reading fell inside the refresh window
        assert_eq!(monitor.baseline().min_skin_temp_f, 90.0);
        assert_eq!(monitor.telemetry().current(Channel::Skin), Some(95.0));
    }

    #[test]
    fn test_profile_fallbacks_from_config() {
        let mut monitor = warm_monitor();
        let blank_vitals = UserProfile {
            age: None,
            resting_hr: None,
            ..sample_profile()
        };

        let scores = monitor.compute(&blank_vitals);
        assert_eq!(scores, monitor.compute(&sample_profile()));
    }

    #[test]
    fn test_custom_config() {
        let config = EngineConfig {
            initial_baseline_f: 92.0,
            baseline_refresh_interval_ms: 1_000,
            ..EngineConfig::default()
        };
        let mut monitor = HeatRiskMonitor::with_config(config);
        assert_eq!(monitor.baseline().min_skin_temp_f, 92.0);

        monitor.observe(Channel::Skin, 89.0);
        assert!(monitor.tick(1_001));
        monitor.observe(Channel::Skin, 88.0);
        assert!(monitor.tick(2_002));
        assert_eq!(monitor.baseline().min_skin_temp_f, 88.0);
    }

    #[test]
    fn test_baseline_persistence() {
        let monitor = warm_monitor();
        let saved = monitor.save_baseline().unwrap();

        let mut restored = HeatRiskMonitor::new();
        restored.load_baseline(&saved).unwrap();
        assert_eq!(restored.baseline(), monitor.baseline());

        assert!(restored.load_baseline("not json").is_err());
    }

    #[test]
    fn test_loaded_baseline_cannot_raise_floor_or_change_interval() {
        let mut monitor = HeatRiskMonitor::new();
        monitor.observe(Channel::Skin, 85.0);
        assert!(monitor.tick(20_000));

        monitor
            .load_baseline(
                r#"{"baseline":{"min_skin_temp_f":99.0,"last_updated_at_ms":0},"refresh_interval_ms":0}"#,
            )
            .unwrap();
        assert_eq!(monitor.baseline().min_skin_temp_f, 85.0);

        monitor.observe(Channel::Skin, 80.0);
        assert!(!monitor.tick(20_001));
        assert!(!monitor.tick(30_000));
        assert!(monitor.tick(30_001));
        assert_eq!(monitor.baseline().min_skin_temp_f, 80.0);
    }

    #[test]
    fn test_snapshot() {
        let mut monitor = warm_monitor();
        let scores = monitor.compute(&sample_profile());
        let snapshot = monitor.snapshot();

        assert_eq!(snapshot.sample.ambient_temp_f, Some(90.0));
        assert_eq!(snapshot.baseline.min_skin_temp_f, 90.0);
        assert_eq!(snapshot.state, LifecycleState::Computed(scores));
    }
}
