//! Report encoding
//!
//! This module encodes a monitor snapshot into the JSON report consumed by the
//! display layer: producer metadata, the inputs the scores were computed from,
//! the scores themselves and their presentation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::Assessment;
use crate::baseline::Baseline;
use crate::error::HeatRiskError;
use crate::pipeline::{LifecycleState, MonitorSnapshot};
use crate::types::{Channel, ScoreSet, SensorSample};
use crate::{HEATSTRAIN_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_VERSION: &str = "heatstrain.report.v1";

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Input quality for the reported result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportQuality {
    /// Channels with no reading yet
    pub missing_channels: Vec<String>,
    /// Whether the baseline floor has been refreshed from a real reading
    pub baseline_established: bool,
    /// Scores that are NaN or infinite
    pub invalid_scores: Vec<String>,
}

/// Complete heat risk report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatRiskReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    /// `idle` or `computed`
    pub state: String,
    pub sample: SensorSample,
    pub baseline: Baseline,
    pub scores: Option<ScoreSet>,
    pub assessment: Assessment,
    pub quality: ReportQuality,
}

/// Report encoder
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Encode a snapshot into a report
    pub fn encode(&self, snapshot: &MonitorSnapshot) -> HeatRiskReport {
        self.encode_at(snapshot, Utc::now())
    }

    /// Encode a snapshot with an explicit timestamp
    pub fn encode_at(&self, snapshot: &MonitorSnapshot, computed_at: DateTime<Utc>) -> HeatRiskReport {
        let (scores, assessment) = match &snapshot.state {
            LifecycleState::Computed(scores) => (Some(*scores), Assessment::from_scores(scores)),
            LifecycleState::Idle => (None, Assessment::idle()),
        };

        HeatRiskReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: HEATSTRAIN_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: computed_at.to_rfc3339(),
            state: snapshot.state.as_str().to_string(),
            sample: snapshot.sample,
            baseline: snapshot.baseline,
            scores,
            assessment,
            quality: build_quality(snapshot, scores.as_ref()),
        }
    }

    /// Encode to a JSON string
    pub fn encode_to_json(&self, snapshot: &MonitorSnapshot) -> Result<String, HeatRiskError> {
        let report = self.encode(snapshot);
        serde_json::to_string(&report).map_err(HeatRiskError::JsonError)
    }

    /// Encode to a pretty-printed JSON string
    pub fn encode_to_json_pretty(
        &self,
        snapshot: &MonitorSnapshot,
    ) -> Result<String, HeatRiskError> {
        let report = self.encode(snapshot);
        serde_json::to_string_pretty(&report).map_err(HeatRiskError::JsonError)
    }
}

fn build_quality(snapshot: &MonitorSnapshot, scores: Option<&ScoreSet>) -> ReportQuality {
    let missing_channels = Channel::ALL
        .into_iter()
        .filter(|c| snapshot.sample.get(*c).is_none())
        .map(|c| c.as_str().to_string())
        .collect();

    let invalid_scores = scores
        .map(|s| {
            [
                ("mpsi", s.mpsi),
                ("heat_index_f", s.heat_index_f),
                ("personal_score", s.personal_score),
                ("final_score", s.final_score),
            ]
            .into_iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(name, _)| name.to_string())
            .collect()
        })
        .unwrap_or_default();

    ReportQuality {
        missing_channels,
        baseline_established: snapshot.baseline.last_updated_at_ms > 0,
        invalid_scores,
    }
}
