//! Telemetry cache
//!
//! Holds the most recent reading delivered on each sensor channel. The external
//! feed pushes values in whenever the collector publishes; scoring reads a copy
//! of the current sample.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{Channel, SensorSample};

/// One message from the sensor feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedEvent {
    /// New value published on a channel
    Reading {
        channel: Channel,
        /// Raw payload; anything that is not a number is cached as NaN
        value: serde_json::Value,
        /// Delivery time (ms since epoch), drives the baseline refresh
        #[serde(default, skip_serializing_if = "Option::is_none")]
        at_ms: Option<u64>,
    },
    /// The collector failed to read a channel
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel: Option<Channel>,
        name: String,
    },
}

impl FeedEvent {
    /// Numeric reading helper
    pub fn reading(channel: Channel, value: f64, at_ms: Option<u64>) -> Self {
        FeedEvent::Reading {
            channel,
            value: serde_json::Value::from(value),
            at_ms,
        }
    }

    /// Delivery time of a reading, if stamped
    pub fn at_ms(&self) -> Option<u64> {
        match self {
            FeedEvent::Reading { at_ms, .. } => *at_ms,
            FeedEvent::Error { .. } => None,
        }
    }
}

/// Latest-value cache for the three sensor channels
#[derive(Debug, Clone, Default)]
pub struct TelemetryCache {
    sample: SensorSample,
}

impl TelemetryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest value for a channel
    pub fn observe(&mut self, channel: Channel, value: f64) {
        debug!(channel = channel.as_str(), value, "telemetry reading");
        self.sample.set(channel, value);
    }

    /// Record a raw feed payload. Numbers and numeric strings are kept as-is;
    /// any other payload is cached as NaN.
    pub fn observe_json(&mut self, channel: Channel, value: &serde_json::Value) {
        let numeric = coerce_payload(value);
        if numeric.is_nan() {
            warn!(channel = channel.as_str(), payload = %value, "non-numeric telemetry payload");
        }
        self.observe(channel, numeric);
    }

    /// Apply one feed event. Read failures are logged and leave the cache untouched.
    pub fn apply(&mut self, event: &FeedEvent) {
        match event {
            FeedEvent::Reading { channel, value, .. } => self.observe_json(*channel, value),
            FeedEvent::Error { channel, name } => {
                warn!(
                    channel = channel.map(|c| c.as_str()).unwrap_or("unknown"),
                    error = %name,
                    "The read failed"
                );
            }
        }
    }

    /// Latest value for a channel
    pub fn current(&self, channel: Channel) -> Option<f64> {
        self.sample.get(channel)
    }

    /// Copy of the current sample
    pub fn snapshot(&self) -> SensorSample {
        self.sample
    }
}

fn coerce_payload(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
