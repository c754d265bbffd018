//! Heatstrain - On-device heat strain scoring for wearable telemetry
//!
//! Heatstrain turns live skin temperature, ambient temperature and humidity
//! readings plus a user profile into heat risk scores through a deterministic
//! pass: physiological strain (mPSI) → heat index and risk level → personal
//! vulnerability → weighted composite.
//!
//! ## Modules
//!
//! - **Telemetry & Baseline**: latest sensor readings and the skin temperature floor
//! - **Scoring**: physiology, environment, personal and composite scores
//! - **Monitor**: result lifecycle and report encoding for the display layer

pub mod assessment;
pub mod baseline;
pub mod composite;
pub mod config;
pub mod encoder;
pub mod environment;
pub mod error;
pub mod personal;
pub mod physiology;
pub mod pipeline;
pub mod telemetry;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use assessment::{Assessment, ScoreKind};
pub use baseline::{Baseline, BaselineTracker};
pub use config::EngineConfig;
pub use encoder::{HeatRiskReport, ReportEncoder};
pub use error::HeatRiskError;
pub use pipeline::{score, HeatRiskMonitor, LifecycleState};
pub use telemetry::{FeedEvent, TelemetryCache};
pub use types::{
    Channel, ColorTier, IssueKind, IssueSeverity, ProfileIssue, ScoreSet, SensorSample, UserProfile,
};

/// Heatstrain version embedded in all reports
pub const HEATSTRAIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "heatstrain";
