//! Core types for the Heatstrain engine
//!
//! This module defines the data that flows through one scoring pass: the cached
//! sensor sample, the user profile supplied by the host, and the score set
//! produced for the presentation layer.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HeatRiskError;
use crate::personal::age_bracket;

/// Telemetry channel delivered by the sensor feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Skin temperature (°F)
    #[serde(alias = "sensor_data/skintemp")]
    Skin,
    /// Ambient air temperature (°F)
    #[serde(alias = "sensor_data/ambtemp")]
    Ambient,
    /// Relative humidity (%)
    #[serde(alias = "sensor_data/humidity")]
    Humidity,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Skin, Channel::Ambient, Channel::Humidity];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Skin => "skin",
            Channel::Ambient => "ambient",
            Channel::Humidity => "humidity",
        }
    }

    /// Path of this channel on the hardware collector's feed
    pub fn feed_path(&self) -> &'static str {
        match self {
            Channel::Skin => "sensor_data/skintemp",
            Channel::Ambient => "sensor_data/ambtemp",
            Channel::Humidity => "sensor_data/humidity",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = HeatRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Channel::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted) || c.feed_path() == wanted)
            .ok_or_else(|| HeatRiskError::UnknownChannel(wanted.to_string()))
    }
}

/// Latest value seen on each channel. `None` until the first delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Skin temperature (°F)
    pub skin_temp_f: Option<f64>,
    /// Ambient air temperature (°F)
    pub ambient_temp_f: Option<f64>,
    /// Relative humidity (0-100)
    pub humidity_pct: Option<f64>,
}

impl SensorSample {
    pub fn get(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::Skin => self.skin_temp_f,
            Channel::Ambient => self.ambient_temp_f,
            Channel::Humidity => self.humidity_pct,
        }
    }

    pub(crate) fn set(&mut self, channel: Channel, value: f64) {
        let slot = match channel {
            Channel::Skin => &mut self.skin_temp_f,
            Channel::Ambient => &mut self.ambient_temp_f,
            Channel::Humidity => &mut self.humidity_pct,
        };
        *slot = Some(value);
    }
}

/// User-entered physiological and lifestyle parameters.
///
/// Field names follow the form inputs of the collector app (`restingHR`,
/// `workIntensity`, `highBloodPressure`, ...). Categorical fields outside their
/// tables are accepted and contribute nothing rather than being rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Age option selected by the user (22, 27, ... 67)
    #[serde(default)]
    pub age: Option<u32>,
    /// Resting heart rate (bpm)
    #[serde(default, rename = "restingHR", alias = "restingHr")]
    pub resting_hr: Option<u32>,
    /// Work intensity category (1-8). Any other integer applies no work intensity.
    #[serde(default)]
    pub work_intensity: i64,
    /// Clothing insulation level
    #[serde(default)]
    pub clothing: Option<u8>,
    /// Activity level
    #[serde(default)]
    pub activity: Option<u8>,
    /// Sleep quality level
    #[serde(default)]
    pub sleep: Option<u8>,
    #[serde(default)]
    pub obesity: bool,
    #[serde(default)]
    pub diabetes: bool,
    #[serde(default)]
    pub high_blood_pressure: bool,
    #[serde(default)]
    pub cardiovascular_disease: bool,
    /// Comma-separated medication names
    #[serde(default)]
    pub medications: String,
}

impl UserProfile {
    /// Parse a profile from its JSON form
    pub fn from_json(json: &str) -> Result<Self, HeatRiskError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fill the age and resting heart rate with fallbacks when the user left them blank
    pub fn with_fallbacks(mut self, age: u32, resting_hr: u32) -> Self {
        self.age.get_or_insert(age);
        self.resting_hr.get_or_insert(resting_hr);
        self
    }

    /// List everything about this profile that degrades the scores
    pub fn check(&self) -> Vec<ProfileIssue> {
        let mut issues = Vec::new();

        if self.age.is_none() {
            issues.push(ProfileIssue::warning("age", "blank, the default age is used"));
        } else if age_bracket(self.age) == 5 && !matches!(self.age, Some(a) if a >= 72) {
            issues.push(ProfileIssue::warning(
                "age",
                "not one of the age options, scored in the highest bracket",
            ));
        }

        if self.resting_hr.is_none() {
            issues.push(ProfileIssue::warning(
                "restingHR",
                "blank, the default resting heart rate is used",
            ));
        }

        if let (Some(age), Some(resting_hr)) = (self.age, self.resting_hr) {
            if resting_hr >= 220u32.saturating_sub(age) {
                issues.push(ProfileIssue::invalid(
                    "restingHR",
                    "must be below the age-predicted maximum heart rate",
                ));
            }
        }

        if !(1..=8).contains(&self.work_intensity) {
            issues.push(ProfileIssue::warning(
                "workIntensity",
                "outside 1-8, no work intensity is applied",
            ));
        }

        for (field, value) in [
            ("clothing", self.clothing),
            ("activity", self.activity),
            ("sleep", self.sleep),
        ] {
            if value.is_none() {
                issues.push(ProfileIssue::missing(field, "blank, the personal score is NaN"));
            }
        }

        issues
    }

    /// Fail on the first issue that makes a score invalid
    pub fn validate(&self) -> Result<(), HeatRiskError> {
        let Some(issue) = self
            .check()
            .into_iter()
            .find(|issue| issue.severity == IssueSeverity::Error)
        else {
            return Ok(());
        };

        match issue.kind {
            IssueKind::Missing => Err(HeatRiskError::MissingField(issue.field)),
            IssueKind::Invalid | IssueKind::Fallback => Err(HeatRiskError::InvalidProfile(
                format!("{}: {}", issue.field, issue.message),
            )),
        }
    }
}

/// How much a profile issue affects the scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Scored with a fallback or a zero contribution
    Warning,
    /// A score comes out NaN or infinite
    Error,
}

/// What is wrong with a profile field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Left blank with no fallback
    Missing,
    /// Outside what the formulas can score
    Invalid,
    /// Blank or off-table, scored with a default or no contribution
    Fallback,
}

/// One finding from [`UserProfile::check`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileIssue {
    pub field: String,
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub message: String,
}

impl ProfileIssue {
    fn new(field: &str, kind: IssueKind, message: &str) -> Self {
        let severity = match kind {
            IssueKind::Missing | IssueKind::Invalid => IssueSeverity::Error,
            IssueKind::Fallback => IssueSeverity::Warning,
        };
        Self {
            field: field.to_string(),
            kind,
            severity,
            message: message.to_string(),
        }
    }

    fn warning(field: &str, message: &str) -> Self {
        Self::new(field, IssueKind::Fallback, message)
    }

    fn missing(field: &str, message: &str) -> Self {
        Self::new(field, IssueKind::Missing, message)
    }

    fn invalid(field: &str, message: &str) -> Self {
        Self::new(field, IssueKind::Invalid, message)
    }
}

/// Scores produced by one compute pass.
///
/// Non-finite scores are written to JSON as `null` and read back as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    /// Modified Physiological Strain Index (unclamped)
    #[serde(deserialize_with = "nan_from_null")]
    pub mpsi: f64,
    /// Apparent temperature (°F)
    #[serde(deserialize_with = "nan_from_null")]
    pub heat_index_f: f64,
    /// Discrete heat risk level (1-5); `None` when the heat index is not a number
    pub heat_risk_level: Option<u8>,
    /// Personal vulnerability score
    #[serde(deserialize_with = "nan_from_null")]
    pub personal_score: f64,
    /// Weighted composite heat risk
    #[serde(deserialize_with = "nan_from_null")]
    pub final_score: f64,
}

/// Read a float that serde_json wrote as `null` because it was NaN or infinite
pub(crate) fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Traffic-light tier used to color a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTier {
    Green,
    Yellow,
    Red,
    /// No value to color (idle or not a number)
    Grey,
}
