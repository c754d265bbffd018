//! Personal vulnerability scoring
//!
//! Weighted score of the individual factors that raise heat risk regardless of
//! the weather: clothing, age, activity, medications, comorbidities and sleep.

use serde::{Deserialize, Serialize};

use crate::types::{nan_from_null, UserProfile};

/// Medications known to impair thermoregulation or fluid balance
pub const HIGH_RISK_MEDICATIONS: [&str; 18] = [
    "furosemide",
    "hydrochlorothiazide",
    "acetazolamide",
    "atenolol",
    "metoprolol",
    "propranolol",
    "amlodipine",
    "felodipine",
    "nifedipine",
    "enalapril",
    "lisinopril",
    "ramipril",
    "valsartan",
    "losartan",
    "clopidogrel",
    "aspirin",
    "fluoxetine",
    "sertraline",
];

/// Cap on matched medications before weighting
pub const MAX_MEDICATION_SCORE: u32 = 5;

/// Factor weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityWeights {
    pub clothing: f64,
    pub age: f64,
    pub activity: f64,
    pub medications: f64,
    pub comorbidities: f64,
    pub sleep: f64,
}

impl Default for VulnerabilityWeights {
    fn default() -> Self {
        Self {
            clothing: 0.145,
            age: 0.21,
            activity: 0.145,
            medications: 0.145,
            comorbidities: 0.21,
            sleep: 0.145,
        }
    }
}

/// Per-factor inputs of one personal score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityFactors {
    /// NaN when the user left the field blank
    #[serde(deserialize_with = "nan_from_null")]
    pub clothing: f64,
    pub age_bracket: u8,
    /// NaN when the user left the field blank
    #[serde(deserialize_with = "nan_from_null")]
    pub activity: f64,
    pub medication_matches: u32,
    pub comorbidities: u32,
    /// NaN when the user left the field blank
    #[serde(deserialize_with = "nan_from_null")]
    pub sleep: f64,
}

impl VulnerabilityFactors {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            clothing: level(profile.clothing),
            age_bracket: age_bracket(profile.age),
            activity: level(profile.activity),
            medication_matches: medication_matches(&profile.medications),
            comorbidities: comorbidity_count(profile),
            sleep: level(profile.sleep),
        }
    }
}

/// Scorer for the personal vulnerability score
#[derive(Debug, Clone, Copy, Default)]
pub struct VulnerabilityScorer {
    weights: VulnerabilityWeights,
}

impl VulnerabilityScorer {
    pub fn with_weights(weights: VulnerabilityWeights) -> Self {
        Self { weights }
    }

    /// Score a user profile. Not normalized or clamped.
    pub fn score(&self, profile: &UserProfile) -> f64 {
        self.score_factors(&VulnerabilityFactors::from_profile(profile))
    }

    /// Weighted sum of already extracted factors
    pub fn score_factors(&self, factors: &VulnerabilityFactors) -> f64 {
        let w = &self.weights;
        let medications = factors.medication_matches.min(MAX_MEDICATION_SCORE);

        factors.clothing * w.clothing
            + f64::from(factors.age_bracket) * w.age
            + factors.activity * w.activity
            + f64::from(medications) * w.medications
            + f64::from(factors.comorbidities) * w.comorbidities
            + factors.sleep * w.sleep
    }
}

/// Age bracket (1-5) for the age options offered to the user.
/// Ages outside the option table fall into the highest bracket.
pub fn age_bracket(age: Option<u32>) -> u8 {
    match age {
        Some(22 | 27 | 32 | 37) => 1,
        Some(42 | 47) => 2,
        Some(52 | 57) => 3,
        Some(62 | 67) => 4,
        _ => 5,
    }
}

/// Comorbidity points: one each for obesity, diabetes and hypertension, two for
/// cardiovascular disease
pub fn comorbidity_count(profile: &UserProfile) -> u32 {
    u32::from(profile.obesity)
        + u32::from(profile.diabetes)
        + u32::from(profile.high_blood_pressure)
        + 2 * u32::from(profile.cardiovascular_disease)
}

/// Number of entries in a comma-separated list that name a high-risk medication
pub fn medication_matches(medications: &str) -> u32 {
    medications
        .split(',')
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| HIGH_RISK_MEDICATIONS.contains(&entry.as_str()))
        .count() as u32
}

fn level(value: Option<u8>) -> f64 {
    value.map(f64::from).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn baseline_profile() -> UserProfile {
        UserProfile {
            age: Some(22),
            clothing: Some(1),
            activity: Some(1),
            sleep: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_lowest_risk_profile() {
        let score = VulnerabilityScorer::default().score(&baseline_profile());
        // 0.145 + 0.21 + 0.145 + 0 + 0 + 0.145
        assert!((score - 0.645).abs() < 1e-9);
    }

    #[test]
    fn test_age_brackets() {
        assert_eq!(age_bracket(Some(22)), 1);
        assert_eq!(age_bracket(Some(37)), 1);
        assert_eq!(age_bracket(Some(47)), 2);
        assert_eq!(age_bracket(Some(52)), 3);
        assert_eq!(age_bracket(Some(67)), 4);
        assert_eq!(age_bracket(Some(72)), 5);
        assert_eq!(age_bracket(Some(30)), 5);
        assert_eq!(age_bracket(None), 5);
    }

    #[test]
    fn test_comorbidities() {
        let profile = UserProfile {
            obesity: true,
            diabetes: true,
            high_blood_pressure: true,
            cardiovascular_disease: true,
            ..Default::default()
        };
        assert_eq!(comorbidity_count(&profile), 5);

        let cardio_only = UserProfile {
            cardiovascular_disease: true,
            ..Default::default()
        };
        assert_eq!(comorbidity_count(&cardio_only), 2);
    }

    #[test]
    fn test_medication_matching_trims_and_ignores_case() {
        assert_eq!(medication_matches("Aspirin, Lisinopril "), 2);
        assert_eq!(medication_matches("  METOPROLOL,ibuprofen"), 1);
        assert_eq!(medication_matches(""), 0);
        assert_eq!(medication_matches("vitamin d, , fish oil"), 0);
    }

    #[test]
    fn test_medication_score_capped() {
        let profile = UserProfile {
            medications: "aspirin, losartan, valsartan, ramipril, atenolol, sertraline, fluoxetine"
                .to_string(),
            ..baseline_profile()
        };

        let factors = VulnerabilityFactors::from_profile(&profile);
        assert_eq!(factors.medication_matches, 7);

        let score = VulnerabilityScorer::default().score(&profile);
        assert!((score - (0.645 + 5.0 * 0.145)).abs() < 1e-9);
    }

    #[test]
    fn test_factor_extraction() {
        let profile = UserProfile {
            age: Some(57),
            clothing: Some(3),
            activity: Some(2),
            sleep: Some(4),
            diabetes: true,
            medications: "furosemide".to_string(),
            ..Default::default()
        };

        assert_eq!(
            VulnerabilityFactors::from_profile(&profile),
            VulnerabilityFactors {
                clothing: 3.0,
                age_bracket: 3,
                activity: 2.0,
                medication_matches: 1,
                comorbidities: 1,
                sleep: 4.0,
            }
        );
    }

    #[test]
    fn test_blank_level_is_nan() {
        let profile = UserProfile {
            sleep: None,
            ..baseline_profile()
        };
        assert!(VulnerabilityScorer::default().score(&profile).is_nan());
    }
}
