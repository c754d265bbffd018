//! Physiological strain estimation
//!
//! This module derives the modified Physiological Strain Index (mPSI) from the
//! rise of skin temperature above the baseline floor and the working heart rate
//! implied by the user's work intensity.
//! - Temperature term: 0-5 between the floor and an age-adjusted core ceiling
//! - Heart-rate term: 0-5 between resting and age-predicted maximum heart rate
//!
//! Neither term is clamped. Degenerate denominators yield inf or NaN, which the
//! presentation layer reports as invalid.

use crate::personal::age_bracket;
use crate::types::UserProfile;

/// Core temperature ceiling before the age adjustment (°C, 103.1 °F)
pub const CORE_CEILING_C: f64 = 39.5;

/// Ceiling reduction per age bracket (°C)
pub const CEILING_STEP_PER_BRACKET_C: f64 = 0.25;

/// Upper bound of the age-predicted maximum heart rate formula
pub const MAX_HR_INTERCEPT: f64 = 220.0;

/// Weight of each mPSI term
const TERM_SCALE: f64 = 5.0;

/// Fraction of heart rate reserve used by a work intensity category.
/// Categories outside 1-8 use none of it.
pub fn work_intensity_fraction(category: i64) -> f64 {
    match category {
        1 => 0.30,
        2 => 0.35,
        3 => 0.40,
        4 => 0.43,
        5 => 0.48,
        6 | 7 => 0.50,
        8 => 0.60,
        _ => 0.0,
    }
}

/// Estimated working heart rate (bpm)
pub fn estimate_heart_rate(resting_hr: f64, age: f64, category: i64) -> f64 {
    let reserve = MAX_HR_INTERCEPT - age - resting_hr;
    resting_hr + (reserve * work_intensity_fraction(category)).floor()
}

/// Age-predicted maximum heart rate (bpm)
pub fn max_heart_rate(age: f64) -> f64 {
    MAX_HR_INTERCEPT - age
}

/// Skin temperature ceiling for an age bracket (°F)
pub fn temperature_ceiling_f(bracket: u8) -> f64 {
    celsius_to_fahrenheit(CORE_CEILING_C - CEILING_STEP_PER_BRACKET_C * f64::from(bracket))
}

/// Temperature term of the mPSI
pub fn temperature_strain(current_skin_f: f64, baseline_min_f: f64, ceiling_f: f64) -> f64 {
    TERM_SCALE * (current_skin_f - baseline_min_f) / (ceiling_f - baseline_min_f)
}

/// Heart-rate term of the mPSI
pub fn heart_rate_strain(estimated_hr: f64, resting_hr: f64, max_hr: f64) -> f64 {
    TERM_SCALE * (estimated_hr - resting_hr) / (max_hr - resting_hr)
}

/// Modified Physiological Strain Index.
///
/// A missing skin sample, age or resting heart rate makes the result NaN.
pub fn mpsi(current_skin_f: Option<f64>, baseline_min_f: f64, profile: &UserProfile) -> f64 {
    let skin = current_skin_f.unwrap_or(f64::NAN);
    let age = profile.age.map(f64::from).unwrap_or(f64::NAN);
    let resting_hr = profile.resting_hr.map(f64::from).unwrap_or(f64::NAN);

    let ceiling_f = temperature_ceiling_f(age_bracket(profile.age));
    let estimated_hr = estimate_heart_rate(resting_hr, age, profile.work_intensity);

    temperature_strain(skin, baseline_min_f, ceiling_f)
        + heart_rate_strain(estimated_hr, resting_hr, max_heart_rate(age))
}

fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile(age: u32, resting_hr: u32, work_intensity: i64) -> UserProfile {
        UserProfile {
            age: Some(age),
            resting_hr: Some(resting_hr),
            work_intensity,
            ..Default::default()
        }
    }

    #[test]
    fn test_estimate_heart_rate() {
        // reserve 220 - 22 - 70 = 128, 128 * 0.48 = 61.44 -> 61
        assert_eq!(estimate_heart_rate(70.0, 22.0, 5), 131.0);
        // reserve 100, 100 * 0.6 = 60
        assert_eq!(estimate_heart_rate(60.0, 60.0, 8), 120.0);
    }

    #[test]
    fn test_unmapped_category_is_resting() {
        for category in [0, 9, 300, -1, i64::MIN] {
            assert_eq!(work_intensity_fraction(category), 0.0);
            assert_eq!(estimate_heart_rate(70.0, 22.0, category), 70.0);
        }
    }

    #[test]
    fn test_out_of_range_category_scores_like_rest() {
        let at_rest = mpsi(Some(92.0), 90.0, &profile(22, 70, 0));
        assert_eq!(mpsi(Some(92.0), 90.0, &profile(22, 70, 300)), at_rest);
        assert_eq!(mpsi(Some(92.0), 90.0, &profile(22, 70, -1)), at_rest);
    }

    #[test]
    fn test_ceiling_is_age_adjusted() {
        assert!((temperature_ceiling_f(0) - 103.1).abs() < 1e-9);
        // 39.25 °C
        assert!((temperature_ceiling_f(1) - 102.65).abs() < 1e-9);
        // 38.25 °C
        assert!((temperature_ceiling_f(5) - 100.85).abs() < 1e-9);
    }

    #[test]
    fn test_mpsi_components() {
        let p = profile(22, 70, 5);
        let value = mpsi(Some(95.0), 90.0, &p);

        let temp_term = 5.0 * 5.0 / (102.65 - 90.0);
        let hr_term = 5.0 * 61.0 / 128.0;
        assert!((value - (temp_term + hr_term)).abs() < 1e-9);
    }

    #[test]
    fn test_mpsi_at_floor_and_rest() {
        let p = profile(42, 65, 0);
        assert_eq!(mpsi(Some(90.0), 90.0, &p), 0.0);
    }

    #[test]
    fn test_mpsi_is_not_clamped() {
        let p = profile(22, 70, 8);
        let value = mpsi(Some(115.0), 85.0, &p);
        assert!(value > 10.0);

        let below_floor = mpsi(Some(80.0), 90.0, &profile(22, 70, 0));
        assert!(below_floor < 0.0);
    }

    #[test]
    fn test_mpsi_missing_skin_is_nan() {
        assert!(mpsi(None, 90.0, &profile(22, 70, 3)).is_nan());
    }

    #[test]
    fn test_mpsi_missing_age_is_nan() {
        let p = UserProfile {
            resting_hr: Some(70),
            work_intensity: 3,
            ..Default::default()
        };
        assert!(mpsi(Some(92.0), 90.0, &p).is_nan());
    }

    #[test]
    fn test_mpsi_degenerate_floor_propagates() {
        // floor sitting on the ceiling: 0/0 in the temperature term
        let ceiling = temperature_ceiling_f(1);
        assert!(mpsi(Some(ceiling), ceiling, &profile(22, 70, 3)).is_nan());

        // resting rate equal to the predicted max: x/0 in the heart-rate term
        let value = mpsi(Some(92.0), 90.0, &profile(22, 198, 3));
        assert!(!value.is_finite());
    }

    proptest! {
        #[test]
        fn prop_heart_rate_non_decreasing_in_intensity(
            age in 18u32..80,
            resting_hr in 40u32..100,
            a in 1i64..=8,
            b in 1i64..=8,
        ) {
            let age = f64::from(age);
            let resting_hr = f64::from(resting_hr);
            prop_assume!(MAX_HR_INTERCEPT - age - resting_hr > 0.0);

            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                estimate_heart_rate(resting_hr, age, low)
                    <= estimate_heart_rate(resting_hr, age, high)
            );
        }
    }
}
