//! Composite heat risk
//!
//! Blends the physiological, environmental and personal scores into the final
//! heat risk. Each input is divided by the top of its nominal range before
//! weighting, so a wearer at the top of every scale lands near 1.

/// Nominal top of the mPSI scale
pub const MPSI_SCALE: f64 = 10.0;

/// Highest heat risk level
pub const RISK_LEVEL_SCALE: f64 = 5.0;

/// Nominal top of the personal vulnerability scale
pub const PERSONAL_SCALE: f64 = 5.0;

pub const MPSI_WEIGHT: f64 = 0.4;
pub const RISK_LEVEL_WEIGHT: f64 = 0.4;
pub const PERSONAL_WEIGHT: f64 = 0.2;

/// Final heat risk score. NaN in any input yields NaN.
pub fn final_score(mpsi: f64, risk_level: Option<u8>, personal_score: f64) -> f64 {
    let level = risk_level.map(f64::from).unwrap_or(f64::NAN);

    MPSI_WEIGHT * (mpsi / MPSI_SCALE)
        + RISK_LEVEL_WEIGHT * (level / RISK_LEVEL_SCALE)
        + PERSONAL_WEIGHT * (personal_score / PERSONAL_SCALE)
}
