//! Environmental heat index
//!
//! Apparent temperature from ambient temperature and relative humidity using the
//! NWS Rothfusz regression, plus the discrete risk level derived from it.

/// Below this ambient temperature (°F) the heat index equals the air temperature
pub const REGRESSION_THRESHOLD_F: f64 = 80.0;

/// Upper bounds (exclusive) of risk levels 1 to 4; anything else is level 5
const RISK_LEVEL_BOUNDS_F: [f64; 4] = [80.0, 91.0, 103.0, 125.0];

/// Heat index (°F) for a relative humidity (%) and air temperature (°F)
pub fn heat_index(humidity_pct: f64, ambient_temp_f: f64) -> f64 {
    let t = ambient_temp_f;
    let r = humidity_pct;

    if t < REGRESSION_THRESHOLD_F {
        return t;
    }

    let mut hi = -42.379 + 2.04901523 * t + 10.14333127 * r
        - 0.22475541 * t * r
        - 6.83783e-3 * t * t
        - 5.481717e-2 * r * r
        + 1.22874e-3 * t * t * r
        + 8.5282e-4 * t * r * r
        - 1.99e-6 * t * t * r * r;

    if r < 13.0 && t <= 112.0 {
        hi -= ((13.0 - r) / 4.0) * ((17.0 - (t - 95.0).abs()) * 0.05882).sqrt();
    } else if r > 85.0 && t <= 87.0 {
        hi += ((r - 85.0) / 10.0) * ((87.0 - t) / 5.0);
    }

    hi
}

/// Heat risk level (1-5) for a heat index; `None` when the index is NaN
pub fn risk_level(heat_index_f: f64) -> Option<u8> {
    if heat_index_f.is_nan() {
        return None;
    }

    let below = RISK_LEVEL_BOUNDS_F
        .iter()
        .position(|&bound| heat_index_f < bound)
        .unwrap_or(RISK_LEVEL_BOUNDS_F.len());
    Some(below as u8 + 1)
}

/// Heat index from possibly missing readings; missing inputs yield NaN
pub fn heat_index_from(humidity_pct: Option<f64>, ambient_temp_f: Option<f64>) -> f64 {
    heat_index(
        humidity_pct.unwrap_or(f64::NAN),
        ambient_temp_f.unwrap_or(f64::NAN),
    )
}
