//! Precision policies for percentage coordinates.
//!
//! Values leaving the core (path strings, stored waypoints, exported
//! placements) are rounded to 2 decimal digits so output stays compact and
//! deterministic.

pub const PERCENT_MIN: f64 = 0.0;
pub const PERCENT_MAX: f64 = 100.0;

/// Canonicalize a floating-point value.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        // Handles +0.0 and -0.0.
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Rounds to 2 decimal digits, half away from zero.
pub fn round2(v: f64) -> f64 {
    canonical_f64((v * 100.0).round() / 100.0)
}

/// Clamps into `[0, 100]`. NaN maps to `0`.
pub fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() {
        return PERCENT_MIN;
    }
    canonical_f64(v.clamp(PERCENT_MIN, PERCENT_MAX))
}
