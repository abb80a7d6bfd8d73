//! Angle normalization.
//!
//! Everything that touches longitude goes through [`normalize`]. The offset
//! selects the window: the result always lies in `[-offset, 360 - offset)`,
//! so the default offset of 180 yields `[-180, 180)` and an offset of
//! `180 - reference` yields the window centred on `reference`.

use crate::core::constants::DEFAULT_ANGLE_OFFSET;

/// True mathematical modulo: the result has the sign of `divisor`.
pub fn floor_mod(value: f64, divisor: f64) -> f64 {
    let r = value % divisor;
    if r < 0.0 {
        // `r + divisor` can round up to exactly `divisor` for tiny negative `r`
        let wrapped = r + divisor;
        if wrapped >= divisor {
            0.0
        } else {
            wrapped
        }
    } else {
        r
    }
}

/// Reduce `angle` (degrees) into `[-offset, 360 - offset)`.
pub fn normalize(angle: f64, offset: f64) -> f64 {
    floor_mod(angle + offset, 360.0) - offset
}

/// Normalize a longitude into the canonical `[-180, 180)` window.
pub fn normalize_lng(lng: f64) -> f64 {
    normalize(lng, DEFAULT_ANGLE_OFFSET)
}

/// Pick the representation of `lng` that lies within 180° of `reference`.
pub fn rectify_lng(lng: f64, reference: f64) -> f64 {
    normalize(lng, 180.0 - reference)
}
