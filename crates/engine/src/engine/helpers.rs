// SPDX-License-Identifier: MIT

//!
//! Helper functions
//!

/// Guards every division by a span or count
pub(crate) const EPSILON: f64 = 1e-9;

/// Round an f64 value to the nearest 0.1.  Lane packing compares positions
/// after rounding so that float noise can't move a card between lanes as the
/// zoom changes.
pub(crate) fn round_f64_to_nearest_0_1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round down to a multiple of `step` (towards negative infinity, so BCE
/// years round away from zero)
pub(crate) fn floor_to_step(value: i32, step: i32) -> i32 {
    value.div_euclid(step) * step
}

/// Round up to a multiple of `step`
pub(crate) fn ceiling_to_step(value: i32, step: i32) -> i32 {
    -floor_to_step(-value, step)
}

/// Divide, treating a (near) zero denominator as `EPSILON`
pub(crate) fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < EPSILON {
        numerator / EPSILON.copysign(denominator)
    } else {
        numerator / denominator
    }
}
