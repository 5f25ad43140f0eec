//! Checked numeric conversions between image, circle and cursor coordinates

use crate::{Error, Result};

/// Convert a pixel dimension to `i32`
///
/// # Errors
///
/// Returns an error if the value exceeds `i32::MAX`
pub fn u32_to_i32(value: u32) -> Result<i32> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Dimension {value} too large to fit in i32")))
}

/// Round an `f64` coordinate to the nearest `i32`
///
/// # Errors
///
/// Returns an error if the value is not finite or outside the `i32` range
#[allow(clippy::cast_possible_truncation)] // Truncation after bounds check is safe
pub fn round_f64_to_i32(value: f64) -> Result<i32> {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX) {
        Ok(rounded as i32)
    } else {
        Err(Error::InvalidInput(format!(
            "Coordinate {value} cannot be represented as a pixel position"
        )))
    }
}

/// Round an `f32` circle parameter to the nearest pixel, saturating at the `i32` range
///
/// Non-finite values map to 0 so a malformed candidate covers no pixels.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // `as` saturates for f32 -> i32
pub fn round_f32_to_pixel(value: f32) -> i32 {
    if value.is_finite() {
        value.round() as i32
    } else {
        0
    }
}

/// Clamp a coordinate into `[min, max]` and round it to `i32`
///
/// Non-finite values map to `min`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn clamp_f64_to_i32(value: f64, min: i32, max: i32) -> i32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.round().clamp(f64::from(min), f64::from(max));
    (clamped as i32).clamp(min, max)
}
