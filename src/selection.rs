//! Candidate selection: which eye to track and which circle is the pupil.
//!
//! Both selectors expect a non-empty candidate list. The pipeline guards the
//! call sites; an empty list yields `None` rather than a panic.

use crate::{
    geometry::{Circle, Rect},
    utils::safe_cast::round_f32_to_pixel,
};
use image::GrayImage;

/// Pick the eye rectangle with the smallest top-left x
///
/// Facing the camera, this is the subject's right eye. Ties keep the first
/// rectangle in detector order.
#[must_use]
pub fn select_leftmost_eye(eyes: &[Rect]) -> Option<Rect> {
    eyes.iter().copied().min_by_key(|eye| eye.x)
}

/// Pick the circle covering the darkest region of the eye crop
///
/// Each candidate is scored by summing the intensity of every pixel whose
/// distance from the (rounded) center is strictly less than the (rounded)
/// radius. The lowest sum wins; equal sums resolve to the lowest index.
#[must_use]
pub fn select_pupil(eye: &GrayImage, circles: &[Circle]) -> Option<Circle> {
    circles
        .iter()
        .copied()
        .min_by_key(|circle| intensity_sum(eye, circle))
}

/// Sum of pixel intensities strictly inside `circle`
#[must_use]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)] // Loop bounds are clamped to the image
pub fn intensity_sum(eye: &GrayImage, circle: &Circle) -> u64 {
    let cx = i64::from(round_f32_to_pixel(circle.x));
    let cy = i64::from(round_f32_to_pixel(circle.y));
    let radius = i64::from(round_f32_to_pixel(circle.radius));
    if radius <= 0 {
        return 0;
    }

    let width = i64::from(eye.width());
    let height = i64::from(eye.height());
    let radius_sq = radius * radius;

    let x_range = (cx - radius).max(0)..(cx + radius + 1).min(width);
    let y_range = (cy - radius).max(0)..(cy + radius + 1).min(height);

    let mut sum = 0u64;
    for y in y_range {
        let dy = y - cy;
        for x in x_range.clone() {
            let dx = x - cx;
            if dx * dx + dy * dy < radius_sq {
                sum += u64::from(eye.get_pixel(x as u32, y as u32).0[0]);
            }
        }
    }
    sum
}
