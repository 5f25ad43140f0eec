//! Image preprocessing for the tracking pipeline: grayscale conversion,
//! contrast equalization and cropping.

use crate::{constants::INTENSITY_LEVELS, geometry::Rect, utils::clip_rect};
use image::{imageops, GrayImage, Luma, Rgb, RgbImage};

// BT.601 luma weights in 14-bit fixed point, as used by OpenCV's BGR2GRAY
const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

/// Convert a color frame to grayscale with BT.601 weights
///
/// The Haar cascades were trained on this luma, so `imageops::grayscale`
/// (Rec. 709 weights) is not used here.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Weights sum to 1 << LUMA_SHIFT
pub fn to_grayscale(frame: &RgbImage) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        let Rgb([r, g, b]) = *frame.get_pixel(x, y);
        let weighted = u32::from(r) * LUMA_R + u32::from(g) * LUMA_G + u32::from(b) * LUMA_B;
        Luma([((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8])
    })
}

/// Equalize the histogram of a grayscale image in place
///
/// The lookup table maps each level to its cumulative count scaled by
/// `255 / (total - n_first)`, where `n_first` is the population of the lowest
/// occupied level. An image with a single intensity is left unchanged.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Scaled values lie in 0..=255
#[allow(clippy::cast_precision_loss)]
pub fn equalize_histogram(image: &mut GrayImage) {
    let total = image.as_raw().len();
    if total == 0 {
        return;
    }

    let mut histogram = [0usize; INTENSITY_LEVELS];
    for &value in image.as_raw() {
        histogram[usize::from(value)] += 1;
    }

    let Some(first) = histogram.iter().position(|&count| count > 0) else {
        return;
    };
    if histogram[first] == total {
        return;
    }

    let scale = 255.0 / (total - histogram[first]) as f64;
    let mut lut = [0u8; INTENSITY_LEVELS];
    let mut cumulative = 0usize;
    for level in (first + 1)..INTENSITY_LEVELS {
        cumulative += histogram[level];
        lut[level] = (cumulative as f64 * scale).round().clamp(0.0, 255.0) as u8;
    }

    for pixel in image.pixels_mut() {
        let Luma([value]) = *pixel;
        *pixel = Luma([lut[usize::from(value)]]);
    }
}

/// Copy the part of `image` covered by `rect` into a new buffer
///
/// The rectangle is clipped to the image first; `None` means the clipped
/// region is empty.
#[must_use]
#[allow(clippy::cast_sign_loss)] // Clipped rectangles are non-negative
pub fn crop(image: &GrayImage, rect: &Rect) -> Option<GrayImage> {
    let clipped = clip_rect(rect, image.width(), image.height())?;
    Some(
        imageops::crop_imm(
            image,
            clipped.x as u32,
            clipped.y as u32,
            clipped.width as u32,
            clipped.height as u32,
        )
        .to_image(),
    )
}
