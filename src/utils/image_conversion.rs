//! Conversions between `OpenCV` `Mat` and `image` buffers.

use crate::{utils::safe_cast::u32_to_i32, Error, Result};
use image::{GrayImage, RgbImage};
use opencv::{
    core::{Mat, Scalar, CV_8UC1, CV_8UC3},
    imgproc,
    prelude::*,
};

/// Copy a grayscale image into a single-channel `Mat`
///
/// # Errors
///
/// Returns an error if the dimensions do not fit an `OpenCV` matrix
pub fn gray_to_mat(image: &GrayImage) -> Result<Mat> {
    let rows = u32_to_i32(image.height())?;
    let cols = u32_to_i32(image.width())?;

    let mut mat = Mat::new_rows_cols_with_default(rows, cols, CV_8UC1, Scalar::all(0.0))?;
    mat.data_bytes_mut()?.copy_from_slice(image.as_raw());
    Ok(mat)
}

/// Copy an RGB image into a BGR `Mat` for drawing and display
///
/// # Errors
///
/// Returns an error if the dimensions do not fit an `OpenCV` matrix
pub fn rgb_to_bgr_mat(image: &RgbImage) -> Result<Mat> {
    let rows = u32_to_i32(image.height())?;
    let cols = u32_to_i32(image.width())?;

    let mut rgb = Mat::new_rows_cols_with_default(rows, cols, CV_8UC3, Scalar::all(0.0))?;
    rgb.data_bytes_mut()?.copy_from_slice(image.as_raw());

    let mut bgr = Mat::default();
    imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
    Ok(bgr)
}

/// Convert a captured BGR `Mat` into an RGB image
///
/// # Errors
///
/// Returns an error if the matrix is not an 8-bit, 3-channel image
#[allow(clippy::cast_sign_loss)] // Dimensions checked positive
pub fn bgr_mat_to_rgb(mat: &Mat) -> Result<RgbImage> {
    let rows = mat.rows();
    let cols = mat.cols();

    if rows <= 0 || cols <= 0 || mat.typ() != CV_8UC3 {
        return Err(Error::InvalidInput(format!(
            "Expected non-empty 8-bit BGR frame, got {}x{} of type {}",
            cols,
            rows,
            mat.typ()
        )));
    }

    let mut rgb = Mat::default();
    imgproc::cvt_color(mat, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;

    RgbImage::from_raw(cols as u32, rows as u32, rgb.data_bytes()?.to_vec())
        .ok_or_else(|| Error::InvalidInput("Frame buffer size does not match its dimensions".to_string()))
}
