//! Detector collaborators used by the tracking pipeline.
//!
//! The pipeline only depends on these traits. The `OpenCV` backend provides
//! Haar cascade and Hough gradient implementations; tests substitute fakes.

use crate::{
    constants::{
        DEFAULT_CENTER_DISTANCE_DIVISOR, DEFAULT_EYE_MIN_SIZE, DEFAULT_FACE_MIN_SIZE, DEFAULT_HOUGH_DP,
        DEFAULT_HOUGH_PARAM1, DEFAULT_HOUGH_PARAM2, DEFAULT_MAX_RADIUS_DIVISOR, DEFAULT_MIN_NEIGHBORS,
        DEFAULT_MIN_RADIUS_DIVISOR, DEFAULT_SCALE_FACTOR,
    },
    geometry::{Circle, Rect},
    Result,
};
use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Parameters of a multi-scale pattern search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionParams {
    /// Scale step between pyramid levels
    pub scale_factor: f64,
    /// Overlapping hits required to keep a match
    pub min_neighbors: i32,
    /// Smallest reported width and height
    pub min_size: u32,
}

impl DetectionParams {
    /// Default face search
    #[must_use]
    pub const fn face() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            min_size: DEFAULT_FACE_MIN_SIZE,
        }
    }

    /// Default eye search
    #[must_use]
    pub const fn eye() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            min_size: DEFAULT_EYE_MIN_SIZE,
        }
    }
}

/// Finds rectangles where a trained pattern (face, eye) matches
pub trait PatternDetector {
    /// Detect all matches in a grayscale image
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying detector fails
    fn detect(&mut self, image: &GrayImage, params: &DetectionParams) -> Result<Vec<Rect>>;
}

/// Detector that never matches; stands in for a model that was not loaded
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDetections;

impl PatternDetector for NoDetections {
    fn detect(&mut self, _image: &GrayImage, _params: &DetectionParams) -> Result<Vec<Rect>> {
        Ok(Vec::new())
    }
}

/// Hough gradient parameters, sized relative to the eye crop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleSettings {
    /// Inverse accumulator resolution
    pub dp: f64,
    /// Upper edge threshold
    pub param1: f64,
    /// Accumulator vote threshold
    pub param2: f64,
    /// Crop width / this = minimum distance between centers
    pub center_distance_divisor: u32,
    /// Crop height / this = minimum radius
    pub min_radius_divisor: u32,
    /// Crop height / this = maximum radius
    pub max_radius_divisor: u32,
}

impl Default for CircleSettings {
    fn default() -> Self {
        Self {
            dp: DEFAULT_HOUGH_DP,
            param1: DEFAULT_HOUGH_PARAM1,
            param2: DEFAULT_HOUGH_PARAM2,
            center_distance_divisor: DEFAULT_CENTER_DISTANCE_DIVISOR,
            min_radius_divisor: DEFAULT_MIN_RADIUS_DIVISOR,
            max_radius_divisor: DEFAULT_MAX_RADIUS_DIVISOR,
        }
    }
}

impl CircleSettings {
    /// Concrete parameters for an eye crop of the given size
    ///
    /// Divisors of zero are treated as one.
    #[must_use]
    pub fn for_crop(&self, width: u32, height: u32) -> HoughParams {
        HoughParams {
            dp: self.dp,
            min_distance: f64::from(width / self.center_distance_divisor.max(1)),
            param1: self.param1,
            param2: self.param2,
            min_radius: height / self.min_radius_divisor.max(1),
            max_radius: height / self.max_radius_divisor.max(1),
        }
    }
}

/// Hough gradient parameters for one crop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoughParams {
    /// Inverse accumulator resolution
    pub dp: f64,
    /// Minimum distance between detected centers
    pub min_distance: f64,
    /// Upper edge threshold
    pub param1: f64,
    /// Accumulator vote threshold
    pub param2: f64,
    /// Smallest radius searched
    pub min_radius: u32,
    /// Largest radius searched
    pub max_radius: u32,
}

/// Finds ring-shaped edge structures in a grayscale region
pub trait CircleFinder {
    /// Detect candidate circles
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying detector fails
    fn find_circles(&mut self, image: &GrayImage, params: &HoughParams) -> Result<Vec<Circle>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_detections() {
        let image = GrayImage::new(8, 8);
        assert!(NoDetections.detect(&image, &DetectionParams::eye()).unwrap().is_empty());
    }

    #[test]
    fn test_hough_params_for_crop() {
        let params = CircleSettings::default().for_crop(64, 48);
        assert_eq!(params.min_distance, 8.0);
        assert_eq!(params.min_radius, 6);
        assert_eq!(params.max_radius, 16);
        assert_eq!(params.param1, 250.0);
        assert_eq!(params.param2, 15.0);
    }

    #[test]
    fn test_zero_divisor_does_not_panic() {
        let settings = CircleSettings {
            min_radius_divisor: 0,
            ..CircleSettings::default()
        };
        assert_eq!(settings.for_crop(10, 30).min_radius, 30);
    }

    #[test]
    fn test_detection_defaults() {
        assert_eq!(DetectionParams::face().min_size, 150);
        assert_eq!(DetectionParams::eye().min_size, 30);
        assert_eq!(DetectionParams::face().scale_factor, 1.1);
        assert_eq!(DetectionParams::eye().min_neighbors, 2);
    }
}
