//! `OpenCV` implementations of the pipeline collaborators.
//!
//! Haar cascades for face and eye detection, the Hough gradient method for
//! pupil candidates, `VideoCapture` for frames and HighGUI for display.

use crate::{
    app::{FrameSink, FrameSource, GuiMode, VideoSource},
    detection::{CircleFinder, DetectionParams, HoughParams, PatternDetector},
    error::{Error, ModelKind, Result},
    geometry::{Circle, Rect},
    pipeline::FrameReport,
    utils::{
        image_conversion::{bgr_mat_to_rgb, gray_to_mat, rgb_to_bgr_mat},
        safe_cast::{round_f64_to_i32, u32_to_i32},
    },
};
use image::{GrayImage, RgbImage};
use log::info;
use opencv::{
    core::{self, Mat, Point, Scalar, Size, Vec3f, Vector},
    highgui::{self, WINDOW_AUTOSIZE},
    imgproc::{self, LINE_8},
    objdetect::{self, CascadeClassifier},
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE},
};
use std::path::Path;

const CAMERA_WINDOW: &str = "Webcam";
const EYE_WINDOW: &str = "Eye";

/// Haar cascade pattern detector
pub struct CascadeDetector {
    classifier: CascadeClassifier,
}

impl CascadeDetector {
    /// Load a cascade model from disk
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelLoad`] naming `kind` if the file is missing or invalid
    pub fn load<P: AsRef<Path>>(path: P, kind: ModelKind) -> Result<Self> {
        let path = path.as_ref();
        let load_error = || Error::ModelLoad {
            kind,
            path: path.to_path_buf(),
        };

        let path_str = path.to_str().ok_or_else(load_error)?;
        let mut classifier = CascadeClassifier::default()?;
        if !classifier.load(path_str).unwrap_or(false) || classifier.empty()? {
            return Err(load_error());
        }

        info!("Loaded {} cascade from {}", kind, path.display());
        Ok(Self { classifier })
    }
}

impl PatternDetector for CascadeDetector {
    fn detect(&mut self, image: &GrayImage, params: &DetectionParams) -> Result<Vec<Rect>> {
        let mat = gray_to_mat(image)?;
        let min_side = u32_to_i32(params.min_size)?;

        let mut objects = Vector::<core::Rect>::new();
        self.classifier.detect_multi_scale(
            &mat,
            &mut objects,
            params.scale_factor,
            params.min_neighbors,
            objdetect::CASCADE_SCALE_IMAGE,
            Size::new(min_side, min_side),
            Size::default(),
        )?;

        Ok(objects
            .iter()
            .map(|r| Rect::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}

/// Hough gradient circle finder
#[derive(Debug, Default, Clone, Copy)]
pub struct HoughCircleFinder;

impl CircleFinder for HoughCircleFinder {
    fn find_circles(&mut self, image: &GrayImage, params: &HoughParams) -> Result<Vec<Circle>> {
        let mat = gray_to_mat(image)?;

        let mut circles = Vector::<Vec3f>::new();
        imgproc::hough_circles(
            &mat,
            &mut circles,
            imgproc::HOUGH_GRADIENT,
            params.dp,
            params.min_distance,
            params.param1,
            params.param2,
            u32_to_i32(params.min_radius)?,
            u32_to_i32(params.max_radius)?,
        )?;

        Ok(circles.iter().map(|c| Circle::new(c[0], c[1], c[2])).collect())
    }
}

/// Webcam or video file frame source
pub struct CaptureSource {
    capture: VideoCapture,
}

impl CaptureSource {
    /// Open a capture device or file
    ///
    /// # Errors
    ///
    /// Returns [`Error::CaptureUnavailable`] if the source cannot be opened
    pub fn open(source: &VideoSource) -> Result<Self> {
        let capture = match source {
            VideoSource::Camera(index) => {
                info!("Opening camera {}", index);
                let mut cap = VideoCapture::new(*index, videoio::CAP_ANY)?;
                if cap.is_opened()? {
                    // Keep latency low: always process the newest frame
                    cap.set(CAP_PROP_BUFFERSIZE, 1.0)?;
                }
                cap
            }
            VideoSource::File(path) => {
                info!("Opening video file: {}", path);
                VideoCapture::from_file(path, videoio::CAP_ANY)?
            }
        };

        if !capture.is_opened()? {
            return Err(Error::CaptureUnavailable(match source {
                VideoSource::Camera(index) => format!("Webcam {index} not detected"),
                VideoSource::File(path) => format!("Cannot open video file {path}"),
            }));
        }

        Ok(Self { capture })
    }
}

impl FrameSource for CaptureSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        bgr_mat_to_rgb(&frame).map(Some)
    }
}

/// HighGUI windows with tracking overlays
pub struct HighGuiSink {
    mode: GuiMode,
    wait_ms: i32,
}

impl HighGuiSink {
    /// Create the windows for `mode`
    ///
    /// # Errors
    ///
    /// Returns an error if a window cannot be created
    pub fn new(mode: GuiMode, wait_ms: i32) -> Result<Self> {
        if mode != GuiMode::None {
            highgui::named_window(CAMERA_WINDOW, WINDOW_AUTOSIZE)?;
        }
        if mode == GuiMode::All {
            highgui::named_window(EYE_WINDOW, WINDOW_AUTOSIZE)?;
        }
        Ok(Self { mode, wait_ms })
    }

    fn draw_overlays(frame: &mut Mat, report: &FrameReport) -> Result<()> {
        let Some(face) = report.face else {
            return Ok(());
        };
        imgproc::rectangle(frame, to_cv_rect(&face), Scalar::new(255.0, 0.0, 0.0, 0.0), 2, LINE_8, 0)?;

        for eye in &report.eyes {
            imgproc::rectangle(
                frame,
                to_cv_rect(&eye.offset_by(&face)),
                Scalar::new(0.0, 255.0, 0.0, 0.0),
                2,
                LINE_8,
                0,
            )?;
        }

        if let (Some(eye), Some(center), Some(pupil)) = (report.tracked_eye, report.stabilized, report.pupil) {
            let in_frame = center.to_frame(&eye.offset_by(&face));
            imgproc::circle(
                frame,
                Point::new(round_f64_to_i32(in_frame.x)?, round_f64_to_i32(in_frame.y)?),
                round_f64_to_i32(f64::from(pupil.radius))?,
                Scalar::new(0.0, 0.0, 255.0, 0.0),
                2,
                LINE_8,
                0,
            )?;
        }

        Ok(())
    }

    fn eye_view(report: &FrameReport) -> Result<Option<Mat>> {
        let Some(crop) = &report.eye_crop else {
            return Ok(None);
        };
        let mut mat = gray_to_mat(crop)?;

        if let (Some(center), Some(pupil)) = (report.stabilized, report.pupil) {
            imgproc::circle(
                &mut mat,
                Point::new(round_f64_to_i32(center.x)?, round_f64_to_i32(center.y)?),
                round_f64_to_i32(f64::from(pupil.radius))?,
                Scalar::all(255.0),
                2,
                LINE_8,
                0,
            )?;
        }
        Ok(Some(mat))
    }
}

impl FrameSink for HighGuiSink {
    fn present(&mut self, frame: &RgbImage, report: &FrameReport) -> Result<()> {
        if self.mode == GuiMode::None {
            return Ok(());
        }

        let mut display = rgb_to_bgr_mat(frame)?;
        Self::draw_overlays(&mut display, report)?;
        highgui::imshow(CAMERA_WINDOW, &display)?;

        if self.mode == GuiMode::All {
            if let Some(eye) = Self::eye_view(report)? {
                highgui::imshow(EYE_WINDOW, &eye)?;
            }
        }
        Ok(())
    }

    fn stop_requested(&mut self) -> Result<bool> {
        if self.mode == GuiMode::None {
            return Ok(false);
        }
        Ok(highgui::wait_key(self.wait_ms)? >= 0)
    }
}

fn to_cv_rect(rect: &Rect) -> core::Rect {
    core::Rect::new(rect.x, rect.y, rect.width, rect.height)
}
