//! Per-frame pupil tracking pipeline.
//!
//! Each frame goes through these stages, stopping at the first one that
//! finds nothing:
//!
//! 1. grayscale conversion and histogram equalization
//! 2. face detection; only the first face is used. In face-only mode the
//!    frame ends here with the face center logged
//! 3. eye detection inside the face; exactly two eyes are required
//! 4. the leftmost eye is cropped and equalized
//! 5. circle detection inside the eye crop
//! 6. the darkest circle is the pupil; its center feeds the session history,
//!    the stabilized center drives the cursor
//!
//! Skipped frames are normal (blinks, head turned away) and leave the cursor
//! where it was. Mutable tracking state lives in a [`TrackingSession`] owned
//! by the caller.

use crate::{
    config::{ClampTarget, Config},
    constants::REQUIRED_EYE_COUNT,
    cursor_control::PointerDevice,
    detection::{CircleFinder, CircleSettings, DetectionParams, PatternDetector},
    geometry::{Circle, EyePoint, Rect, ScreenPoint},
    motion::{Bounds, CursorState, MotionMapper},
    preprocess::{crop, equalize_histogram, to_grayscale},
    selection::{select_leftmost_eye, select_pupil},
    stabilizer::{PositionHistory, PositionStabilizer},
    utils::safe_cast::clamp_f64_to_i32,
    Result,
};
use image::{GrayImage, RgbImage};
use log::{info, trace};

/// Tracking state carried from frame to frame
#[derive(Debug, Clone)]
pub struct TrackingSession {
    history: PositionHistory,
    cursor: CursorState,
}

impl TrackingSession {
    /// Start a session with the cursor at `initial_cursor`
    #[must_use]
    pub fn new(initial_cursor: ScreenPoint, history_capacity: usize) -> Self {
        Self {
            history: PositionHistory::new(history_capacity),
            cursor: CursorState::new(initial_cursor),
        }
    }

    /// Build a session from configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ScreenPoint::new(config.cursor.initial_x, config.cursor.initial_y),
            config.stabilizer.history_capacity,
        )
    }

    /// Pupil centers observed so far
    #[must_use]
    pub const fn history(&self) -> &PositionHistory {
        &self.history
    }

    /// Current cursor position
    #[must_use]
    pub const fn cursor(&self) -> ScreenPoint {
        self.cursor.cursor
    }

    /// Cursor plus the last stabilized center
    #[must_use]
    pub const fn cursor_state(&self) -> &CursorState {
        &self.cursor
    }
}

/// Why a frame stopped before the cursor was updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No face in the frame
    NoFace,
    /// Eye detector did not return exactly two eyes
    EyeCount(usize),
    /// A detected region did not overlap the image
    EmptyCrop,
    /// No circle candidates in the eye crop
    NoCircles,
}

/// Terminal state of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Pupil located and cursor updated
    Tracked,
    /// Face located in face-only mode; eyes and cursor untouched
    FaceOnly,
    /// Pipeline stopped early
    Skipped(SkipReason),
}

/// Everything found in one frame, for overlays and diagnostics
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// Terminal state
    pub outcome: FrameOutcome,
    /// Face rectangle in frame coordinates
    pub face: Option<Rect>,
    /// Eye rectangles in face coordinates; only filled when exactly two were found
    pub eyes: Vec<Rect>,
    /// Tracked eye in face coordinates
    pub tracked_eye: Option<Rect>,
    /// Equalized crop of the tracked eye
    pub eye_crop: Option<GrayImage>,
    /// Selected pupil circle in eye-crop coordinates
    pub pupil: Option<Circle>,
    /// Stabilized pupil center in eye-crop coordinates
    pub stabilized: Option<EyePoint>,
    /// Cursor position emitted this frame
    pub cursor: Option<ScreenPoint>,
}

impl FrameReport {
    fn empty() -> Self {
        Self {
            outcome: FrameOutcome::Skipped(SkipReason::NoFace),
            face: None,
            eyes: Vec::new(),
            tracked_eye: None,
            eye_crop: None,
            pupil: None,
            stabilized: None,
            cursor: None,
        }
    }

    fn skipped(reason: SkipReason) -> Self {
        Self::empty().skip(reason)
    }

    fn skip(mut self, reason: SkipReason) -> Self {
        trace!("Frame skipped: {:?}", reason);
        self.outcome = FrameOutcome::Skipped(reason);
        self
    }

    /// True when the cursor was updated
    #[must_use]
    pub fn is_tracked(&self) -> bool {
        self.outcome == FrameOutcome::Tracked
    }
}

/// Tunable parameters of the pipeline
#[derive(Debug, Clone, Copy)]
pub struct TrackerSettings {
    /// Face cascade search
    pub face: DetectionParams,
    /// Eye cascade search
    pub eye: DetectionParams,
    /// Pupil circle search
    pub circles: CircleSettings,
    /// Pupil smoothing
    pub stabilizer: PositionStabilizer,
    /// Pupil delta to cursor mapping
    pub motion: MotionMapper,
    /// Cursor clamping surface
    pub clamp_to: ClampTarget,
    /// Stop after face detection
    pub face_only: bool,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            face: DetectionParams::face(),
            eye: DetectionParams::eye(),
            circles: CircleSettings::default(),
            stabilizer: PositionStabilizer::default(),
            motion: MotionMapper::default(),
            clamp_to: ClampTarget::Frame,
            face_only: false,
        }
    }
}

impl From<&Config> for TrackerSettings {
    fn from(config: &Config) -> Self {
        Self {
            face: config.detection.face,
            eye: config.detection.eye,
            circles: config.circles,
            stabilizer: PositionStabilizer::new(config.stabilizer.window_size),
            motion: MotionMapper::new(config.cursor.gain_x, config.cursor.gain_y)
                .inverted(config.cursor.invert_x, config.cursor.invert_y),
            clamp_to: config.cursor.clamp_to,
            face_only: config.detection.face_only,
        }
    }
}

/// Pupil tracker wired to its detector collaborators
pub struct EyeTracker {
    face_detector: Box<dyn PatternDetector>,
    eye_detector: Box<dyn PatternDetector>,
    circle_finder: Box<dyn CircleFinder>,
    settings: TrackerSettings,
}

impl EyeTracker {
    /// Create a tracker from its collaborators
    #[must_use]
    pub fn new(
        face_detector: Box<dyn PatternDetector>,
        eye_detector: Box<dyn PatternDetector>,
        circle_finder: Box<dyn CircleFinder>,
        settings: TrackerSettings,
    ) -> Self {
        Self {
            face_detector,
            eye_detector,
            circle_finder,
            settings,
        }
    }

    /// Active settings
    #[must_use]
    pub const fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Process a color frame
    ///
    /// # Errors
    ///
    /// Returns an error only when a collaborator fails; frames without a
    /// usable face, eye pair or pupil are reported as skipped.
    pub fn process_frame(
        &mut self,
        frame: &RgbImage,
        session: &mut TrackingSession,
        pointer: &mut dyn PointerDevice,
    ) -> Result<FrameReport> {
        let mut gray = to_grayscale(frame);
        equalize_histogram(&mut gray);
        self.process_gray(&gray, session, pointer)
    }

    /// Process an already equalized grayscale frame
    ///
    /// # Errors
    ///
    /// Returns an error only when a collaborator fails
    pub fn process_gray(
        &mut self,
        gray: &GrayImage,
        session: &mut TrackingSession,
        pointer: &mut dyn PointerDevice,
    ) -> Result<FrameReport> {
        let faces = self.face_detector.detect(gray, &self.settings.face)?;
        let Some(&face) = faces.first() else {
            return Ok(FrameReport::skipped(SkipReason::NoFace));
        };

        let mut report = FrameReport::empty();
        report.face = Some(face);

        if self.settings.face_only {
            let center = face.center();
            info!("Face center: {} {}", center.x.round(), center.y.round());
            report.outcome = FrameOutcome::FaceOnly;
            return Ok(report);
        }

        let Some(face_crop) = crop(gray, &face) else {
            return Ok(report.skip(SkipReason::EmptyCrop));
        };

        let eyes = self.eye_detector.detect(&face_crop, &self.settings.eye)?;
        if eyes.len() != REQUIRED_EYE_COUNT {
            return Ok(report.skip(SkipReason::EyeCount(eyes.len())));
        }

        let Some(eye) = select_leftmost_eye(&eyes) else {
            return Ok(report.skip(SkipReason::EyeCount(0)));
        };
        report.eyes = eyes;
        report.tracked_eye = Some(eye);

        let Some(mut eye_crop) = crop(&face_crop, &eye) else {
            return Ok(report.skip(SkipReason::EmptyCrop));
        };
        equalize_histogram(&mut eye_crop);

        let params = self.settings.circles.for_crop(eye_crop.width(), eye_crop.height());
        let circles = self.circle_finder.find_circles(&eye_crop, &params)?;

        let Some(pupil) = select_pupil(&eye_crop, &circles) else {
            report.eye_crop = Some(eye_crop);
            return Ok(report.skip(SkipReason::NoCircles));
        };
        report.eye_crop = Some(eye_crop);
        report.pupil = Some(pupil);

        // A history shorter than the window would average too few points
        session.history.ensure_capacity(self.settings.stabilizer.window());
        session.history.push(pupil.center());
        let stabilized = self.settings.stabilizer.smooth(&session.history);
        report.stabilized = Some(stabilized);

        let bounds = self.clamp_bounds(gray, pointer);
        let cursor = self.settings.motion.update(&mut session.cursor, stabilized, bounds);
        pointer.move_to(
            clamp_f64_to_i32(cursor.x, 0, i32::MAX),
            clamp_f64_to_i32(cursor.y, 0, i32::MAX),
        )?;

        report.cursor = Some(cursor);
        report.outcome = FrameOutcome::Tracked;
        Ok(report)
    }

    fn clamp_bounds(&self, gray: &GrayImage, pointer: &dyn PointerDevice) -> Bounds {
        let frame = Bounds::new(gray.width(), gray.height());
        match self.settings.clamp_to {
            ClampTarget::Frame => frame,
            ClampTarget::Screen => pointer
                .screen_size()
                .map_or(frame, |(width, height)| Bounds::new(width, height)),
        }
    }
}
