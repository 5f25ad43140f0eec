//! Main application loop for the eyeball tracker.
//!
//! The loop is generic over where frames come from and where they are shown,
//! so the same code drives a webcam with HighGUI windows and a scripted
//! source in tests.

use crate::{
    cursor_control::PointerDevice,
    error::Result,
    pipeline::{EyeTracker, FrameReport, TrackingSession},
};
use image::{imageops, RgbImage};
use log::{debug, info};
use std::time::{Duration, Instant};

/// Where frames come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Webcam index
    Camera(i32),
    /// Video file path
    File(String),
}

/// GUI display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiMode {
    /// Camera frame with overlays plus the eye crop
    All,
    /// Camera frame with overlays only
    Camera,
    /// No windows
    None,
}

impl GuiMode {
    /// Parse a mode name, defaulting to [`GuiMode::All`]
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "camera" | "cam" => Self::Camera,
            "none" => Self::None,
            _ => Self::All,
        }
    }
}

/// Blocking frame source
pub trait FrameSource {
    /// Next frame, or `None` at the end of the stream
    ///
    /// # Errors
    ///
    /// Returns an error if the device fails mid-stream
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;
}

/// Presents frames and reports the stop signal
pub trait FrameSink {
    /// Show a frame with its tracking results
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails
    fn present(&mut self, frame: &RgbImage, report: &FrameReport) -> Result<()>;

    /// Wait briefly for user input; true means stop
    ///
    /// # Errors
    ///
    /// Returns an error if input polling fails
    fn stop_requested(&mut self) -> Result<bool>;
}

/// Sink for headless runs; never asks to stop
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessSink;

impl FrameSink for HeadlessSink {
    fn present(&mut self, _frame: &RgbImage, _report: &FrameReport) -> Result<()> {
        Ok(())
    }

    fn stop_requested(&mut self) -> Result<bool> {
        Ok(false)
    }
}

/// Counters collected over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames read from the source
    pub frames: u64,
    /// Frames where the pupil was tracked
    pub tracked: u64,
}

/// Main application struct
pub struct EyeTrackerApp<S: FrameSource, D: FrameSink> {
    source: S,
    sink: D,
    pointer: Box<dyn PointerDevice>,
    tracker: EyeTracker,
    session: TrackingSession,
    mirror: bool,
}

impl<S: FrameSource, D: FrameSink> EyeTrackerApp<S, D> {
    /// Assemble an application from its parts
    pub fn new(
        source: S,
        sink: D,
        pointer: Box<dyn PointerDevice>,
        tracker: EyeTracker,
        session: TrackingSession,
    ) -> Self {
        Self {
            source,
            sink,
            pointer,
            tracker,
            session,
            mirror: false,
        }
    }

    /// Mirror frames horizontally before processing
    #[must_use]
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Tracking state after the run
    pub const fn session(&self) -> &TrackingSession {
        &self.session
    }

    /// Run until the stream ends or the sink asks to stop
    ///
    /// # Errors
    ///
    /// Returns the first collaborator failure
    #[allow(clippy::cast_precision_loss)]
    pub fn run(&mut self) -> Result<RunStats> {
        info!("Starting main application loop");

        let mut stats = RunStats::default();
        let mut window_frames = 0u64;
        let mut last_fps_update = Instant::now();

        loop {
            let Some(mut frame) = self.source.next_frame()? else {
                info!("End of video stream reached");
                break;
            };
            if self.mirror {
                imageops::flip_horizontal_in_place(&mut frame);
            }

            let report = self
                .tracker
                .process_frame(&frame, &mut self.session, self.pointer.as_mut())?;

            stats.frames += 1;
            window_frames += 1;
            if report.is_tracked() {
                stats.tracked += 1;
            }

            let elapsed = last_fps_update.elapsed();
            if elapsed >= Duration::from_secs(1) {
                debug!(
                    "FPS: {:.1}, tracked {}/{} frames",
                    window_frames as f64 / elapsed.as_secs_f64(),
                    stats.tracked,
                    stats.frames
                );
                window_frames = 0;
                last_fps_update = Instant::now();
            }

            self.sink.present(&frame, &report)?;
            if self.sink.stop_requested()? {
                info!("Exit requested by user");
                break;
            }
        }

        info!(
            "Application shutting down after {} frames ({} tracked)",
            stats.frames, stats.tracked
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gui_mode_parse() {
        assert_eq!(GuiMode::parse("all"), GuiMode::All);
        assert_eq!(GuiMode::parse("camera"), GuiMode::Camera);
        assert_eq!(GuiMode::parse("cam"), GuiMode::Camera);
        assert_eq!(GuiMode::parse("none"), GuiMode::None);
        assert_eq!(GuiMode::parse("bogus"), GuiMode::All);
    }

    #[test]
    fn test_headless_sink_never_stops() {
        let mut sink = HeadlessSink;
        assert!(!sink.stop_requested().unwrap());
    }
}
