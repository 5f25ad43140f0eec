//! Pupil tracking library that turns eye movement into cursor movement.
//!
//! The per-frame pipeline:
//! 1. Face detection on the equalized grayscale frame (first face only)
//! 2. Eye detection inside the face (exactly two eyes required)
//! 3. The leftmost eye is cropped and searched for circles
//! 4. The darkest circle is taken as the pupil
//! 5. A moving average over recent pupil centers smooths the estimate
//! 6. The change in the smoothed center moves the cursor, scaled per axis
//!
//! Detectors, the frame source, the display and the pointer are traits, so
//! the pipeline runs with the `OpenCV` backend (feature `opencv`) or with
//! test doubles.
//!
//! # Examples
//!
//! ## Stabilization and motion mapping
//!
//! ```
//! use eyeball_tracker::{
//!     geometry::EyePoint,
//!     motion::{Bounds, CursorState, MotionMapper},
//!     stabilizer::stabilize,
//! };
//!
//! let history: Vec<EyePoint> = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0]
//!     .iter()
//!     .map(|&x| EyePoint::new(x, 10.0))
//!     .collect();
//! let current = stabilize(&history, 5);
//! assert_eq!(current, EyePoint::new(16.0, 10.0));
//!
//! let mapper = MotionMapper::default();
//! let mut state = CursorState::default();
//! state.previous = Some(EyePoint::new(14.0, 10.0));
//! let cursor = mapper.update(&mut state, current, Bounds::new(1920, 1080));
//! assert_eq!((cursor.x, cursor.y), (1000.0, 800.0));
//! ```
//!
//! ## Running the tracker on a webcam
//!
//! ```no_run
//! # #[cfg(feature = "opencv")]
//! # fn main() -> eyeball_tracker::Result<()> {
//! use eyeball_tracker::{
//!     app::{EyeTrackerApp, GuiMode, VideoSource},
//!     config::Config,
//!     cursor_control::X11Pointer,
//!     error::ModelKind,
//!     opencv_backend::{CaptureSource, CascadeDetector, HighGuiSink, HoughCircleFinder},
//!     pipeline::{EyeTracker, TrackerSettings, TrackingSession},
//! };
//!
//! let config = Config::default();
//! let tracker = EyeTracker::new(
//!     Box::new(CascadeDetector::load(&config.models.face_cascade, ModelKind::Face)?),
//!     Box::new(CascadeDetector::load(&config.models.eye_cascade, ModelKind::Eye)?),
//!     Box::new(HoughCircleFinder),
//!     TrackerSettings::from(&config),
//! );
//! let mut app = EyeTrackerApp::new(
//!     CaptureSource::open(&VideoSource::Camera(0))?,
//!     HighGuiSink::new(GuiMode::All, 30)?,
//!     Box::new(X11Pointer::new()?),
//!     tracker,
//!     TrackingSession::from_config(&config),
//! );
//! app.run()?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "opencv"))]
//! # fn main() {}
//! ```

/// Geometric primitives and coordinate spaces
pub mod geometry;

/// Grayscale conversion, histogram equalization and cropping
pub mod preprocess;

/// Eye and pupil candidate selection
pub mod selection;

/// Moving-average stabilization of pupil centers
pub mod stabilizer;

/// Pupil motion to cursor displacement
pub mod motion;

/// Detector collaborator traits and parameters
pub mod detection;

/// Per-frame tracking pipeline
pub mod pipeline;

/// Utility functions for rectangles and numeric conversions
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application loop
pub mod app;

/// Pointer device abstraction and X11 implementation
pub mod cursor_control;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

/// `OpenCV` backed detectors, capture and display
#[cfg(feature = "opencv")]
pub mod opencv_backend;

pub use error::{Error, Result};
