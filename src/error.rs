//! Error types for the eyeball tracker library.

use std::path::PathBuf;
use thiserror::Error;

/// Which cascade model a loading error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Frontal face cascade
    Face,
    /// Eye cascade
    Eye,
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Face => write!(f, "face"),
            Self::Eye => write!(f, "eye"),
        }
    }
}

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[cfg(feature = "opencv")]
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `X11` window system operation failed
    #[error("X11 error: {0}")]
    X11(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A cascade model could not be loaded
    #[error("Could not load {kind} detector from {}", path.display())]
    ModelLoad {
        /// Which detector failed
        kind: ModelKind,
        /// Path that was tried
        path: PathBuf,
    },

    /// The capture device or video file could not be opened
    #[error("Capture unavailable: {0}")]
    CaptureUnavailable(String),

    /// Cursor control operation failed
    #[error("Cursor control error: {0}")]
    CursorControl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
