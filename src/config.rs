//! Configuration management for the eyeball tracker

use crate::{
    constants::{
        DEFAULT_EYE_CASCADE, DEFAULT_FACE_CASCADE, DEFAULT_GAIN_X, DEFAULT_GAIN_Y, DEFAULT_HISTORY_CAPACITY,
        DEFAULT_INITIAL_CURSOR, DEFAULT_STABILIZATION_WINDOW, DEFAULT_WAIT_MS,
    },
    detection::{CircleSettings, DetectionParams},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cascade model paths
    pub models: ModelConfig,

    /// Face and eye detection parameters
    pub detection: DetectionConfig,

    /// Pupil circle search parameters
    pub circles: CircleSettings,

    /// Position smoothing
    pub stabilizer: StabilizerConfig,

    /// Cursor control
    pub cursor: CursorConfig,

    /// Display settings
    pub display: DisplayConfig,
}

/// Cascade model file paths
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Frontal face cascade
    pub face_cascade: PathBuf,

    /// Eye cascade
    pub eye_cascade: PathBuf,
}

/// Detection parameters for both cascades
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Face search
    pub face: DetectionParams,

    /// Eye search within the face crop
    pub eye: DetectionParams,

    /// Stop after face detection and log the face center
    pub face_only: bool,
}

/// Stabilization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Number of trailing samples averaged
    pub window_size: usize,

    /// Number of samples retained per session
    pub history_capacity: usize,
}

/// Surface the cursor is clamped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClampTarget {
    /// Camera frame dimensions
    Frame,
    /// Pointer device screen dimensions, falling back to the frame
    Screen,
}

/// Cursor control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Move the real pointer
    pub enabled: bool,

    /// Horizontal gain
    pub gain_x: f64,

    /// Vertical gain
    pub gain_y: f64,

    /// Invert X axis
    pub invert_x: bool,

    /// Invert Y axis
    pub invert_y: bool,

    /// Starting cursor x
    pub initial_x: f64,

    /// Starting cursor y
    pub initial_y: f64,

    /// Surface used for clamping
    pub clamp_to: ClampTarget,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// GUI mode (all, camera, none)
    pub gui_mode: String,

    /// Key polling wait between frames in milliseconds
    pub wait_ms: i32,

    /// Mirror frames horizontally before processing
    pub mirror: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            face_cascade: PathBuf::from(DEFAULT_FACE_CASCADE),
            eye_cascade: PathBuf::from(DEFAULT_EYE_CASCADE),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            face: DetectionParams::face(),
            eye: DetectionParams::eye(),
            face_only: false,
        }
    }
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_STABILIZATION_WINDOW,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            gain_x: DEFAULT_GAIN_X,
            gain_y: DEFAULT_GAIN_Y,
            invert_x: false,
            invert_y: false,
            initial_x: DEFAULT_INITIAL_CURSOR.0,
            initial_y: DEFAULT_INITIAL_CURSOR.1,
            clamp_to: ClampTarget::Frame,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            gui_mode: "all".to_string(),
            wait_ms: DEFAULT_WAIT_MS,
            mirror: false,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate parameter ranges
    ///
    /// Model paths are checked when the cascades are loaded, so that a missing
    /// model is reported with its own message.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found
    pub fn validate(&self) -> Result<()> {
        for (name, params) in [("face", &self.detection.face), ("eye", &self.detection.eye)] {
            if params.scale_factor <= 1.0 {
                return Err(Error::ConfigError(format!(
                    "{name} scale factor must be greater than 1.0"
                )));
            }
            if params.min_neighbors < 0 {
                return Err(Error::ConfigError(format!("{name} min neighbors must not be negative")));
            }
        }

        if self.circles.dp <= 0.0 {
            return Err(Error::ConfigError("Hough dp must be positive".to_string()));
        }
        if self.circles.min_radius_divisor < self.circles.max_radius_divisor {
            return Err(Error::ConfigError(
                "Minimum radius divisor must not be smaller than the maximum radius divisor".to_string(),
            ));
        }

        if self.stabilizer.window_size == 0 {
            return Err(Error::ConfigError(
                "Stabilization window size must be greater than 0".to_string(),
            ));
        }
        if self.stabilizer.history_capacity < self.stabilizer.window_size {
            return Err(Error::ConfigError(
                "History capacity must be at least the stabilization window size".to_string(),
            ));
        }

        if !self.cursor.gain_x.is_finite() || !self.cursor.gain_y.is_finite() {
            return Err(Error::ConfigError("Cursor gains must be finite".to_string()));
        }
        if self.cursor.initial_x < 0.0 || self.cursor.initial_y < 0.0 {
            return Err(Error::ConfigError(
                "Initial cursor position must not be negative".to_string(),
            ));
        }

        if self.display.wait_ms <= 0 {
            return Err(Error::ConfigError("Key wait must be greater than 0 ms".to_string()));
        }
        if !matches!(self.display.gui_mode.as_str(), "all" | "camera" | "none") {
            return Err(Error::ConfigError(format!(
                "Unknown GUI mode: {}",
                self.display.gui_mode
            )));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Eyeball Tracker Configuration

# Haar cascade models
models:
  face_cascade: "./face-cascade.xml"
  eye_cascade: "./eye-cascade.xml"

# Cascade search parameters
detection:
  face:
    scale_factor: 1.1
    min_neighbors: 2
    min_size: 150
  eye:
    scale_factor: 1.1
    min_neighbors: 2
    min_size: 30
  face_only: false

# Pupil circle search, sized relative to the eye crop
circles:
  dp: 1.0
  param1: 250.0
  param2: 15.0
  center_distance_divisor: 8
  min_radius_divisor: 8
  max_radius_divisor: 3

# Moving average over recent pupil centers
stabilizer:
  window_size: 5
  history_capacity: 64

# Cursor control
cursor:
  enabled: true
  gain_x: 100.0
  gain_y: -80.0
  invert_x: false
  invert_y: false
  initial_x: 800.0
  initial_y: 800.0
  clamp_to: frame

# Display settings
display:
  gui_mode: "all"
  wait_ms: 30
  mirror: false
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        let defaults = Config::default();

        assert_eq!(parsed.models.face_cascade, defaults.models.face_cascade);
        assert_eq!(parsed.detection.face, defaults.detection.face);
        assert_eq!(parsed.detection.eye, defaults.detection.eye);
        assert_eq!(parsed.circles, defaults.circles);
        assert_eq!(parsed.stabilizer.window_size, defaults.stabilizer.window_size);
        assert_eq!(parsed.cursor.gain_y, defaults.cursor.gain_y);
        assert_eq!(parsed.cursor.clamp_to, ClampTarget::Frame);
        assert_eq!(parsed.display.wait_ms, defaults.display.wait_ms);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let parsed: Config = serde_yaml::from_str("cursor:\n  gain_x: 20.0\n").unwrap();
        assert_eq!(parsed.cursor.gain_x, 20.0);
        assert_eq!(parsed.cursor.gain_y, -80.0);
        assert_eq!(parsed.stabilizer.window_size, 5);
    }

    #[test]
    fn test_invalid_window() {
        let mut config = Config::default();
        config.stabilizer.window_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_gui_mode() {
        let mut config = Config::default();
        config.display.gui_mode = "pointers".to_string();
        assert!(config.validate().is_err());
    }
}
