//! Constants used throughout the application

/// Default path of the face cascade model
pub const DEFAULT_FACE_CASCADE: &str = "./face-cascade.xml";

/// Default path of the eye cascade model
pub const DEFAULT_EYE_CASCADE: &str = "./eye-cascade.xml";

/// Multi-scale detection step
pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;

/// Neighbor aggregation threshold for cascade matches
pub const DEFAULT_MIN_NEIGHBORS: i32 = 2;

/// Smallest face the detector will report, in pixels
pub const DEFAULT_FACE_MIN_SIZE: u32 = 150;

/// Smallest eye the detector will report, in pixels
pub const DEFAULT_EYE_MIN_SIZE: u32 = 30;

/// Hough accumulator resolution ratio
pub const DEFAULT_HOUGH_DP: f64 = 1.0;

/// Upper Canny threshold for the Hough gradient method
pub const DEFAULT_HOUGH_PARAM1: f64 = 250.0;

/// Accumulator threshold for circle centers
pub const DEFAULT_HOUGH_PARAM2: f64 = 15.0;

/// Eye crop width divided by this gives the minimum center distance
pub const DEFAULT_CENTER_DISTANCE_DIVISOR: u32 = 8;

/// Eye crop height divided by this gives the minimum radius
pub const DEFAULT_MIN_RADIUS_DIVISOR: u32 = 8;

/// Eye crop height divided by this gives the maximum radius
pub const DEFAULT_MAX_RADIUS_DIVISOR: u32 = 3;

/// Default stabilization window
pub const DEFAULT_STABILIZATION_WINDOW: usize = 5;

/// Number of pupil centers retained per session
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Horizontal cursor gain
pub const DEFAULT_GAIN_X: f64 = 100.0;

/// Vertical cursor gain (negative: camera y grows downwards)
pub const DEFAULT_GAIN_Y: f64 = -80.0;

/// Initial cursor position
pub const DEFAULT_INITIAL_CURSOR: (f64, f64) = (800.0, 800.0);

/// Number of eyes the pipeline requires per frame
pub const REQUIRED_EYE_COUNT: usize = 2;

/// Milliseconds to wait for a key press between frames
pub const DEFAULT_WAIT_MS: i32 = 30;

/// Number of intensity levels in an 8-bit image
pub const INTENSITY_LEVELS: usize = 256;
