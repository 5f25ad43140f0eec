//! Eyeball tracker: moves the mouse cursor by following the pupil in a webcam stream.

use anyhow::Result;
use clap::Parser;
use eyeball_tracker::{
    app::{EyeTrackerApp, GuiMode, VideoSource},
    config::Config,
    cursor_control::{NullPointer, PointerDevice, X11Pointer},
    detection::{NoDetections, PatternDetector},
    error::ModelKind,
    opencv_backend::{CaptureSource, CascadeDetector, HighGuiSink, HoughCircleFinder},
    pipeline::{EyeTracker, TrackerSettings, TrackingSession},
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long, default_value = "0")]
    cam: i32,

    /// Video file to process instead of a camera
    #[arg(short, long)]
    video: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// GUI display mode (all, camera, none)
    #[arg(short, long)]
    gui: Option<String>,

    /// Face cascade model path
    #[arg(long)]
    face_cascade: Option<PathBuf>,

    /// Eye cascade model path
    #[arg(long)]
    eye_cascade: Option<PathBuf>,

    /// Horizontal cursor gain
    #[arg(long, allow_hyphen_values = true)]
    gain_x: Option<f64>,

    /// Vertical cursor gain
    #[arg(long, allow_hyphen_values = true)]
    gain_y: Option<f64>,

    /// Stabilization window size
    #[arg(short, long)]
    window: Option<usize>,

    /// Mirror the camera image horizontally
    #[arg(short, long)]
    mirror: bool,

    /// Only detect the face and log its center
    #[arg(long)]
    face_only: bool,

    /// Track without moving the real cursor
    #[arg(long)]
    dry_run: bool,

    /// Print the example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(gui) = &self.gui {
            config.display.gui_mode.clone_from(gui);
        }
        if let Some(path) = &self.face_cascade {
            config.models.face_cascade.clone_from(path);
        }
        if let Some(path) = &self.eye_cascade {
            config.models.eye_cascade.clone_from(path);
        }
        if let Some(gain) = self.gain_x {
            config.cursor.gain_x = gain;
        }
        if let Some(gain) = self.gain_y {
            config.cursor.gain_y = gain;
        }
        if let Some(window) = self.window {
            config.stabilizer.window_size = window;
            config.stabilizer.history_capacity = config.stabilizer.history_capacity.max(window);
        }
        if self.mirror {
            config.display.mirror = true;
        }
        if self.face_only {
            config.detection.face_only = true;
        }
        if self.dry_run {
            config.cursor.enabled = false;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{}", eyeball_tracker::config::EXAMPLE_CONFIG);
        return Ok(());
    }

    info!("Eyeball Tracker");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    args.apply_overrides(&mut config);
    config.validate()?;

    // Model and capture failures are fatal, each with its own message
    let face_detector = CascadeDetector::load(&config.models.face_cascade, ModelKind::Face)?;
    let eye_detector: Box<dyn PatternDetector> = if config.detection.face_only {
        info!("Face-only mode: eye cascade not loaded");
        Box::new(NoDetections)
    } else {
        Box::new(CascadeDetector::load(&config.models.eye_cascade, ModelKind::Eye)?)
    };

    let video_source = match args.video {
        Some(path) => VideoSource::File(path),
        None => VideoSource::Camera(args.cam),
    };
    let source = CaptureSource::open(&video_source)?;

    let pointer: Box<dyn PointerDevice> = if config.cursor.enabled {
        match X11Pointer::new() {
            Ok(pointer) => Box::new(pointer),
            Err(e) => {
                warn!("Failed to initialize cursor control: {}", e);
                Box::new(NullPointer)
            }
        }
    } else {
        info!("Dry run: cursor will not be moved");
        Box::new(NullPointer)
    };

    let sink = HighGuiSink::new(GuiMode::parse(&config.display.gui_mode), config.display.wait_ms)?;

    let tracker = EyeTracker::new(
        Box::new(face_detector),
        eye_detector,
        Box::new(HoughCircleFinder),
        TrackerSettings::from(&config),
    );

    let mut app = EyeTrackerApp::new(source, sink, pointer, tracker, TrackingSession::from_config(&config))
        .with_mirror(config.display.mirror);
    let stats = app.run()?;

    info!("Tracked pupil in {} of {} frames", stats.tracked, stats.frames);
    Ok(())
}
