//! Gaze Direction Tracking
//!
//! Turns per-frame eye landmarks into a stable gaze direction:
//! - Landmark frame model and horizontal gaze ratio
//! - Hysteresis counters that debounce noisy ratios
//! - Sticky gaze label with a transient "face not detected" signal

pub mod classifier;
pub mod config;
pub mod landmark;
pub mod state;

pub use classifier::GazeClassifier;
pub use config::GazeConfig;
pub use landmark::{EyeLandmarks, LandmarkFrame, Point2};
pub use state::{GazeBucket, GazeLabel, HysteresisCounters};

use thiserror::Error;

/// Gaze error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GazeError {
    #[error("Eye outer and inner corners share x = {0}, gaze ratio is undefined")]
    DegenerateGeometry(f32),

    #[error("Gaze ratio is not finite: {0}")]
    NonFiniteRatio(f32),

    #[error("Face mesh has {actual} landmarks, need at least {required}")]
    LandmarksMissing { required: usize, actual: usize },
}
