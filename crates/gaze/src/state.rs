//! Gaze label and hysteresis state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction bucket a single frame falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GazeBucket {
    Left,
    Right,
    Center,
}

impl GazeBucket {
    /// Sticky label this bucket debounces into
    pub fn label(self) -> GazeLabel {
        match self {
            GazeBucket::Left => GazeLabel::Left,
            GazeBucket::Right => GazeLabel::Right,
            GazeBucket::Center => GazeLabel::Center,
        }
    }
}

/// Gaze label reported to playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GazeLabel {
    #[default]
    Center,
    Left,
    Right,
    /// Transient: reported for a frame without a face, never sticky
    NotDetected,
}

impl GazeLabel {
    pub fn is_center(self) -> bool {
        self == GazeLabel::Center
    }
}

impl fmt::Display for GazeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GazeLabel::Center => "Looking center",
            GazeLabel::Left => "Looking left",
            GazeLabel::Right => "Looking right",
            GazeLabel::NotDetected => "Face not detected",
        })
    }
}

/// Consecutive-frame counters, at most one is non-zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HysteresisCounters {
    pub left: u32,
    pub right: u32,
    pub center: u32,
}

impl HysteresisCounters {
    /// Count one more frame for `bucket` and zero the other two
    pub fn bump(&mut self, bucket: GazeBucket) -> u32 {
        let count = self.get(bucket).saturating_add(1);
        *self = Self::default();
        match bucket {
            GazeBucket::Left => self.left = count,
            GazeBucket::Right => self.right = count,
            GazeBucket::Center => self.center = count,
        }
        count
    }

    pub fn get(&self, bucket: GazeBucket) -> u32 {
        match bucket {
            GazeBucket::Left => self.left,
            GazeBucket::Right => self.right,
            GazeBucket::Center => self.center,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
