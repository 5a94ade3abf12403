//! Gaze classifier configuration

use serde::{Deserialize, Serialize};

/// Gaze classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    /// Consecutive agreeing frames needed before the sticky label changes
    pub threshold_frames: u32,

    /// Average ratio below this counts as looking left
    pub left_bound: f32,

    /// Average ratio above this counts as looking right
    pub right_bound: f32,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            threshold_frames: 3,
            left_bound: 0.45,
            right_bound: 0.55,
        }
    }
}

impl GazeConfig {
    /// Narrow center band, reacts faster to looking away
    pub fn strict() -> Self {
        Self {
            threshold_frames: 2,
            left_bound: 0.47,
            right_bound: 0.53,
        }
    }

    /// Wide center band, needs a longer glance away
    pub fn lenient() -> Self {
        Self {
            threshold_frames: 5,
            left_bound: 0.40,
            right_bound: 0.60,
        }
    }
}
