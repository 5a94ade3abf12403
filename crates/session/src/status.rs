//! Status published to the user surface

use crate::LoadOutcome;
use gaze::GazeLabel;
use serde::{Deserialize, Serialize};
use video_id::VideoId;

/// Snapshot of what the user sees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Label from the latest frame, `NotDetected` included
    pub gaze: GazeLabel,
    /// Playback controller's belief
    pub playing: bool,
    /// Load controls are enabled only while the player is ready
    pub controls_enabled: bool,
    /// Load still waiting for the player
    pub loading: Option<VideoId>,
    pub last_load: Option<LoadOutcome>,
    /// Focus samples since the last load
    pub samples: usize,
    /// Share of those samples spent playing
    pub focus_ratio: f32,
}

impl SessionStatus {
    /// Status line text, e.g. `Status: Looking left`
    pub fn status_line(&self) -> String {
        format!("Status: {}", self.gaze)
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self {
            gaze: GazeLabel::Center,
            playing: true,
            controls_enabled: false,
            loading: None,
            last_load: None,
            samples: 0,
            focus_ratio: 0.0,
        }
    }
}
