//! Session configuration

use crate::SessionError;
use focus_sampler::SamplerConfig;
use gaze::GazeConfig;
use playback::RetryPolicy;
use serde::{Deserialize, Serialize};
use video_id::VideoId;

/// Preconfigured video offered as a one-click load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleVideo {
    pub title: String,
    pub video_id: VideoId,
}

/// Session configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub gaze: GazeConfig,
    pub sampler: SamplerConfig,
    pub retry: RetryPolicy,
    pub sample_videos: Vec<SampleVideo>,
}

impl SessionConfig {
    /// Reject values the control loop cannot run with
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.sampler.interval_ms == 0 {
            return Err(SessionError::Config("sampler.interval_ms must be > 0".into()));
        }
        if self.gaze.threshold_frames == 0 {
            return Err(SessionError::Config("gaze.threshold_frames must be > 0".into()));
        }
        if self.gaze.left_bound > self.gaze.right_bound {
            return Err(SessionError::Config(format!(
                "gaze.left_bound {} is above gaze.right_bound {}",
                self.gaze.left_bound, self.gaze.right_bound
            )));
        }
        Ok(())
    }

    /// Sample video by its position in the list
    pub fn sample(&self, index: usize) -> Option<&SampleVideo> {
        self.sample_videos.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = SessionConfig::default();
        config.sampler.interval_ms = 0;
        assert!(matches!(config.validate(), Err(SessionError::Config(_))));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut config = SessionConfig::default();
        config.gaze.left_bound = 0.7;
        assert!(config.validate().is_err());
    }
}
