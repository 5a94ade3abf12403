//! Gaze Player Runtime
//!
//! Configuration, logging, and the demo collaborators (scripted perception,
//! logging chart sink) used by the `gaze-player` binary.

pub mod perception;

use config::{Config, ConfigError, Environment, File};
use focus_sampler::{FocusSnapshot, VisualizationSink};
use serde::{Deserialize, Serialize};
use session::{SampleVideo, SessionConfig, SessionStatus};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use video_id::VideoId;

pub use perception::{ScriptSegment, ScriptedGaze, ScriptedPerception};

/// Optional config file next to the working directory (any format `config` reads)
pub const CONFIG_FILE: &str = "gaze-player";

/// Environment variable prefix, e.g. `GAZE_PLAYER_SESSION__SAMPLER__INTERVAL_MS`
pub const ENV_PREFIX: &str = "GAZE_PLAYER";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    /// Perception frame period in milliseconds
    pub frame_interval_ms: u64,
    /// Simulated player start-up time in milliseconds
    pub player_ready_after_ms: u64,
    /// How long the demo runs
    pub run_seconds: u64,
    /// URL or id to load; the first sample video when unset
    pub video: Option<String>,
    pub script: Vec<ScriptSegment>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig {
                sample_videos: default_samples(),
                ..Default::default()
            },
            frame_interval_ms: 33,
            player_ready_after_ms: 1500,
            run_seconds: 30,
            video: None,
            script: perception::default_script(),
        }
    }
}

fn default_samples() -> Vec<SampleVideo> {
    vec![
        SampleVideo {
            title: "Iframe API sample".to_string(),
            video_id: VideoId::from_literal("M7lc1UVf-VE"),
        },
        SampleVideo {
            title: "Big Buck Bunny".to_string(),
            video_id: VideoId::from_literal("aqz-KE-bpKQ"),
        },
    ]
}

impl AppConfig {
    /// Defaults, then the optional config file, then environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// Initialize logging (`RUST_LOG` overrides the default `info` level)
pub fn init_logging() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// Chart sink that logs each snapshot as JSON
#[derive(Debug, Default)]
pub struct LogSink;

impl VisualizationSink for LogSink {
    fn publish(&mut self, snapshot: &FocusSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(json) => info!(target: "focus_chart", "{}", json),
            Err(e) => warn!("Failed to serialize focus snapshot: {}", e),
        }
    }
}

/// Logs status changes the user would notice
#[derive(Debug, Default)]
pub struct StatusReporter {
    last: Option<SessionStatus>,
}

impl StatusReporter {
    /// Returns whether anything was logged
    pub fn report(&mut self, status: &SessionStatus) -> bool {
        let changed = match &self.last {
            None => true,
            Some(last) => {
                last.gaze != status.gaze
                    || last.playing != status.playing
                    || last.controls_enabled != status.controls_enabled
                    || last.last_load != status.last_load
            }
        };

        if changed {
            info!(
                "{} | playing={} | controls={} | last load: {:?}",
                status.status_line(),
                status.playing,
                if status.controls_enabled { "enabled" } else { "disabled" },
                status.last_load
            );
            if let Some(outcome) = status.last_load.as_ref().filter(|o| o.is_failure()) {
                warn!("Load failed: {:?}", outcome);
            }
        }

        self.last = Some(status.clone());
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaze::GazeLabel;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.session.validate().is_ok());
        assert_eq!(config.session.sample_videos.len(), 2);
        assert_eq!(config.session.sampler.interval_ms, 3000);
    }

    #[test]
    fn test_config_round_trips_through_config_crate() {
        let config = Config::builder()
            .add_source(Config::try_from(&AppConfig::default()).unwrap())
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>()
            .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_status_reporter_ignores_sample_only_changes() {
        let mut reporter = StatusReporter::default();
        let mut status = SessionStatus::default();
        assert!(reporter.report(&status));

        status.samples = 4;
        assert!(!reporter.report(&status));

        status.gaze = GazeLabel::NotDetected;
        assert!(reporter.report(&status));
    }

    #[test]
    fn test_log_sink_accepts_snapshots() {
        let mut sink = LogSink;
        sink.publish(&FocusSnapshot::default());
    }
}
