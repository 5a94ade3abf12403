//! Gaze Playback Session
//!
//! Owns the classifier, playback controller, focus sampler and player in a
//! single task. Frames, sampling ticks, load requests and retry timers are
//! handled one at a time, so no state is shared between tasks.

mod config;
mod loader;
mod session;
mod status;

pub use config::{SampleVideo, SessionConfig};
pub use loader::LoadOutcome;
pub use session::{Session, SessionCommand, SessionHandle};
pub use status::SessionStatus;

use thiserror::Error;

/// Session error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session has stopped")]
    Closed,

    #[error("Invalid configuration: {0}")]
    Config(String),
}
