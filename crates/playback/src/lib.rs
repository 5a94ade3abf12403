//! Gaze-Driven Playback Control
//!
//! Provides the player capability seam, the play/pause controller that
//! reacts to gaze labels, and the fixed-delay bounded retry used while the
//! player is still starting up.

mod controller;
mod player;
mod retry;

pub use controller::{PlaybackCommand, PlaybackController};
pub use player::{Player, PlayerCall, SimulatedPlayer};
pub use retry::{retry_fixed, RetryBudget, RetryPolicy};

use thiserror::Error;

/// Errors on the video load path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError {
    /// Condition never held within the retry budget
    #[error("Gave up after {attempts} attempts")]
    Exhausted { attempts: u32 },
}
