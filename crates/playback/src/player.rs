//! Video player capability

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};
use video_id::VideoId;

/// Video player the session drives.
///
/// Commands give no feedback; callers check [`Player::is_ready`] first.
pub trait Player: Send + Sync {
    /// Whether the player accepts commands yet
    fn is_ready(&self) -> bool;

    /// Replace the current video and start playing it
    fn load_video_by_id(&self, id: &VideoId);

    fn play(&self);

    fn pause(&self);
}

/// Command received by a [`SimulatedPlayer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCall {
    Load(VideoId),
    Play,
    Pause,
}

/// In-process player that records every command it receives
#[derive(Debug, Default)]
pub struct SimulatedPlayer {
    ready: AtomicBool,
    calls: Mutex<Vec<PlayerCall>>,
}

impl SimulatedPlayer {
    /// Create a player that has not finished starting up
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a player that is already ready
    pub fn ready() -> Self {
        let player = Self::new();
        player.set_ready(true);
        player
    }

    pub fn set_ready(&self, ready: bool) {
        if ready != self.ready.swap(ready, Ordering::AcqRel) {
            info!("Simulated player ready = {}", ready);
        }
    }

    /// All commands received so far, oldest first
    pub fn calls(&self) -> Vec<PlayerCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of `load_video_by_id` calls received
    pub fn load_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, PlayerCall::Load(_)))
            .count()
    }

    fn record(&self, call: PlayerCall) {
        debug!("Simulated player: {:?}", call);
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl Player for SimulatedPlayer {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn load_video_by_id(&self, id: &VideoId) {
        self.record(PlayerCall::Load(id.clone()));
    }

    fn play(&self) {
        self.record(PlayerCall::Play);
    }

    fn pause(&self) {
        self.record(PlayerCall::Pause);
    }
}
