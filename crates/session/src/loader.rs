//! Pending video loads

use playback::{retry_fixed, Player, RetryError, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use video_id::VideoId;

/// Result of a load request, shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadOutcome {
    /// Video handed to the player
    Loaded(VideoId),
    /// Input was not a recognizable video URL or id
    Rejected { input: String },
    /// Player never became ready
    Failed { id: VideoId, attempts: u32 },
    /// A newer load request replaced this one while it was waiting
    Superseded(VideoId),
}

impl LoadOutcome {
    /// Whether the user needs to see an error
    pub fn is_failure(&self) -> bool {
        matches!(self, LoadOutcome::Rejected { .. } | LoadOutcome::Failed { .. })
    }
}

type ReadyWait = Pin<Box<dyn Future<Output = Result<(), RetryError>> + Send>>;

/// Load waiting for the player to become ready.
///
/// Dropping it cancels the remaining retries.
pub(crate) struct PendingLoad {
    pub(crate) id: VideoId,
    wait: ReadyWait,
}

impl PendingLoad {
    pub(crate) fn new<P: Player + 'static>(id: VideoId, player: Arc<P>, policy: RetryPolicy) -> Self {
        let wait = Box::pin(retry_fixed(policy, move || player.is_ready().then_some(())));
        Self { id, wait }
    }

    /// Resolves once the player is ready or the budget is spent
    pub(crate) async fn ready(&mut self) -> Result<(), RetryError> {
        self.wait.as_mut().await
    }
}

/// Wait on the pending load, or forever when there is none
pub(crate) async fn wait_pending(pending: &mut Option<PendingLoad>) -> Result<(), RetryError> {
    match pending {
        Some(load) => load.ready().await,
        None => std::future::pending().await,
    }
}
