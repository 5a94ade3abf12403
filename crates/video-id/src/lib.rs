//! Video Identifier Resolution
//!
//! Turns free-form user input (a share URL or a bare id) into the canonical
//! 11-character video identifier the player understands.

mod resolver;

pub use resolver::{resolve, VideoId, ID_LEN};

use thiserror::Error;

/// Errors produced while resolving a video identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoIdError {
    /// Input matched no URL form and is not a bare id
    #[error("Invalid video URL or id: {0:?}")]
    NotRecognized(String),
}
