//! URL and bare-id resolver

use crate::VideoIdError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Length of a canonical video identifier
pub const ID_LEN: usize = 11;

/// Recognized share forms, searched anywhere in the input:
/// `youtube.com/watch?v=`, `youtube.com/embed/`, `youtube.com/v/`, `youtu.be/`
const URL_PATTERN: &str = r"(?:https?://)?(?:www\.)?(?:youtube\.com/(?:watch\?v=|embed/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})";

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(URL_PATTERN).expect("URL_PATTERN is a valid regex"))
}

/// Canonical video identifier
///
/// Sample-video triggers carry literal ids that bypass resolution, so
/// deserializing does not validate the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Resolve user input, returning an error suitable for display
    pub fn parse(input: &str) -> Result<Self, VideoIdError> {
        resolve(input).ok_or_else(|| VideoIdError::NotRecognized(input.to_string()))
    }

    /// Wrap a literal id without checking it
    pub fn from_literal(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VideoId {
    type Err = VideoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Extract a video id from a share URL, or accept the whole input as a bare
/// id when it is exactly [`ID_LEN`] characters long.
pub fn resolve(input: &str) -> Option<VideoId> {
    if let Some(captures) = url_regex().captures(input) {
        if let Some(id) = captures.get(1) {
            return Some(VideoId(id.as_str().to_string()));
        }
    }

    if input.chars().count() == ID_LEN {
        Some(VideoId(input.to_string()))
    } else {
        None
    }
}
