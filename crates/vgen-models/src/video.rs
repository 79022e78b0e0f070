//! Generated video records.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Longest identifier accepted on lookup.
pub const MAX_VIDEO_ID_LENGTH: usize = 64;

/// Unique identifier for a generated video package.
///
/// Backed by a UUIDv7, so identifiers sort by creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Generate a new time-ordered video ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Whether `s` could name a stored video.
    ///
    /// Accepts up to [`MAX_VIDEO_ID_LENGTH`] ASCII letters, digits, `-` and `_`.
    pub fn is_well_formed(s: &str) -> bool {
        !s.is_empty()
            && s.len() <= MAX_VIDEO_ID_LENGTH
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One generated video package: script text plus scene images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoRecord {
    /// Unique video ID
    pub id: VideoId,

    /// Topic as submitted by the user
    pub topic: String,

    /// Niche label (free text, not validated)
    pub niche: String,

    /// Creation timestamp
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,

    /// Narrative script (generated or fallback)
    pub script: String,

    /// Scene image URLs, in scene order
    #[serde(default)]
    pub images: Vec<String>,

    /// Narration audio URL (reserved, never populated)
    #[serde(rename = "audioUrl", default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl VideoRecord {
    /// Create a new record with a fresh ID and the current timestamp.
    pub fn new(
        topic: impl Into<String>,
        niche: impl Into<String>,
        script: impl Into<String>,
        images: Vec<String>,
    ) -> Self {
        Self {
            id: VideoId::new(),
            topic: topic.into(),
            niche: niche.into(),
            created_at: Utc::now(),
            script: script.into(),
            images,
            audio_url: None,
        }
    }
}
