//! Shared data models for the vgen backend.
//!
//! This crate provides Serde-serializable types for:
//! - Generated video records and their identifiers
//! - Content niches
//! - Generation requests (with boundary validation)
//! - Progress stream events and their wire payloads

pub mod event;
pub mod niche;
pub mod request;
pub mod video;

// Re-export common types
pub use event::{GenerationEvent, GenerationEventType, DONE_SENTINEL};
pub use niche::Niche;
pub use request::{parse_duration, GenerateRequest, RequestError, DEFAULT_DURATION_SECS};
pub use video::{VideoId, VideoRecord, MAX_VIDEO_ID_LENGTH};
