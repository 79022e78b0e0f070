//! Generation progress events.
//!
//! A generation run produces zero or more `Progress` events followed by
//! exactly one terminal event (`Done` or `Error`). Each event maps to one
//! server-sent event whose `data` field is the wire payload.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Payload sent as the terminal event of a successful run.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Event types (for metrics and logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerationEventType {
    Progress,
    Done,
    Error,
}

impl GenerationEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationEventType::Progress => "progress",
            GenerationEventType::Done => "done",
            GenerationEventType::Error => "error",
        }
    }
}

/// One event of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "message", rename_all = "snake_case")]
pub enum GenerationEvent {
    /// Informational progress message
    Progress(String),
    /// Run finished and a record was stored
    Done,
    /// Run aborted, nothing was stored
    Error(String),
}

impl GenerationEvent {
    /// Create a progress event.
    pub fn progress(message: impl Into<String>) -> Self {
        GenerationEvent::Progress(message.into())
    }

    /// Create an error event.
    pub fn error(message: impl Into<String>) -> Self {
        GenerationEvent::Error(message.into())
    }

    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GenerationEvent::Progress(_))
    }

    /// Get the event type.
    pub fn event_type(&self) -> GenerationEventType {
        match self {
            GenerationEvent::Progress(_) => GenerationEventType::Progress,
            GenerationEvent::Done => GenerationEventType::Done,
            GenerationEvent::Error(_) => GenerationEventType::Error,
        }
    }

    /// The `data` payload of the server-sent event.
    ///
    /// `{"progress": ".."}`, `{"error": ".."}` or the literal `[DONE]`.
    pub fn data(&self) -> String {
        match self {
            GenerationEvent::Progress(message) => json!({ "progress": message }).to_string(),
            GenerationEvent::Done => DONE_SENTINEL.to_string(),
            GenerationEvent::Error(message) => json!({ "error": message }).to_string(),
        }
    }

    /// Parse a single `data` payload back into an event.
    ///
    /// Returns `None` for payloads that carry neither field.
    pub fn from_data(data: &str) -> Option<Self> {
        let data = data.trim();
        if data == DONE_SENTINEL {
            return Some(GenerationEvent::Done);
        }

        let value: serde_json::Value = serde_json::from_str(data).ok()?;
        if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
            return Some(GenerationEvent::error(message));
        }
        value
            .get("progress")
            .and_then(|v| v.as_str())
            .map(GenerationEvent::progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_payload() {
        let event = GenerationEvent::progress("Generating script with AI...");
        assert_eq!(
            event.data(),
            "{\"progress\":\"Generating script with AI...\"}"
        );
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_done_payload() {
        assert_eq!(GenerationEvent::Done.data(), "[DONE]");
        assert!(GenerationEvent::Done.is_terminal());
        assert!(GenerationEvent::error("boom").is_terminal());
    }

    #[test]
    fn test_error_payload_escapes_quotes() {
        let event = GenerationEvent::error("bad \"topic\"");
        assert_eq!(event.data(), r#"{"error":"bad \"topic\""}"#);
        assert_eq!(event.event_type(), GenerationEventType::Error);
    }

    #[test]
    fn test_from_data() {
        assert_eq!(
            GenerationEvent::from_data(r#"{"progress":"step"}"#),
            Some(GenerationEvent::progress("step"))
        );
        assert_eq!(GenerationEvent::from_data("[DONE]"), Some(GenerationEvent::Done));
        assert_eq!(
            GenerationEvent::from_data(r#"{"error":"boom"}"#),
            Some(GenerationEvent::error("boom"))
        );
        assert_eq!(GenerationEvent::from_data("{}"), None);
        assert_eq!(GenerationEvent::from_data("not json"), None);
    }
}
