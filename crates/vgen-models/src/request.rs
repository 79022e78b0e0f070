//! Generation request parsing and validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::niche::Niche;

/// Duration used when the request does not carry one.
pub const DEFAULT_DURATION_SECS: u32 = 60;

/// Maximum topic length (characters).
pub const MAX_TOPIC_LENGTH: usize = 500;

const MISSING_TOPIC: &str = "Please enter a video topic";

/// Errors raised while turning a request body into a [`GenerateRequest`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid request body: {0}")]
    InvalidJson(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("{0}")]
    Validation(String),
}

/// Body as sent by clients. Every field is optional at this stage.
#[derive(Debug, Default, Deserialize)]
struct RawGenerateRequest {
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    niche: Option<String>,
    /// Number or numeric string
    #[serde(default)]
    duration: Option<Value>,
}

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GenerateRequest {
    /// Video topic
    #[validate(length(max = 500, message = "Topic must be at most 500 characters"))]
    pub topic: String,

    /// Niche label, stored as-is
    pub niche: String,

    /// Target duration in seconds
    #[validate(range(min = 1, max = 600, message = "Duration must be between 1 and 600 seconds"))]
    pub duration: u32,
}

impl GenerateRequest {
    /// Build and validate a request.
    pub fn new(
        topic: impl Into<String>,
        niche: impl Into<String>,
        duration: u32,
    ) -> Result<Self, RequestError> {
        let topic = sanitize_topic(&topic.into());
        if topic.is_empty() {
            return Err(RequestError::Validation(MISSING_TOPIC.to_string()));
        }

        let request = Self {
            topic,
            niche: niche.into().trim().to_string(),
            duration,
        };
        request
            .validate()
            .map_err(|e| RequestError::Validation(first_message(&e)))?;
        Ok(request)
    }

    /// Parse a raw JSON body.
    ///
    /// Missing `niche` defaults to the first known niche, missing `duration`
    /// to [`DEFAULT_DURATION_SECS`]. A blank topic or a non-numeric duration
    /// is rejected.
    pub fn from_json(body: &[u8]) -> Result<Self, RequestError> {
        let raw: RawGenerateRequest =
            serde_json::from_slice(body).map_err(|e| RequestError::InvalidJson(e.to_string()))?;

        let duration = match raw.duration {
            None | Some(Value::Null) => DEFAULT_DURATION_SECS,
            Some(value) => {
                let secs = parse_duration(&value)
                    .ok_or_else(|| RequestError::InvalidDuration(value.to_string()))?;
                u32::try_from(secs).map_err(|_| RequestError::InvalidDuration(secs.to_string()))?
            }
        };

        let niche = raw
            .niche
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| Niche::default().as_str().to_string());

        Self::new(raw.topic.unwrap_or_default(), niche, duration)
    }

    /// Known niche for this request, if the label matches one.
    pub fn known_niche(&self) -> Option<Niche> {
        Niche::parse(&self.niche)
    }
}

/// Parse a duration the way a lenient integer parser would.
///
/// Numbers are truncated toward zero; strings contribute their leading
/// integer (`"60"`, `" 90s"`, `"-5"`). Anything else yields `None`.
pub fn parse_duration(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim_start();
            let (sign, digits) = match s.strip_prefix('-') {
                Some(rest) => (-1, rest),
                None => (1, s.strip_prefix('+').unwrap_or(s)),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..end].parse::<i64>().ok().map(|n| sign * n)
        }
        _ => None,
    }
}

/// Drop control characters (except newlines and tabs), trim, and cap length.
fn sanitize_topic(input: &str) -> String {
    let filtered: String = input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    filtered.trim().chars().take(MAX_TOPIC_LENGTH + 1).collect()
}

fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_string_duration() {
        let body = br#"{"topic":"Ocean mysteries","niche":"mystery","duration":"60"}"#;
        let request = GenerateRequest::from_json(body).unwrap();
        assert_eq!(request.topic, "Ocean mysteries");
        assert_eq!(request.niche, "mystery");
        assert_eq!(request.duration, 60);
        assert_eq!(request.known_niche(), Some(Niche::Mystery));
    }

    #[test]
    fn test_from_json_numeric_duration_and_defaults() {
        let request = GenerateRequest::from_json(br#"{"topic":"x","duration":90}"#).unwrap();
        assert_eq!(request.duration, 90);
        assert_eq!(request.niche, "mystery");

        let request = GenerateRequest::from_json(br#"{"topic":"x"}"#).unwrap();
        assert_eq!(request.duration, DEFAULT_DURATION_SECS);
    }

    #[test]
    fn test_unknown_niche_is_kept() {
        let request = GenerateRequest::from_json(br#"{"topic":"x","niche":"cooking"}"#).unwrap();
        assert_eq!(request.niche, "cooking");
        assert_eq!(request.known_niche(), None);
    }

    #[test]
    fn test_missing_topic_rejected() {
        let err = GenerateRequest::from_json(br#"{"niche":"mystery","duration":"60"}"#).unwrap_err();
        assert_eq!(err, RequestError::Validation("Please enter a video topic".into()));

        let err = GenerateRequest::from_json(br#"{"topic":"   "}"#).unwrap_err();
        assert!(matches!(err, RequestError::Validation(_)));
    }

    #[test]
    fn test_non_numeric_duration_rejected() {
        let err = GenerateRequest::from_json(br#"{"topic":"x","duration":"soon"}"#).unwrap_err();
        assert!(matches!(err, RequestError::InvalidDuration(_)));

        let err = GenerateRequest::from_json(br#"{"topic":"x","duration":"-5"}"#).unwrap_err();
        assert!(matches!(err, RequestError::InvalidDuration(_)));

        let err = GenerateRequest::from_json(br#"{"topic":"x","duration":0}"#).unwrap_err();
        assert!(matches!(err, RequestError::Validation(_)));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = GenerateRequest::from_json(b"{topic").unwrap_err();
        assert!(matches!(err, RequestError::InvalidJson(_)));

        let err = GenerateRequest::from_json(b"[1,2]").unwrap_err();
        assert!(matches!(err, RequestError::InvalidJson(_)));
    }

    #[test]
    fn test_topic_too_long_rejected() {
        let err = GenerateRequest::new("a".repeat(MAX_TOPIC_LENGTH + 1), "tech", 30).unwrap_err();
        assert_eq!(
            err,
            RequestError::Validation("Topic must be at most 500 characters".into())
        );

        let request = GenerateRequest::new("a".repeat(MAX_TOPIC_LENGTH), "tech", 30).unwrap();
        assert_eq!(request.topic.chars().count(), MAX_TOPIC_LENGTH);
    }

    #[test]
    fn test_topic_sanitized() {
        let request = GenerateRequest::new("  Lost\u{0007} cities \n", "history", 30).unwrap();
        assert_eq!(request.topic, "Lost cities");

        let request = GenerateRequest::new("\u{7}  Deep sea\u{1b} ", "science", 30).unwrap();
        assert_eq!(request.topic, "Deep sea");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration(&json!(60)), Some(60));
        assert_eq!(parse_duration(&json!(59.9)), Some(59));
        assert_eq!(parse_duration(&json!("90")), Some(90));
        assert_eq!(parse_duration(&json!("  30 seconds")), Some(30));
        assert_eq!(parse_duration(&json!("-5")), Some(-5));
        assert_eq!(parse_duration(&json!("abc")), None);
        assert_eq!(parse_duration(&json!("")), None);
        assert_eq!(parse_duration(&json!(true)), None);
    }
}
