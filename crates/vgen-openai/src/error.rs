//! OpenAI client error types.

use thiserror::Error;

pub type OpenAiResult<T> = Result<T, OpenAiError>;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("OPENAI_API_KEY not configured")]
    MissingCredential,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server error {0}: {1}")]
    ServerError(u16, String),

    #[error("Request failed with status {0}: {1}")]
    RequestFailed(u16, String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl OpenAiError {
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Map a non-success HTTP status to an error.
    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => Self::Unauthorized(body),
            429 => Self::RateLimited(body),
            500..=599 => Self::ServerError(status, body),
            _ => Self::RequestFailed(status, body),
        }
    }

    /// HTTP status behind this error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            OpenAiError::Unauthorized(_) => Some(401),
            OpenAiError::RateLimited(_) => Some(429),
            OpenAiError::ServerError(status, _) | OpenAiError::RequestFailed(status, _) => {
                Some(*status)
            }
            OpenAiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OpenAiError::RateLimited(_) | OpenAiError::ServerError(..) | OpenAiError::Network(_)
        )
    }
}
