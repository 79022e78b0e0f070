//! Client for the OpenAI text and image generation APIs.
//!
//! Only the two endpoints the generator needs are covered:
//! chat completions (script writing) and image generations (scene art).
//! Any OpenAI-compatible server works by pointing `OPENAI_BASE_URL` at it.

pub mod client;
pub mod error;
pub mod types;


pub use client::{normalize_api_key, OpenAiClient, OpenAiConfig, PLACEHOLDER_API_KEY};
pub use error::{OpenAiError, OpenAiResult};
pub use types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole, ImageGenerationRequest,
    ImageGenerationResponse, ImageQuality, ImageSize,
};
