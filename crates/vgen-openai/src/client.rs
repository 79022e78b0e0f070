//! OpenAI HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::{OpenAiError, OpenAiResult};
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ImageGenerationRequest,
    ImageGenerationResponse, ImageQuality, ImageSize,
};

/// Credential value shipped in sample configs. Treated as "not configured".
pub const PLACEHOLDER_API_KEY: &str = "demo-key";

/// Configuration for the OpenAI client.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API key; `None` means fallback-only mode
    pub api_key: Option<String>,
    /// Base URL of the API (including `/v1`)
    pub base_url: String,
    /// Chat model used for scripts
    pub text_model: String,
    /// Image model used for scenes
    pub image_model: String,
    /// Token budget for script completions
    pub max_tokens: u32,
    /// Request timeout
    pub timeout: Duration,
    /// Max retries for retryable failures
    pub max_retries: u32,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            text_model: "gpt-4-turbo-preview".to_string(),
            image_model: "dall-e-3".to_string(),
            max_tokens: 1000,
            timeout: Duration::from_secs(60),
            max_retries: 0,
        }
    }
}

impl OpenAiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: normalize_api_key(std::env::var("OPENAI_API_KEY").ok()),
            base_url: std::env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            text_model: std::env::var("OPENAI_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: std::env::var("OPENAI_IMAGE_MODEL").unwrap_or(defaults.image_model),
            max_tokens: std::env::var("OPENAI_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_tokens),
            timeout: Duration::from_secs(
                std::env::var("OPENAI_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            max_retries: std::env::var("OPENAI_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_retries),
        }
    }

    /// Whether a usable credential is configured.
    pub fn has_live_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Drop empty and placeholder keys.
pub fn normalize_api_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && k != PLACEHOLDER_API_KEY)
}

/// Client for the OpenAI API.
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    base_url: Url,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a new client. Fails when no live credential is configured.
    pub fn new(config: OpenAiConfig) -> OpenAiResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(OpenAiError::MissingCredential)?;

        // Trailing slash so that `join` appends instead of replacing the last segment.
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base).map_err(|e| {
            OpenAiError::InvalidConfig(format!("OPENAI_BASE_URL '{}': {}", config.base_url, e))
        })?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(OpenAiError::Network)?;

        Ok(Self {
            http,
            api_key,
            base_url,
            config,
        })
    }

    /// Create from environment variables.
    ///
    /// Returns `Ok(None)` when no live credential is configured.
    pub fn from_env() -> OpenAiResult<Option<Self>> {
        let config = OpenAiConfig::from_env();
        if !config.has_live_credential() {
            return Ok(None);
        }
        Self::new(config).map(Some)
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Ask the chat model for a completion and return its text.
    ///
    /// `Ok(None)` means the call succeeded but produced no usable text.
    pub async fn complete(
        &self,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> OpenAiResult<Option<String>> {
        let request = ChatCompletionRequest {
            model: self.config.text_model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens: Some(self.config.max_tokens),
        };

        let response = self.chat_completion(&request).await?;
        Ok(response.first_content().map(|s| s.to_string()))
    }

    /// Raw chat completion call.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> OpenAiResult<ChatCompletionResponse> {
        self.post_json("chat/completions", request).await
    }

    /// Generate a single image and return its URL.
    ///
    /// `Ok(None)` means the call succeeded but returned no URL.
    pub async fn generate_image(
        &self,
        prompt: impl Into<String>,
        size: ImageSize,
        quality: ImageQuality,
    ) -> OpenAiResult<Option<String>> {
        let request = ImageGenerationRequest {
            model: self.config.image_model.clone(),
            prompt: prompt.into(),
            n: 1,
            size,
            quality,
        };

        let response = self.image_generation(&request).await?;
        Ok(response.first_url().map(|s| s.to_string()))
    }

    /// Raw image generation call.
    pub async fn image_generation(
        &self,
        request: &ImageGenerationRequest,
    ) -> OpenAiResult<ImageGenerationResponse> {
        self.post_json("images/generations", request).await
    }

    fn endpoint(&self, path: &str) -> OpenAiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| OpenAiError::InvalidConfig(format!("Bad endpoint '{}': {}", path, e)))
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> OpenAiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("Sending OpenAI request to {}", url);

        let bytes = self
            .with_retry(|| async {
                let response = self
                    .http
                    .post(url.clone())
                    .bearer_auth(&self.api_key)
                    .json(body)
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    return Err(OpenAiError::from_http_status(status.as_u16(), text));
                }

                Ok::<_, OpenAiError>(response.bytes().await?)
            })
            .await?;

        serde_json::from_slice(&bytes).map_err(|e| {
            OpenAiError::invalid_response(format!("Failed to parse {} response: {}", path, e))
        })
    }

    /// Execute with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> OpenAiResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = OpenAiResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        "OpenAI request failed (attempt {}), retrying in {:?}: {}",
                        attempt + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
