//! Application state.

use std::sync::Arc;

use tracing::info;
use vgen_openai::{OpenAiClient, OpenAiResult};

use crate::config::ApiConfig;
use crate::pipeline::Pipeline;
use crate::store::ResultStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<ResultStore>,
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Create new application state.
    ///
    /// Without a usable credential the pipeline serves fallback content only.
    /// A live credential with an unusable provider config is an error.
    pub fn new(config: ApiConfig) -> OpenAiResult<Self> {
        let client = if config.openai.has_live_credential() {
            Some(Arc::new(OpenAiClient::new(config.openai.clone())?))
        } else {
            None
        };

        match &client {
            Some(client) => info!(
                provider_mode = "live",
                text_model = %client.config().text_model,
                image_model = %client.config().image_model,
                history_limit = config.video_history_limit,
                "Initializing application state"
            ),
            None => info!(
                provider_mode = "fallback",
                history_limit = config.video_history_limit,
                "Initializing application state"
            ),
        }

        let store = Arc::new(ResultStore::with_capacity(config.video_history_limit));
        let pipeline = Arc::new(Pipeline::new(Arc::clone(&store), client));

        Ok(Self {
            config,
            store,
            pipeline,
        })
    }

    /// `live` when the provider is called, `fallback` otherwise.
    pub fn provider_mode(&self) -> &'static str {
        if self.pipeline.is_live() {
            "live"
        } else {
            "fallback"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgen_openai::OpenAiConfig;

    #[test]
    fn test_fallback_mode_without_credential() {
        let state = AppState::new(ApiConfig::default()).unwrap();
        assert_eq!(state.provider_mode(), "fallback");
        assert_eq!(state.store.capacity(), 50);
    }

    #[test]
    fn test_live_mode_with_credential() {
        let config = ApiConfig {
            openai: OpenAiConfig {
                api_key: Some("sk-test".into()),
                ..OpenAiConfig::default()
            },
            ..ApiConfig::default()
        };
        let state = AppState::new(config).unwrap();
        assert_eq!(state.provider_mode(), "live");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ApiConfig {
            openai: OpenAiConfig {
                api_key: Some("sk-test".into()),
                base_url: "not a url".into(),
                ..OpenAiConfig::default()
            },
            ..ApiConfig::default()
        };
        assert!(AppState::new(config).is_err());
    }
}
