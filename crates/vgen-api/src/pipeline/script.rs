//! Script synthesis through the chat model.

use std::sync::Arc;

use tracing::{debug, warn};
use vgen_models::GenerateRequest;
use vgen_openai::OpenAiClient;

use super::fallback::fallback_script;
use crate::metrics;

/// Writes video scripts, falling back to placeholder text.
#[derive(Clone)]
pub struct ScriptWriter {
    client: Option<Arc<OpenAiClient>>,
}

impl ScriptWriter {
    /// `None` disables live calls entirely.
    pub fn new(client: Option<Arc<OpenAiClient>>) -> Self {
        Self { client }
    }

    pub fn is_live(&self) -> bool {
        self.client.is_some()
    }

    /// Produce a script for the request. Never fails.
    pub async fn write(&self, request: &GenerateRequest) -> String {
        let Some(client) = &self.client else {
            debug!("No provider credential, using fallback script");
            metrics::record_fallback("script", "unconfigured");
            return fallback_script(&request.topic, &request.niche, request.duration);
        };

        let (system, user) = prompts(request);
        match client.complete(system, user).await {
            Ok(Some(script)) => {
                metrics::record_provider_request("text", true);
                script
            }
            Ok(None) => {
                metrics::record_provider_request("text", true);
                warn!(topic = %request.topic, "Script completion had no content, using fallback");
                metrics::record_fallback("script", "empty");
                fallback_script(&request.topic, &request.niche, request.duration)
            }
            Err(e) => {
                metrics::record_provider_request("text", false);
                warn!(topic = %request.topic, error = %e, "Script generation failed, using fallback");
                metrics::record_fallback("script", "error");
                fallback_script(&request.topic, &request.niche, request.duration)
            }
        }
    }
}

/// System and user messages for a request.
fn prompts(request: &GenerateRequest) -> (String, String) {
    let system = format!(
        "You are a viral YouTube scriptwriter specializing in {} content. \
         Create engaging, hook-driven scripts optimized for viewer retention. \
         Include strong openings, curiosity gaps, and compelling narratives.",
        request.niche
    );
    let user = format!(
        "Write a {}-second YouTube video script about: {}. \
         Make it attention-grabbing and optimized for the YouTube algorithm. \
         Include emotional hooks and cliffhangers.",
        request.duration, request.topic
    );
    (system, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vgen_openai::OpenAiConfig;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> GenerateRequest {
        GenerateRequest::new("Ocean mysteries", "mystery", 60).unwrap()
    }

    fn live_writer(server: &MockServer) -> ScriptWriter {
        let client = OpenAiClient::new(OpenAiConfig {
            api_key: Some("sk-test".into()),
            base_url: format!("{}/v1", server.uri()),
            ..OpenAiConfig::default()
        })
        .unwrap();
        ScriptWriter::new(Some(Arc::new(client)))
    }

    #[test]
    fn test_prompts() {
        let (system, user) = prompts(&request());
        assert!(system.starts_with("You are a viral YouTube scriptwriter specializing in mystery content. Create"));
        assert_eq!(
            user,
            "Write a 60-second YouTube video script about: Ocean mysteries. Make it attention-grabbing \
             and optimized for the YouTube algorithm. Include emotional hooks and cliffhangers."
        );
    }

    #[tokio::test]
    async fn test_unconfigured_uses_fallback() {
        let writer = ScriptWriter::new(None);
        assert!(!writer.is_live());

        let script = writer.write(&request()).await;
        assert_eq!(script, fallback_script("Ocean mysteries", "mystery", 60));
    }

    #[tokio::test]
    async fn test_live_script_returned() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({ "max_tokens": 1000 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "The sea hides secrets."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let script = live_writer(&server).write(&request()).await;
        assert_eq!(script, "The sea hides secrets.");
    }

    #[tokio::test]
    async fn test_live_failure_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let script = live_writer(&server).write(&request()).await;
        assert!(script.contains("Ocean mysteries"));
        assert!(script.contains("[Duration optimized for 60 seconds]"));
    }

    #[tokio::test]
    async fn test_blank_content_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "   "}}]
            })))
            .mount(&server)
            .await;

        let script = live_writer(&server).write(&request()).await;
        assert_eq!(script, fallback_script("Ocean mysteries", "mystery", 60));
    }
}
