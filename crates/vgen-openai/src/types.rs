//! OpenAI request/response types.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Upper bound on generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Response body of `POST /chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatResponseMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if it has any non-blank content.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

/// Output resolution for generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1792x1024")]
    Landscape,
    #[serde(rename = "1024x1792")]
    Portrait,
}

/// Quality tier for generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Standard,
    Hd,
}

/// Request body for `POST /images/generations`.
#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    /// Number of images
    pub n: u8,
    pub size: ImageSize,
    pub quality: ImageQuality,
}

/// Response body of `POST /images/generations`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationResponse {
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

impl ImageGenerationResponse {
    /// URL of the first image, if present and non-empty.
    pub fn first_url(&self) -> Option<&str> {
        self.data
            .first()
            .and_then(|d| d.url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-4-turbo-preview".into(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            max_tokens: Some(1000),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["max_tokens"], 1000);
    }

    #[test]
    fn test_image_request_serialization() {
        let request = ImageGenerationRequest {
            model: "dall-e-3".into(),
            prompt: "a nebula".into(),
            n: 1,
            size: ImageSize::Landscape,
            quality: ImageQuality::Standard,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["size"], "1792x1024");
        assert_eq!(value["quality"], "standard");
        assert_eq!(value["n"], 1);
    }

    #[test]
    fn test_first_content_skips_blank() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "   "}}]
        }))
        .unwrap();
        assert_eq!(response.first_content(), None);

        let response: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert_eq!(response.first_content(), None);

        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "Hook!"}, "finish_reason": "stop"}]
        }))
        .unwrap();
        assert_eq!(response.first_content(), Some("Hook!"));
    }

    #[test]
    fn test_first_url() {
        let response: ImageGenerationResponse =
            serde_json::from_value(json!({ "created": 1, "data": [{"url": ""}] })).unwrap();
        assert_eq!(response.first_url(), None);

        let response: ImageGenerationResponse = serde_json::from_value(json!({
            "data": [{"url": "https://img.example.com/1.png", "revised_prompt": "x"}]
        }))
        .unwrap();
        assert_eq!(response.first_url(), Some("https://img.example.com/1.png"));
    }
}
