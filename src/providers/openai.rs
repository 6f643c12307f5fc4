//! Chat-completions client for OpenAI-compatible endpoints.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionClient, CompletionError};

pub struct OpenAiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        Self { api_key, model, base_url, client }
    }
}

fn extract_text(parsed: ChatResponse) -> Result<String, CompletionError> {
    parsed
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .filter(|text| !text.is_empty())
        .ok_or(CompletionError::Empty)
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Http(e.to_string()))?;

        let status = response.status();
        debug!("chat completion response status: {status}");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api(format!("{status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        extract_text(parsed)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "Get some rest."}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "Get some rest.");
    }

    #[test]
    fn test_extract_text_no_choices() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(extract_text(parsed).unwrap_err(), CompletionError::Empty));
    }

    #[test]
    fn test_extract_text_null_content() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
        )
        .unwrap();
        assert!(matches!(extract_text(parsed).unwrap_err(), CompletionError::Empty));
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![
                ChatMessage { role: "system", content: "be helpful".into() },
                ChatMessage { role: "user", content: "hi".into() },
            ],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }
}
