//! Gemini API client (generativelanguage `generateContent`).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionClient, CompletionError};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    message: String,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        Self { api_key, model, client }
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, CompletionError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| CompletionError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Http(format!("failed to read response: {e}")))?;

        debug!("Gemini response status: {status}");

        if !status.is_success() {
            return Err(CompletionError::Api(format!("{status}: {body}")));
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| CompletionError::Parse(e.to_string()))?;

        extract_text(parsed)
    }
}

/// Pull the generated text out of a parsed response.
fn extract_text(parsed: GenerateResponse) -> Result<String, CompletionError> {
    if let Some(error) = parsed.error {
        return Err(CompletionError::Api(error.message));
    }

    let candidates = parsed.candidates.ok_or(CompletionError::Empty)?;
    let candidate = candidates.first().ok_or(CompletionError::Empty)?;
    let content = candidate.content.as_ref().ok_or(CompletionError::Empty)?;

    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.is_empty() {
        return Err(CompletionError::Empty);
    }
    Ok(text)
}

#[async_trait::async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CompletionError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: system.to_string(),
                }],
            }),
        };

        self.generate(&request).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_from_candidate() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Drink plenty of water."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "Drink plenty of water.");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "part one "}, {"text": "part two"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "part one part two");
    }

    #[test]
    fn test_extract_text_api_error() {
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"error": {"message": "API key not valid"}}"#).unwrap();
        let err = extract_text(parsed).unwrap_err();
        assert!(matches!(err, CompletionError::Api(_)));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(extract_text(parsed).unwrap_err(), CompletionError::Empty));
    }

    #[test]
    fn test_extract_text_non_text_parts_only() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "abc"}}]}}]}"#,
        )
        .unwrap();
        assert!(matches!(extract_text(parsed).unwrap_err(), CompletionError::Empty));
    }

    #[test]
    fn test_request_serializes_system_instruction() {
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: "hi".into() }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part { text: "be helpful".into() }],
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be helpful");
        // No role key on the system instruction
        assert!(json["systemInstruction"].get("role").is_none());
    }
}
