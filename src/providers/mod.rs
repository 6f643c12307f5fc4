//! Completion API clients - one module per provider, unified behind a trait.

pub mod gemini;
pub mod openai;

use async_trait::async_trait;

use crate::config::{Config, Provider};

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

#[derive(Debug)]
pub enum CompletionError {
    Http(String),
    Api(String),
    Parse(String),
    Empty,
}

impl std::fmt::Display for CompletionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionError::Http(e) => write!(f, "HTTP error: {e}"),
            CompletionError::Api(e) => write!(f, "API error: {e}"),
            CompletionError::Parse(e) => write!(f, "Parse error: {e}"),
            CompletionError::Empty => write!(f, "Empty response"),
        }
    }
}

impl std::error::Error for CompletionError {}

/// A chat-completion backend: single-turn prompt in, generated text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one user prompt with a fixed system instruction and return the
    /// generated text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CompletionError>;

    /// Model identifier used in requests (shown in the greeting).
    fn model(&self) -> &str;
}

/// Build the client selected by configuration.
pub fn from_config(config: &Config) -> Box<dyn CompletionClient> {
    match config.provider {
        Provider::Gemini => Box::new(GeminiClient::new(
            config.api_key.clone(),
            config.model.clone(),
        )),
        Provider::OpenAi => Box::new(OpenAiClient::new(
            config.api_key.clone(),
            config.model.clone(),
            config.openai_base_url.clone(),
        )),
    }
}
