//! Health assistant - relays a user question to the completion API.

use tracing::warn;

use crate::providers::CompletionClient;

/// Fixed instruction sent with every question.
const SYSTEM_PROMPT: &str = "You are a helpful AI health assistant. Answer questions about \
health, wellness, and medicine clearly and concisely, and remind users to consult a medical \
professional for diagnoses or treatment decisions.";

pub struct Assistant {
    client: Box<dyn CompletionClient>,
}

impl Assistant {
    pub fn new(client: Box<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Static `/start` reply naming the assistant and its model.
    pub fn greeting(&self) -> String {
        format!(
            "Hello! I am your AI Health Assistant powered by {}. Ask me anything about health.",
            self.client.model()
        )
    }

    /// Answer a single question.
    ///
    /// This never fails from the caller's point of view: a completion error
    /// is converted into the reply text for that one request.
    pub async fn answer(&self, question: &str) -> String {
        match self.client.complete(SYSTEM_PROMPT, question).await {
            Ok(text) => text,
            Err(e) => {
                warn!("completion request failed: {e}");
                format!("Error generating response: {e}")
            }
        }
    }
}
