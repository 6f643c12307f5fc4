//! Telegram client using teloxide.

use teloxide::prelude::*;
use tracing::warn;

use crate::chunk::split_message;

/// Telegram API client.
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), String> {
        self.bot
            .send_message(chat_id, text)
            .await
            .map(|_| ())
            .map_err(|e| {
                let msg = format!("Failed to send: {e}");
                warn!("{}", msg);
                msg
            })
    }

    /// Send a reply, split into chunks of at most `limit` characters.
    ///
    /// Chunks go out in order; a send failure aborts the remaining chunks.
    pub async fn send_chunked(
        &self,
        chat_id: ChatId,
        text: &str,
        limit: usize,
    ) -> Result<(), String> {
        for chunk in split_message(text, limit) {
            self.send_message(chat_id, &chunk).await?;
        }
        Ok(())
    }
}
