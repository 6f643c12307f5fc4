mod assistant;
mod chunk;
mod config;
mod providers;
mod telegram;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info};
use tracing_subscriber::prelude::*;

use assistant::Assistant;
use config::Config;
use telegram::TelegramClient;

struct BotState {
    assistant: Assistant,
    telegram: TelegramClient,
    chunk_size: usize,
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum Command {
    #[command(description = "introduce the assistant")]
    Start,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    info!("🚀 Starting vitabot...");
    info!("Provider: {:?}, model: {}", config.provider, config.model);

    let bot = Bot::new(&config.telegram_bot_token);

    let state = Arc::new(BotState {
        assistant: Assistant::new(providers::from_config(&config)),
        telegram: TelegramClient::new(bot.clone()),
        chunk_size: config.chunk_size,
    });

    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(dptree::endpoint(handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_command(msg: Message, cmd: Command, state: Arc<BotState>) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            info!("👋 /start in chat {}", msg.chat.id);
            state
                .telegram
                .send_message(msg.chat.id, &state.assistant.greeting())
                .await
                .ok();
        }
    }
    Ok(())
}

async fn handle_message(msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let text = match msg.text() {
        Some(t) => t,
        None => return Ok(()),
    };

    // Unrecognized commands are not questions for the model
    if text.starts_with('/') {
        return Ok(());
    }

    let username = msg
        .from
        .as_ref()
        .map(|u| u.username.as_deref().unwrap_or(&u.first_name))
        .unwrap_or("unknown");
    let preview: String = text.chars().take(100).collect();
    info!("📨 Message from {username}: \"{preview}\"");

    let reply = state.assistant.answer(text).await;
    state
        .telegram
        .send_chunked(msg.chat.id, &reply, state.chunk_size)
        .await
        .ok();

    Ok(())
}
