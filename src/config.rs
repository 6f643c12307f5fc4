use std::fmt;

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    MissingVar { name: &'static str },
    /// A variable is present but could not be parsed as a number.
    InvalidNumber {
        name: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
    /// Validation error.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar { name } => {
                write!(f, "missing required environment variable {name}")
            }
            Self::InvalidNumber { name, value, source } => {
                write!(f, "invalid value '{value}' for {name}: {source}")
            }
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidNumber { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Which completion API answers user questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAi,
}

impl Provider {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            other => Err(ConfigError::Validation(format!(
                "unknown provider '{other}' (expected 'gemini' or 'openai')"
            ))),
        }
    }
}

/// Telegram's practical per-message size limit.
const DEFAULT_CHUNK_SIZE: usize = 4000;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-lite";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub struct Config {
    pub telegram_bot_token: String,
    pub provider: Provider,
    /// API key for the selected provider.
    pub api_key: String,
    pub model: String,
    /// Base URL for OpenAI-compatible endpoints (ignored for Gemini).
    pub openai_base_url: String,
    /// Replies longer than this are split before sending.
    pub chunk_size: usize,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `.env` loading happens in `main` before this is called.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| -> Option<String> {
            lookup(name).filter(|v| !v.trim().is_empty())
        };
        let require = |name: &'static str| -> Result<String, ConfigError> {
            var(name).ok_or(ConfigError::MissingVar { name })
        };

        let telegram_bot_token = require("TELEGRAM_BOT_TOKEN")?;
        // Telegram tokens are formatted as {bot_id}:{secret} where bot_id is numeric
        let token_parts: Vec<&str> = telegram_bot_token.split(':').collect();
        if token_parts.len() != 2 || token_parts[0].parse::<u64>().is_err() || token_parts[1].is_empty() {
            return Err(ConfigError::Validation(
                "TELEGRAM_BOT_TOKEN appears invalid (expected format: 123456789:ABCdefGHI...)".into(),
            ));
        }

        let provider = match var("VITABOT_PROVIDER") {
            Some(value) => Provider::parse(&value)?,
            None => Provider::Gemini,
        };

        let api_key = match provider {
            Provider::Gemini => require("GEMINI_API_KEY")?,
            Provider::OpenAi => require("OPENAI_API_KEY")?,
        };

        let model = var("VITABOT_MODEL").unwrap_or_else(|| {
            match provider {
                Provider::Gemini => DEFAULT_GEMINI_MODEL,
                Provider::OpenAi => DEFAULT_OPENAI_MODEL,
            }
            .to_string()
        });

        let openai_base_url = var("OPENAI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

        let chunk_size = match var("VITABOT_CHUNK_SIZE") {
            Some(value) => {
                let parsed = value.parse::<usize>().map_err(|e| ConfigError::InvalidNumber {
                    name: "VITABOT_CHUNK_SIZE",
                    value: value.clone(),
                    source: e,
                })?;
                if parsed == 0 {
                    return Err(ConfigError::Validation(
                        "VITABOT_CHUNK_SIZE must be greater than zero".into(),
                    ));
                }
                parsed
            }
            None => DEFAULT_CHUNK_SIZE,
        };

        Ok(Self {
            telegram_bot_token,
            provider,
            api_key,
            model,
            openai_base_url,
            chunk_size,
        })
    }
}
