use std::fmt;

/// Errors raised outside the store layer
#[derive(Debug)]
pub enum BotError {
    /// Telegram API error
    TelegramError(teloxide::RequestError),
    /// Malformed configuration
    ConfigError(config::ConfigError),
    /// Invalid command arguments
    InvalidArguments(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::TelegramError(e) => write!(f, "Telegram error: {}", e),
            BotError::ConfigError(e) => write!(f, "Configuration error: {}", e),
            BotError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
        }
    }
}

impl std::error::Error for BotError {}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::TelegramError(err)
    }
}

impl From<config::ConfigError> for BotError {
    fn from(err: config::ConfigError) -> Self {
        BotError::ConfigError(err)
    }
}

pub type BotResult<T> = Result<T, BotError>;

/// Text shown in the chat when an error is reported to the user
pub trait UserMessage {
    fn user_message(&self) -> String;
}

impl UserMessage for BotError {
    fn user_message(&self) -> String {
        match self {
            BotError::TelegramError(e) => format!("❌ Communication error: {}", e),
            BotError::ConfigError(e) => format!("❌ {}", e),
            BotError::InvalidArguments(msg) => format!("❌ {}", msg),
        }
    }
}
