pub mod callbacks;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod keyboards;
pub mod moderation;
pub mod telegram;
pub mod templates;
pub mod types;
pub mod utils;

pub use crate::config::BotConfig;
pub use crate::error::{BotError, BotResult};
pub use crate::telegram::{schema, set_bot_commands};
pub use crate::types::{BotInfo, Command, HandlerResult, RestartSignal};
pub use teloxide::prelude::Dispatcher;
