use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use teloxide::{macros::BotCommands, prelude::*};
use tokio::sync::Notify;

/// Type alias for handler result types
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Display help information")]
    Help,
    #[command(description = "About this bot")]
    About,
    #[command(description = "Show your settings")]
    Me,
    #[command(description = "Show bot statistics")]
    Stats,
    #[command(description = "Restart the bot (admin)")]
    Restart,
    #[command(description = "Get the log file (admin)")]
    Logs,
    #[command(description = "Ban a user or list banned users (admin)")]
    Ban(String),
    #[command(description = "Unban a user or list banned users (admin)")]
    Unban(String),
    #[command(description = "Show a user's settings (admin)")]
    Info(String),
}

impl Command {
    /// Commands reserved for the configured admins
    pub fn is_admin_only(&self) -> bool {
        matches!(
            self,
            Command::Restart
                | Command::Logs
                | Command::Ban(_)
                | Command::Unban(_)
                | Command::Info(_)
        )
    }
}

/// Identity of the running bot and the process start time
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: i64,
    pub first_name: String,
    pub username: String,
    pub started_at: DateTime<Utc>,
}

impl BotInfo {
    /// Ask Telegram who we are
    pub async fn fetch(bot: &Bot, started_at: DateTime<Utc>) -> Result<Self, teloxide::RequestError> {
        let me = bot.get_me().await?;
        Ok(Self {
            id: me.user.id.0 as i64,
            first_name: me.user.first_name.clone(),
            username: me.user.username.clone().unwrap_or_default(),
            started_at,
        })
    }
}

/// Lets a handler ask the running dispatcher to be rebuilt
#[derive(Debug, Clone, Default)]
pub struct RestartSignal {
    requested: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl RestartSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Resolves once [`RestartSignal::request`] has been called
    pub async fn wait(&self) {
        self.notify.notified().await;
    }

    /// Returns whether a restart was requested and clears the flag
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }
}
