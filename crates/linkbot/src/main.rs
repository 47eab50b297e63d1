use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use store::{BannedUsers, SharedStore, SqliteStore};
use telegram::{schema, set_bot_commands, BotConfig, BotError, BotInfo, RestartSignal};
use teloxide::prelude::*;
use tracing_subscriber::{prelude::*, EnvFilter};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Log to stderr and append a plain-text copy to `log_file` for `/logs`
fn init_logging(log_file: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

async fn run(config: Arc<BotConfig>) -> Result<(), BoxError> {
    let store: SharedStore = Arc::new(SqliteStore::connect(&config.database_url).await?);
    tracing::info!("Connected to database");

    // Initialize the bot from environment variables
    let bot = Bot::from_env();
    let info = Arc::new(BotInfo::fetch(&bot, Utc::now()).await?);
    tracing::info!("Logged in as @{} ({})", info.username, info.id);

    if let Err(err) = set_bot_commands(&bot).await {
        tracing::warn!("Failed to register bot commands: {}", err);
    }

    let restart = RestartSignal::new();

    loop {
        let banned = BannedUsers::load(store.as_ref()).await?;

        let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
            .dependencies(dptree::deps![
                store.clone(),
                banned,
                config.clone(),
                info.clone(),
                restart.clone()
            ])
            .default_handler(|upd| async move {
                tracing::trace!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build();

        let token = dispatcher.shutdown_token();
        let signal = restart.clone();
        let watcher = tokio::spawn(async move {
            signal.wait().await;
            match token.shutdown() {
                Ok(done) => done.await,
                Err(err) => tracing::warn!("Dispatcher was not running: {}", err),
            }
        });

        tracing::info!("Bot started");
        dispatcher.dispatch().await;
        watcher.abort();

        if !restart.take() {
            break;
        }
        tracing::info!("Restarting dispatcher");
    }

    tracing::info!("Bot stopped");
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    let config = match BotConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(err) => {
            eprintln!("{}", BotError::from(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = init_logging(&config.log_file) {
        eprintln!("Failed to open log file {}: {}", config.log_file.display(), err);
        std::process::exit(1);
    }

    if let Err(err) = run(config).await {
        tracing::error!("Fatal error: {}", err);
        std::process::exit(1);
    }
}
