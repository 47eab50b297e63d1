//! Command handler helper functions
//!
//! This module provides the pieces shared by commands and callbacks:
//! building replies from store data and sending them either as text or as
//! a captioned welcome image.

use chrono::Utc;
use store::{free_storage, Store, StoreResult, UserStore};
use teloxide::{
    prelude::*,
    types::{InlineKeyboardMarkup, InputFile, MessageId, ParseMode},
};
use url::Url;

use crate::config::BotConfig;
use crate::templates::{AboutMessage, HelpMessage, NewUserAlert, StartMessage, StatsMessage};
use crate::types::BotInfo;
use crate::utils::{format_runtime, mention_html};

/// Everything `/start` has to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartPlan {
    /// Alert for the operations channel, set only for first-time users
    pub alert: Option<(ChatId, String)>,
    pub welcome: String,
}

/// Register the user if needed and prepare the `/start` replies
pub async fn plan_start<S: UserStore + ?Sized>(
    store: &S,
    config: &BotConfig,
    user_id: i64,
    name: &str,
) -> StoreResult<StartPlan> {
    let is_new = !store.is_user_exist(user_id).await?;
    let user = store.get_or_create_user(user_id, &config.user_defaults()).await?;
    let mention = mention_html(user_id, name);

    let alert = match config.log_channel {
        Some(channel) if is_new => Some((
            ChatId(channel),
            NewUserAlert {
                user_id,
                mention: &mention,
            }
            .render(),
        )),
        _ => None,
    };

    let welcome = StartMessage {
        mention: &mention,
        method: &user.method,
        base_site: &user.base_site,
    }
    .render();

    Ok(StartPlan { alert, welcome })
}

/// Gather the figures shown by `/stats`
pub async fn collect_stats(store: &dyn Store, info: &BotInfo) -> StoreResult<StatsMessage> {
    let used_bytes = store.get_db_size().await?;
    let stats = store.get_bot_stats().await?;
    let total_users = store.total_users_count().await?;

    Ok(StatsMessage {
        total_users,
        stats,
        used_bytes,
        free_bytes: free_storage(used_bytes),
        runtime: format_runtime(Utc::now() - info.started_at),
    })
}

pub fn help_text(config: &BotConfig, info: &BotInfo) -> String {
    HelpMessage {
        first_name: &info.first_name,
        bot_username: &info.username,
        repo: &config.source_code,
        owner: &config.owner_contact,
    }
    .render()
}

pub fn about_text(config: &BotConfig, info: &BotInfo) -> String {
    AboutMessage {
        bot_mention: &mention_html(info.id, &info.first_name),
        repo: &config.source_code,
    }
    .render()
}

/// Send `text` as the caption of `image` when one is configured, as plain text otherwise
pub async fn send_banner(
    bot: &Bot,
    chat_id: ChatId,
    image: Option<&Url>,
    text: String,
    keyboard: InlineKeyboardMarkup,
) -> Result<Message, teloxide::RequestError> {
    match image {
        Some(url) => {
            bot.send_photo(chat_id, InputFile::url(url.clone()))
                .caption(text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await
        }
        None => {
            bot.send_message(chat_id, text)
                .parse_mode(ParseMode::Html)
                .disable_web_page_preview(true)
                .reply_markup(keyboard)
                .await
        }
    }
}

/// Replace the content of a bot message in place, keeping its kind
pub async fn edit_banner(
    bot: &Bot,
    message: &Message,
    text: String,
    keyboard: InlineKeyboardMarkup,
) -> Result<(), teloxide::RequestError> {
    if message.photo().is_some() {
        bot.edit_message_caption(message.chat.id, message.id)
            .caption(text)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await?;
    } else {
        bot.edit_message_text(message.chat.id, message.id, text)
            .parse_mode(ParseMode::Html)
            .disable_web_page_preview(true)
            .reply_markup(keyboard)
            .await?;
    }
    Ok(())
}

/// Tell a user their ban state changed. Delivery failures are only logged.
pub async fn notify_user(bot: &Bot, user_id: i64, text: &str) -> bool {
    match bot.send_message(ChatId(user_id), text).await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!("Could not notify user {}: {}", user_id, err);
            false
        }
    }
}

/// Send an HTML reply quoting the triggering message
pub async fn reply_html(
    bot: &Bot,
    chat_id: ChatId,
    reply_to: MessageId,
    text: String,
) -> Result<Message, teloxide::RequestError> {
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_to_message_id(reply_to)
        .await
}
