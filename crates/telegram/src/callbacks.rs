//! Callback query handlers for inline keyboard interactions

use std::sync::Arc;

use store::{BannedUsers, SharedStore};
use teloxide::prelude::*;

use crate::config::BotConfig;
use crate::constants::{messages, MAX_CALLBACK_DATA_LEN};
use crate::handlers::{self, edit_banner, notify_user};
use crate::keyboards::{self, CallbackAction};
use crate::moderation::{self, BanAction, BanOutcome};
use crate::types::{BotInfo, HandlerResult, RestartSignal};
use crate::utils::user_id_of;

/// Handle all callback queries from inline keyboards
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    store: SharedStore,
    banned: BannedUsers,
    config: Arc<BotConfig>,
    info: Arc<BotInfo>,
    restart: RestartSignal,
) -> HandlerResult {
    let Some(data) = q.data.as_deref() else {
        bot.answer_callback_query(&q.id).await?;
        return Ok(());
    };

    // Validate callback data length to prevent abuse
    if data.len() > MAX_CALLBACK_DATA_LEN {
        tracing::warn!("Callback data too long: {} bytes", data.len());
        bot.answer_callback_query(&q.id).await?;
        return Ok(());
    }

    let Some(action) = CallbackAction::parse(data) else {
        tracing::warn!("Unknown callback data: {}", data);
        bot.answer_callback_query(&q.id).await?;
        return Ok(());
    };

    let caller = user_id_of(&q.from);
    let needs_admin = matches!(action, CallbackAction::Ban(_) | CallbackAction::Restart);
    if needs_admin && !config.is_admin(caller) {
        tracing::warn!("User {} pressed admin button {}", caller, data);
        bot.answer_callback_query(&q.id)
            .text(messages::ADMIN_ONLY)
            .show_alert(true)
            .await?;
        return Ok(());
    }

    match action {
        CallbackAction::Ban(user_id) => {
            let outcome = match moderation::apply(store.as_ref(), &banned, BanAction::Ban, user_id).await
            {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::error!("Error banning user {} from button: {}", user_id, err);
                    bot.answer_callback_query(&q.id).await?;
                    return Ok(());
                }
            };
            if outcome == BanOutcome::Changed {
                notify_user(&bot, user_id, BanAction::Ban.notice()).await;
            }
            bot.answer_callback_query(&q.id)
                .text(BanAction::Ban.summary(outcome, user_id))
                .show_alert(true)
                .await?;
        }
        CallbackAction::Delete => {
            bot.answer_callback_query(&q.id).await?;
            if let Some(message) = &q.message {
                bot.delete_message(message.chat.id, message.id).await?;
            }
        }
        CallbackAction::Restart => {
            bot.answer_callback_query(&q.id).await?;
            if let Some(message) = &q.message {
                bot.edit_message_text(message.chat.id, message.id, messages::RESTARTING)
                    .await?;
            }
            tracing::info!("Restart requested by admin {}", caller);
            restart.request();
        }
        CallbackAction::Start => {
            bot.answer_callback_query(&q.id).await?;
            if let Some(message) = &q.message {
                let plan =
                    handlers::plan_start(store.as_ref(), &config, caller, &q.from.first_name).await?;
                edit_banner(&bot, message, plan.welcome, keyboards::start_keyboard()).await?;
            }
        }
        CallbackAction::Help => {
            bot.answer_callback_query(&q.id).await?;
            if let Some(message) = &q.message {
                let text = handlers::help_text(&config, &info);
                edit_banner(&bot, message, text, keyboards::help_keyboard()).await?;
            }
        }
        CallbackAction::About => {
            bot.answer_callback_query(&q.id).await?;
            if let Some(message) = &q.message {
                let text = handlers::about_text(&config, &info);
                edit_banner(&bot, message, text, keyboards::about_keyboard()).await?;
            }
        }
    }

    Ok(())
}
