//! Admin-only commands (restart, logs, ban, unban)

use std::sync::Arc;

use store::{BannedUsers, SharedStore};
use teloxide::{prelude::*, types::InputFile};

use crate::config::BotConfig;
use crate::constants::{messages, usage};
use crate::error::{BotError, UserMessage};
use crate::handlers::{notify_user, reply_html};
use crate::keyboards;
use crate::moderation::{self, BanAction, BanArgs, BanOutcome};
use crate::templates::BannedUsersMessage;
use crate::types::HandlerResult;

/// Admin commands from anyone else get no answer at all
pub async fn ignore_non_admin(msg: Message) -> HandlerResult {
    tracing::debug!(
        "Ignoring admin command from {:?} in chat {}",
        msg.from().map(|u| u.id),
        msg.chat.id.0
    );
    Ok(())
}

/// Ask for confirmation before restarting
pub async fn restart(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, messages::RESTART_CONFIRM)
        .reply_markup(keyboards::restart_keyboard())
        .await?;
    Ok(())
}

/// Upload the log file
pub async fn logs(bot: Bot, msg: Message, config: Arc<BotConfig>) -> HandlerResult {
    if let Err(err) = bot
        .send_document(msg.chat.id, InputFile::file(config.log_file.clone()))
        .await
    {
        tracing::error!("Error sending log file {}: {}", config.log_file.display(), err);
        bot.send_message(msg.chat.id, BotError::from(err).user_message())
            .await?;
    }
    Ok(())
}

pub async fn ban(
    bot: Bot,
    msg: Message,
    args: String,
    store: SharedStore,
    banned: BannedUsers,
) -> HandlerResult {
    moderate(bot, msg, args, store, banned, BanAction::Ban).await
}

pub async fn unban(
    bot: Bot,
    msg: Message,
    args: String,
    store: SharedStore,
    banned: BannedUsers,
) -> HandlerResult {
    moderate(bot, msg, args, store, banned, BanAction::Unban).await
}

/// Shared body of `/ban` and `/unban`. Unexpected errors are logged and swallowed.
async fn moderate(
    bot: Bot,
    msg: Message,
    args: String,
    store: SharedStore,
    banned: BannedUsers,
    action: BanAction,
) -> HandlerResult {
    let user_id = match BanArgs::parse(&args) {
        BanArgs::List => {
            let ids = banned.list();
            let text = BannedUsersMessage { user_ids: &ids }.render();
            reply_html(&bot, msg.chat.id, msg.id, text).await?;
            return Ok(());
        }
        BanArgs::Target(user_id) => user_id,
        BanArgs::Invalid => {
            let text = match action {
                BanAction::Ban => usage::BAN,
                BanAction::Unban => usage::UNBAN,
            };
            bot.send_message(msg.chat.id, text).await?;
            return Ok(());
        }
    };

    let outcome = match moderation::apply(store.as_ref(), &banned, action, user_id).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!("Error applying {:?} to user {}: {}", action, user_id, err);
            return Ok(());
        }
    };

    if outcome == BanOutcome::Changed {
        notify_user(&bot, user_id, action.notice()).await;
    }

    if let Err(err) = reply_html(&bot, msg.chat.id, msg.id, action.reply(outcome, user_id)).await {
        tracing::error!("Error replying to {:?} command: {}", action, err);
    }
    Ok(())
}
