//! Public commands (start, help, about, stats)

use std::sync::Arc;

use store::SharedStore;
use teloxide::{prelude::*, types::ParseMode};

use crate::config::BotConfig;
use crate::constants::messages;
use crate::handlers::{self, send_banner};
use crate::keyboards;
use crate::types::{BotInfo, HandlerResult};
use crate::utils::user_id_of;

/// Register the user, announce newcomers and send the welcome message
pub async fn start(bot: Bot, msg: Message, store: SharedStore, config: Arc<BotConfig>) -> HandlerResult {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user_id_of(user);

    let plan = handlers::plan_start(store.as_ref(), &config, user_id, &user.first_name).await?;

    if let Some((channel, alert)) = plan.alert {
        tracing::info!("New user {} started the bot", user_id);
        if let Err(err) = bot
            .send_message(channel, alert)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboards::moderation_keyboard(user_id))
            .await
        {
            tracing::error!("Failed to announce new user {}: {}", user_id, err);
        }
    }

    send_banner(
        &bot,
        msg.chat.id,
        config.welcome_image.as_ref(),
        plan.welcome,
        keyboards::start_keyboard(),
    )
    .await?;
    Ok(())
}

/// Display setup instructions
pub async fn help(bot: Bot, msg: Message, config: Arc<BotConfig>, info: Arc<BotInfo>) -> HandlerResult {
    send_banner(
        &bot,
        msg.chat.id,
        config.welcome_image.as_ref(),
        handlers::help_text(&config, &info),
        keyboards::help_keyboard(),
    )
    .await?;
    Ok(())
}

pub async fn about(bot: Bot, msg: Message, config: Arc<BotConfig>, info: Arc<BotInfo>) -> HandlerResult {
    send_banner(
        &bot,
        msg.chat.id,
        config.welcome_image.as_ref(),
        handlers::about_text(&config, &info),
        keyboards::about_keyboard(),
    )
    .await?;
    Ok(())
}

/// Show usage and storage figures. Failures are logged, never shown.
pub async fn stats(bot: Bot, msg: Message, store: SharedStore, info: Arc<BotInfo>) -> HandlerResult {
    let placeholder = match bot.send_message(msg.chat.id, messages::FETCHING_STATS).await {
        Ok(m) => m,
        Err(err) => {
            tracing::error!("Error sending stats placeholder: {}", err);
            return Ok(());
        }
    };

    let report = match handlers::collect_stats(store.as_ref(), &info).await {
        Ok(report) => report,
        Err(err) => {
            tracing::error!("Error collecting stats: {}", err);
            return Ok(());
        }
    };

    if let Err(err) = bot
        .edit_message_text(msg.chat.id, placeholder.id, report.render())
        .parse_mode(ParseMode::Html)
        .await
    {
        tracing::error!("Error sending stats: {}", err);
    }
    Ok(())
}

/// Refusal sent to non-admins while the bot is in private mode
pub async fn private_only(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, messages::PRIVATE_BOT).await?;
    Ok(())
}

/// Handle anything no command matched
pub async fn invalid_message(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, messages::INVALID_MESSAGE).await?;
    Ok(())
}
