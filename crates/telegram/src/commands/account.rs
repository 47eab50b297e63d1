//! User settings views (me, info)

use std::sync::Arc;

use store::SharedStore;
use teloxide::{prelude::*, types::ParseMode};

use crate::config::BotConfig;
use crate::constants::{messages, usage};
use crate::error::UserMessage;
use crate::keyboards;
use crate::templates::UserAbout;
use crate::types::HandlerResult;
use crate::utils::{self, user_id_of};

/// Show the caller their own settings, API keys included
pub async fn me(bot: Bot, msg: Message, store: SharedStore, config: Arc<BotConfig>) -> HandlerResult {
    let Some(user_id) = msg.from().map(user_id_of) else {
        return Ok(());
    };

    let user = store.get_or_create_user(user_id, &config.user_defaults()).await?;

    bot.send_message(msg.chat.id, UserAbout::own(&user).render())
        .parse_mode(ParseMode::Html)
        .disable_web_page_preview(true)
        .reply_markup(keyboards::me_keyboard(&user.method))
        .await?;
    Ok(())
}

/// Target of `/info`, or the reply to send when the arguments are unusable
fn info_target(args: &str) -> Result<i64, String> {
    match utils::parse_args(args).as_slice() {
        [raw] => utils::parse_user_id(raw).map_err(|err| err.user_message()),
        _ => Err(usage::INFO.to_string()),
    }
}

/// Admin lookup of another user with API keys redacted.
///
/// Store failures are echoed back to the admin verbatim.
pub async fn info(bot: Bot, msg: Message, args: String, store: SharedStore) -> HandlerResult {
    let target = match info_target(&args) {
        Ok(target) => target,
        Err(reply) => {
            bot.send_message(msg.chat.id, reply).await?;
            return Ok(());
        }
    };

    match store.get_user(target).await {
        Ok(Some(user)) => {
            bot.send_message(msg.chat.id, UserAbout::redacted(&user).render())
                .parse_mode(ParseMode::Html)
                .reply_to_message_id(msg.id)
                .reply_markup(keyboards::moderation_keyboard(target))
                .await?;
        }
        Ok(None) => {
            bot.send_message(msg.chat.id, messages::USER_NOT_FOUND).await?;
        }
        Err(err) => {
            tracing::error!("Error looking up user {}: {}", target, err);
            bot.send_message(msg.chat.id, err.to_string()).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_target() {
        assert_eq!(info_target("42"), Ok(42));
        assert_eq!(info_target(" -100 "), Ok(-100));
        assert_eq!(info_target(""), Err(usage::INFO.to_string()));
        assert_eq!(info_target("1 2"), Err(usage::INFO.to_string()));
    }

    #[test]
    fn test_info_target_echoes_parse_error() {
        let reply = info_target("abc").unwrap_err();
        assert_eq!(reply, "❌ abc is not a valid user ID");
    }
}
