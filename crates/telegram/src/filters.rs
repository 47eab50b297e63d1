//! Predicates gating the handler tree
//!
//! These run before any endpoint. They only read injected state and never
//! talk to Telegram or the database.

use std::sync::Arc;

use store::BannedUsers;
use teloxide::prelude::*;

use crate::config::BotConfig;
use crate::utils::user_id_of;

fn sender_id(msg: &Message) -> Option<i64> {
    msg.from().map(user_id_of)
}

/// Drops messages from users in the banned cache
pub fn message_not_banned(msg: Message, banned: BannedUsers) -> bool {
    match sender_id(&msg) {
        Some(id) if banned.contains(id) => {
            tracing::debug!("Ignoring message from banned user {}", id);
            false
        }
        _ => true,
    }
}

/// Drops button presses from users in the banned cache
pub fn callback_not_banned(q: CallbackQuery, banned: BannedUsers) -> bool {
    let id = user_id_of(&q.from);
    if banned.contains(id) {
        tracing::debug!("Ignoring callback from banned user {}", id);
        return false;
    }
    true
}

pub fn is_private_chat(msg: Message) -> bool {
    msg.chat.is_private()
}

pub fn is_admin(msg: Message, config: Arc<BotConfig>) -> bool {
    sender_id(&msg).is_some_and(|id| config.is_admin(id))
}

/// True when the bot runs in private mode and the sender is not an admin
pub fn is_refused_by_private_mode(msg: Message, config: Arc<BotConfig>) -> bool {
    config.is_private && !sender_id(&msg).is_some_and(|id| config.is_admin(id))
}
