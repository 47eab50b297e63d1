use crate::types::Command;
use crate::{callbacks, commands, filters};
use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};

/// Register bot commands in Telegram menu
pub async fn set_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let admin_commands = dptree::filter(|cmd: Command| cmd.is_admin_only())
        .branch(
            dptree::filter(filters::is_admin)
                .branch(case![Command::Restart].endpoint(commands::restart))
                .branch(case![Command::Logs].endpoint(commands::logs))
                .branch(case![Command::Ban(args)].endpoint(commands::ban))
                .branch(case![Command::Unban(args)].endpoint(commands::unban))
                .branch(case![Command::Info(args)].endpoint(commands::info)),
        )
        .branch(dptree::endpoint(commands::ignore_non_admin));

    let private_commands = dptree::filter(filters::is_private_chat)
        .branch(case![Command::Start].endpoint(commands::start))
        .branch(case![Command::Help].endpoint(commands::help))
        .branch(case![Command::Stats].endpoint(commands::stats))
        .branch(case![Command::Me].endpoint(commands::me))
        .branch(admin_commands);

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::About].endpoint(commands::about))
        .branch(private_commands);

    let message_handler = Update::filter_message()
        .filter(filters::message_not_banned)
        .branch(dptree::filter(filters::is_refused_by_private_mode).endpoint(commands::private_only))
        .branch(command_handler)
        .branch(dptree::filter(filters::is_private_chat).endpoint(commands::invalid_message));

    // Handle callback queries from inline keyboards
    let callback_handler = Update::filter_callback_query()
        .filter(filters::callback_not_banned)
        .endpoint(callbacks::handle_callback);

    dptree::entry().branch(message_handler).branch(callback_handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;
    use std::sync::Arc;

    use chrono::Utc;
    use dptree::di::DependencyMap;
    use serde_json::{json, Value};
    use store::{BannedUsers, MemoryStore, SharedStore};
    use teloxide::types::Me;

    use crate::config::BotConfig;
    use crate::filters::tests::{callback_json, group_chat, message_json, private_chat};
    use crate::types::{BotInfo, HandlerResult, RestartSignal};

    #[test]
    fn test_command_menu_lists_everything() {
        let menu = Command::bot_commands();
        let names: Vec<_> = menu
            .iter()
            .map(|c| c.command.trim_start_matches('/'))
            .collect();
        for name in ["start", "help", "about", "me", "stats", "restart", "logs", "ban", "unban", "info"] {
            assert!(names.contains(&name), "missing {}", name);
        }
    }

    const ADMIN: i64 = 5;
    const USER: i64 = 6;

    fn bot() -> Bot {
        // Nothing listens here, so any handler that talks to Telegram fails fast
        Bot::new("123456:TEST").set_api_url(url::Url::parse("http://127.0.0.1:1").unwrap())
    }

    fn me() -> Me {
        serde_json::from_value(json!({
            "id": 1000,
            "is_bot": true,
            "first_name": "Link Bot",
            "username": "linkbot",
            "can_join_groups": true,
            "can_read_all_group_messages": false,
            "supports_inline_queries": false,
        }))
        .unwrap()
    }

    async fn route(update: Value, banned: BannedUsers) -> ControlFlow<HandlerResult, DependencyMap> {
        let update: Update = serde_json::from_str(&update.to_string()).unwrap();
        let store: SharedStore = Arc::new(MemoryStore::new());
        let config = Arc::new(BotConfig::from_vars(&[("ADMINS", "5")]).unwrap());
        let info = Arc::new(BotInfo {
            id: 1000,
            first_name: "Link Bot".to_string(),
            username: "linkbot".to_string(),
            started_at: Utc::now(),
        });

        schema()
            .dispatch(dptree::deps![
                update,
                bot(),
                me(),
                store,
                banned,
                config,
                info,
                RestartSignal::new()
            ])
            .await
    }

    fn message_update(chat: Value, from_id: i64, text: &str) -> Value {
        json!({ "update_id": 1, "message": message_json(chat, from_id, text) })
    }

    #[tokio::test]
    async fn test_admin_ban_reaches_handler() {
        let update = message_update(private_chat(ADMIN), ADMIN, "/ban");
        // The handler ran and failed only because the API is unreachable
        assert!(matches!(route(update, BannedUsers::new()).await, ControlFlow::Break(Err(_))));
    }

    #[tokio::test]
    async fn test_non_admin_ban_is_ignored_silently() {
        let update = message_update(private_chat(USER), USER, "/ban 7");
        assert!(matches!(route(update, BannedUsers::new()).await, ControlFlow::Break(Ok(()))));
    }

    #[tokio::test]
    async fn test_admin_commands_need_private_chat() {
        let update = message_update(group_chat(-100), ADMIN, "/ban 7");
        assert!(matches!(route(update, BannedUsers::new()).await, ControlFlow::Continue(_)));
    }

    #[tokio::test]
    async fn test_banned_user_gets_no_answer() {
        let banned = BannedUsers::from_ids([USER]);

        let update = message_update(private_chat(USER), USER, "/start");
        assert!(matches!(route(update, banned.clone()).await, ControlFlow::Continue(_)));

        let update = json!({ "update_id": 2, "callback_query": callback_json(USER, "delete") });
        assert!(matches!(route(update, banned).await, ControlFlow::Continue(_)));
    }
}
