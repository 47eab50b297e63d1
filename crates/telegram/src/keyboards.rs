//! Inline keyboard builders and the callback data they carry
//!
//! Callback data is encoded as `action#target` (for example `ban#12345`)
//! or as a bare action such as `delete`.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Action encoded in an inline button's callback data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Ban(i64),
    Delete,
    Restart,
    Start,
    Help,
    About,
}

impl CallbackAction {
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::Ban(user_id) => format!("ban#{}", user_id),
            CallbackAction::Delete => "delete".to_string(),
            CallbackAction::Restart => "restart".to_string(),
            CallbackAction::Start => "start".to_string(),
            CallbackAction::Help => "help".to_string(),
            CallbackAction::About => "about".to_string(),
        }
    }

    pub fn parse(data: &str) -> Option<Self> {
        match data.split_once('#') {
            Some(("ban", target)) => target.parse().ok().map(CallbackAction::Ban),
            Some(_) => None,
            None => match data {
                "delete" => Some(CallbackAction::Delete),
                "restart" => Some(CallbackAction::Restart),
                "start" => Some(CallbackAction::Start),
                "help" => Some(CallbackAction::Help),
                "about" => Some(CallbackAction::About),
                _ => None,
            },
        }
    }
}

fn button(text: &str, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, action.encode())
}

fn close_button() -> InlineKeyboardButton {
    button("Close", CallbackAction::Delete)
}

/// Buttons under the welcome message
pub fn start_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("Help", CallbackAction::Help),
            button("About", CallbackAction::About),
        ],
        vec![close_button()],
    ])
}

pub fn help_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("Home", CallbackAction::Start),
            button("About", CallbackAction::About),
        ],
        vec![close_button()],
    ])
}

pub fn about_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("Home", CallbackAction::Start),
            button("Help", CallbackAction::Help),
        ],
        vec![close_button()],
    ])
}

/// Quick-ban menu attached to new-user alerts and `/info`
pub fn moderation_keyboard(user_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("Ban", CallbackAction::Ban(user_id)),
        close_button(),
    ]])
}

/// Confirmation menu for `/restart`
pub fn restart_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("Sure", CallbackAction::Restart),
        button("Disable", CallbackAction::Delete),
    ]])
}

/// Buttons under `/me`, showing the user's current shortening method
pub fn me_keyboard(method: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button(&format!("Method: {}", method), CallbackAction::Help)],
        vec![close_button()],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_CALLBACK_DATA_LEN;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(CallbackAction::parse("ban#12345"), Some(CallbackAction::Ban(12345)));
        assert_eq!(CallbackAction::parse("delete"), Some(CallbackAction::Delete));
        assert_eq!(CallbackAction::parse("restart"), Some(CallbackAction::Restart));
        assert_eq!(CallbackAction::parse("ban#abc"), None);
        assert_eq!(CallbackAction::parse("unban#1"), None);
        assert_eq!(CallbackAction::parse("ban"), None);
        assert_eq!(CallbackAction::parse(""), None);
    }

    #[test]
    fn test_every_keyboard_action_parses_back() {
        let keyboards = [
            start_keyboard(),
            help_keyboard(),
            about_keyboard(),
            moderation_keyboard(i64::MIN),
            restart_keyboard(),
            me_keyboard("shortener"),
        ];
        for keyboard in &keyboards {
            for data in callback_data(keyboard) {
                assert!(data.len() <= MAX_CALLBACK_DATA_LEN);
                assert!(CallbackAction::parse(&data).is_some(), "unparsable {data}");
            }
        }
    }

    #[test]
    fn test_moderation_keyboard() {
        let data = callback_data(&moderation_keyboard(987));
        assert_eq!(data, vec!["ban#987".to_string(), "delete".to_string()]);
    }

    #[test]
    fn test_me_keyboard_shows_method() {
        let markup = me_keyboard("mdisk");
        assert_eq!(markup.inline_keyboard[0][0].text, "Method: mdisk");
        assert_eq!(callback_data(&markup), vec!["help".to_string(), "delete".to_string()]);
    }

    #[test]
    fn test_restart_keyboard() {
        let data = callback_data(&restart_keyboard());
        assert_eq!(data, vec!["restart".to_string(), "delete".to_string()]);
    }
}
