//! Reply templates
//!
//! Every reply the bot sends is modelled as a small struct with named
//! fields and a pure `render` method producing Telegram HTML. Values coming
//! from users are escaped here, so handlers never build markup themselves.

use store::{BotStats, User};
use teloxide::utils::html;

use crate::constants::{NONE_TEXT, SECRET_PLACEHOLDER};
use crate::utils::{code, format_bytes, normalize_newlines};

fn or_none(value: Option<&str>) -> String {
    html::escape(value.unwrap_or(NONE_TEXT))
}

/// Welcome message for `/start`
#[derive(Debug, Clone)]
pub struct StartMessage<'a> {
    /// Pre-rendered HTML mention of the user
    pub mention: &'a str,
    pub method: &'a str,
    pub base_site: &'a str,
}

impl StartMessage<'_> {
    pub fn render(&self) -> String {
        format!(
            "Hi {}! 👋\n\n\
            I am a link converter bot. Send me any post or link and I will \
            convert it using your own shortener account.\n\n\
            Current method: {}\n\
            Base site: {}\n\n\
            Hit /help to find out how to set me up.",
            self.mention,
            code(self.method),
            html::escape(self.base_site),
        )
    }
}

/// Setup instructions for `/help`
#[derive(Debug, Clone)]
pub struct HelpMessage<'a> {
    pub first_name: &'a str,
    pub bot_username: &'a str,
    pub repo: &'a str,
    pub owner: &'a str,
}

impl HelpMessage<'_> {
    pub fn render(&self) -> String {
        format!(
            "<b>Hey! My name is {}.</b>\n\n\
            I convert links in your posts into your own short links.\n\n\
            <b>Getting started</b>\n\
            1. Create an account on your shortener site.\n\
            2. Send <code>/shortener_api your_api_key</code> to @{}.\n\
            3. Forward or send any post with links and get it back converted.\n\n\
            Use /me to check your settings and /stats to see how the bot is doing.\n\n\
            Source code: {}\n\
            Questions? Ask {}",
            html::escape(self.first_name),
            html::escape(self.bot_username),
            html::escape(self.repo),
            html::escape(self.owner),
        )
    }
}

/// Bot description for `/about`
#[derive(Debug, Clone)]
pub struct AboutMessage<'a> {
    /// Pre-rendered HTML mention of the bot
    pub bot_mention: &'a str,
    pub repo: &'a str,
}

impl AboutMessage<'_> {
    pub fn render(&self) -> String {
        format!(
            "<b>About</b>\n\n\
            Bot: {}\n\
            Language: Rust\n\
            Framework: teloxide\n\
            Database: SQLite\n\
            Source code: {}",
            self.bot_mention,
            html::escape(self.repo),
        )
    }
}

/// Detailed view of a user's settings, shared by `/me` and `/info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAbout {
    /// Set only when an admin inspects someone else
    pub user_id: Option<i64>,
    pub base_site: String,
    pub method: String,
    pub shortener_api: Option<String>,
    pub mdisk_api: Option<String>,
    pub username: Option<String>,
    pub header_text: Option<String>,
    pub footer_text: Option<String>,
    pub banner_image: Option<String>,
}

impl UserAbout {
    /// The user's own view, keys included
    pub fn own(user: &User) -> Self {
        Self {
            user_id: None,
            base_site: user.base_site.clone(),
            method: user.method.clone(),
            shortener_api: user.shortener_api.clone(),
            mdisk_api: user.mdisk_api.clone(),
            username: user.username.clone(),
            header_text: user.header_text.as_deref().map(normalize_newlines),
            footer_text: user.footer_text.as_deref().map(normalize_newlines),
            banner_image: user.banner_image.clone(),
        }
    }

    /// Admin view of another user; API keys are never shown
    pub fn redacted(user: &User) -> Self {
        Self {
            user_id: Some(user.user_id),
            shortener_api: Some(SECRET_PLACEHOLDER.to_string()),
            mdisk_api: Some(SECRET_PLACEHOLDER.to_string()),
            ..Self::own(user)
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(id) = self.user_id {
            out.push_str(&format!("User: {}\n", code(&id.to_string())));
        }
        out.push_str(&format!(
            "<b>Settings</b>\n\n\
            Base site: {}\n\
            Method: {}\n\
            Shortener API: <code>{}</code>\n\
            Mdisk API: <code>{}</code>\n\
            Username: {}\n\
            Banner image: {}\n\n\
            <b>Header text:</b>\n{}\n\n\
            <b>Footer text:</b>\n{}",
            html::escape(&self.base_site),
            html::escape(&self.method),
            or_none(self.shortener_api.as_deref()),
            or_none(self.mdisk_api.as_deref()),
            or_none(self.username.as_deref()),
            or_none(self.banner_image.as_deref()),
            or_none(self.header_text.as_deref()),
            or_none(self.footer_text.as_deref()),
        ));
        out
    }
}

/// Listing for `/ban` and `/unban` without arguments
#[derive(Debug, Clone)]
pub struct BannedUsersMessage<'a> {
    pub user_ids: &'a [i64],
}

impl BannedUsersMessage<'_> {
    pub fn render(&self) -> String {
        let users = if self.user_ids.is_empty() {
            format!("{}\n", NONE_TEXT)
        } else {
            self.user_ids
                .iter()
                .map(|id| format!("- {}\n", code(&id.to_string())))
                .collect()
        };
        format!(
            "<b>Banned users</b>\n\n{}\n\
            Ban: <code>/ban user_id</code>\n\
            Unban: <code>/unban user_id</code>",
            users
        )
    }
}

/// Alert posted to the operations channel for a first-time user
#[derive(Debug, Clone)]
pub struct NewUserAlert<'a> {
    pub user_id: i64,
    pub mention: &'a str,
}

impl NewUserAlert<'_> {
    pub fn render(&self) -> String {
        format!(
            "#NewUser\n\nUser ID: {}\nName: {}",
            code(&self.user_id.to_string()),
            self.mention
        )
    }
}

/// Figures shown by `/stats`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsMessage {
    pub total_users: u64,
    pub stats: BotStats,
    pub used_bytes: u64,
    pub free_bytes: u64,
    /// Already formatted uptime
    pub runtime: String,
}

impl StatsMessage {
    pub fn render(&self) -> String {
        format!(
            "<b>- Total Users:</b> <code>{}</code>\n\
            <b>- Total Posts Sent:</b> <code>{}</code>\n\
            <b>- Total Links Shortened:</b> <code>{}</code>\n\
            <b>- Total Mdisk Links Shortened:</b> <code>{}</code>\n\
            <b>- Total Shortener Links Shortened:</b> <code>{}</code>\n\
            <b>- Used Storage:</b> <code>{}</code>\n\
            <b>- Total Free Storage:</b> <code>{}</code>\n\n\
            <b>- Runtime:</b> <code>{}</code>",
            self.total_users,
            self.stats.posts,
            self.stats.links,
            self.stats.mdisk_links,
            self.stats.shortener_links,
            format_bytes(self.used_bytes),
            format_bytes(self.free_bytes),
            html::escape(&self.runtime),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::UserDefaults;

    fn sample_user() -> User {
        let mut user = User::new(
            777,
            &UserDefaults {
                base_site: "droplink.co".to_string(),
                method: "shortener".to_string(),
            },
        );
        user.username = Some("@channel".to_string());
        user.shortener_api = Some("b1f0c9e2d7a64c1e8f33".to_string());
        user.mdisk_api = Some("Zx81Qm0pLk2Vt7Yh".to_string());
        user.header_text = Some("Join us\\nToday".to_string());
        user.footer_text = Some("Thanks".to_string());
        user.banner_image = Some("https://example.com/banner.png".to_string());
        user
    }

    #[test]
    fn test_me_shows_stored_values() {
        let user = sample_user();
        let text = UserAbout::own(&user).render();

        assert!(text.contains("b1f0c9e2d7a64c1e8f33"));
        assert!(text.contains("Zx81Qm0pLk2Vt7Yh"));
        assert!(text.contains("droplink.co"));
        assert!(text.contains("shortener"));
        assert!(text.contains("@channel"));
        assert!(text.contains("https://example.com/banner.png"));
        assert!(text.contains("Join us\nToday"));
        assert!(!text.contains("Join us\\nToday"));
        assert!(text.contains("Thanks"));
        assert!(!text.contains("User: "));
    }

    #[test]
    fn test_info_never_leaks_keys() {
        let keys = [
            ("b1f0c9e2d7a64c1e8f33", "Zx81Qm0pLk2Vt7Yh"),
            ("short-key-1", "mdisk-key-2"),
            ("ä\"<weird>&key", "x".repeat(64).as_str()),
        ]
        .map(|(a, b)| (a.to_string(), b.to_string()));

        for (shortener, mdisk) in keys {
            let mut user = sample_user();
            user.shortener_api = Some(shortener.clone());
            user.mdisk_api = Some(mdisk.clone());

            let about = UserAbout::redacted(&user);
            let text = about.render();

            assert!(!text.contains(&shortener));
            assert!(!text.contains(&html::escape(&shortener)));
            assert!(!text.contains(&mdisk));
            assert_eq!(text.matches(SECRET_PLACEHOLDER).count(), 2);
            assert!(text.starts_with("User: <code>777</code>"));
        }
    }

    #[test]
    fn test_info_redacts_even_when_unset() {
        let mut user = sample_user();
        user.shortener_api = None;
        user.mdisk_api = None;
        let text = UserAbout::redacted(&user).render();
        assert_eq!(text.matches(SECRET_PLACEHOLDER).count(), 2);
    }

    #[test]
    fn test_unset_fields_render_none() {
        let user = User::new(
            1,
            &UserDefaults {
                base_site: "droplink.co".to_string(),
                method: "shortener".to_string(),
            },
        );
        let text = UserAbout::own(&user).render();
        assert!(text.contains("Shortener API: <code>None</code>"));
        assert!(text.contains("Username: None"));
    }

    #[test]
    fn test_banned_users_listing() {
        let empty = BannedUsersMessage { user_ids: &[] }.render();
        assert!(empty.contains("None"));

        let listed = BannedUsersMessage { user_ids: &[10, 20] }.render();
        assert!(listed.contains("- <code>10</code>\n- <code>20</code>\n"));
        assert!(!listed.contains("None"));
    }

    #[test]
    fn test_new_user_alert_contains_id() {
        let text = NewUserAlert {
            user_id: 123456,
            mention: "<a href=\"tg://user?id=123456\">Ann</a>",
        }
        .render();
        assert!(text.starts_with("#NewUser"));
        assert!(text.contains("<code>123456</code>"));
        assert!(text.contains("Ann"));
    }

    #[test]
    fn test_start_escapes_fields() {
        let text = StartMessage {
            mention: "Ann",
            method: "<b>",
            base_site: "a&b.com",
        }
        .render();
        assert!(text.contains("<code>&lt;b&gt;</code>"));
        assert!(text.contains("a&amp;b.com"));
    }

    #[test]
    fn test_stats_message() {
        let text = StatsMessage {
            total_users: 3,
            stats: BotStats {
                posts: 10,
                links: 20,
                mdisk_links: 5,
                shortener_links: 15,
            },
            used_bytes: 1048576,
            free_bytes: 535822336,
            runtime: "1:02:03".to_string(),
        }
        .render();
        assert!(text.contains("Total Users:</b> <code>3</code>"));
        assert!(text.contains("Total Mdisk Links Shortened:</b> <code>5</code>"));
        assert!(text.contains("Used Storage:</b> <code>1.00 MB</code>"));
        assert!(text.contains("Total Free Storage:</b> <code>511.00 MB</code>"));
        assert!(text.contains("Runtime:</b> <code>1:02:03</code>"));
    }
}
