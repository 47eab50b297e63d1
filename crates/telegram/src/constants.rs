//! Constants used throughout the telegram bot

/// Telegram limits callback data to 64 bytes
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// Shown in place of API keys when an admin inspects another user
pub const SECRET_PLACEHOLDER: &str = "This is something secret";

/// Shown for unset optional fields
pub const NONE_TEXT: &str = "None";

/// Usage messages for commands
pub mod usage {
    pub const BAN: &str = "Usage: /ban [user_id]\n\nWithout an ID the banned users are listed.";
    pub const UNBAN: &str = "Usage: /unban [user_id]\n\nWithout an ID the banned users are listed.";
    pub const INFO: &str = "Wrong Input!!\n/info user_id";
}

/// Replies shared by several handlers
pub mod messages {
    pub const USER_NOT_FOUND: &str = "User doesn't exist";
    pub const ALREADY_BANNED: &str = "User is already banned";
    pub const NOT_BANNED: &str = "User is not banned yet";
    pub const BANNED_NOTICE: &str = "You are now banned from the bot by Admin";
    pub const UNBANNED_NOTICE: &str =
        "You are now free to use the bot. You have been unbanned by the Admin";
    pub const FETCHING_STATS: &str = "Fetching stats...";
    pub const RESTART_CONFIRM: &str = "Are you sure you want to restart / re-deploy the server?";
    pub const RESTARTING: &str = "Restarting...";
    pub const ADMIN_ONLY: &str = "Only admins can do that";
    pub const PRIVATE_BOT: &str =
        "This bot is private. Contact the owner if you would like to use it.";
    pub const INVALID_MESSAGE: &str = "Unable to handle the message. Type /help to see the usage.";
}
