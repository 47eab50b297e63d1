//! Bot configuration loaded from environment variables

use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::{de, Deserialize, Deserializer};
use store::UserDefaults;
use url::Url;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://linkbot.db?mode=rwc";
pub const DEFAULT_SOURCE_CODE: &str = "https://github.com/dreygur/linkbot";
pub const DEFAULT_OWNER_CONTACT: &str = "@admin";
pub const DEFAULT_BASE_SITE: &str = "droplink.co";
pub const DEFAULT_METHOD: &str = "shortener";
pub const DEFAULT_LOG_FILE: &str = "TelegramBot.log";

/// Runtime settings shared with every handler
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Users allowed to run admin commands, comma or space separated
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub admins: Vec<i64>,
    /// Operations channel receiving new-user alerts
    pub log_channel: Option<i64>,
    pub welcome_image: Option<Url>,
    #[serde(default = "default_source_code")]
    pub source_code: String,
    #[serde(default = "default_owner_contact")]
    pub owner_contact: String,
    #[serde(default = "default_base_site")]
    pub base_site: String,
    #[serde(default = "default_method")]
    pub default_method: String,
    /// When set, only admins may talk to the bot
    #[serde(default)]
    pub is_private: bool,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_source_code() -> String {
    DEFAULT_SOURCE_CODE.to_string()
}

fn default_owner_contact() -> String {
    DEFAULT_OWNER_CONTACT.to_string()
}

fn default_base_site() -> String {
    DEFAULT_BASE_SITE.to_string()
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|e| de::Error::custom(format!("invalid user id {:?}: {}", part, e)))
        })
        .collect()
}

impl BotConfig {
    /// Load the configuration from the process environment
    ///
    /// Variables map to fields by lowercasing their name, so `LOG_CHANNEL`
    /// fills `log_channel`. Empty variables count as unset.
    ///
    /// # Errors
    /// Returns an error if a variable is set to a malformed value
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::default().ignore_empty(true))
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Load from an explicit set of variables instead of the process environment
    #[cfg(test)]
    pub(crate) fn from_vars(vars: &[(&str, &str)]) -> Result<Self, ConfigError> {
        let source = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self::load(Environment::default().source(Some(source)).ignore_empty(true))
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admins.contains(&user_id)
    }

    /// Settings given to users on first contact
    pub fn user_defaults(&self) -> UserDefaults {
        UserDefaults {
            base_site: self.base_site.clone(),
            method: self.default_method.clone(),
        }
    }
}
