//! Records persisted by the store

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A bot user and their shortener settings
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: Option<String>,
    pub shortener_api: Option<String>,
    pub mdisk_api: Option<String>,
    pub header_text: Option<String>,
    pub footer_text: Option<String>,
    pub banner_image: Option<String>,
    pub base_site: String,
    pub method: String,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh record for a user seen for the first time
    pub fn new(user_id: i64, defaults: &UserDefaults) -> Self {
        Self {
            user_id,
            username: None,
            shortener_api: None,
            mdisk_api: None,
            header_text: None,
            footer_text: None,
            banner_image: None,
            base_site: defaults.base_site.clone(),
            method: defaults.method.clone(),
            banned: false,
            created_at: Utc::now(),
        }
    }

    /// Apply every field set in `patch`
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(v) = &patch.username {
            self.username = Some(v.clone());
        }
        if let Some(v) = &patch.shortener_api {
            self.shortener_api = Some(v.clone());
        }
        if let Some(v) = &patch.mdisk_api {
            self.mdisk_api = Some(v.clone());
        }
        if let Some(v) = &patch.header_text {
            self.header_text = Some(v.clone());
        }
        if let Some(v) = &patch.footer_text {
            self.footer_text = Some(v.clone());
        }
        if let Some(v) = &patch.banner_image {
            self.banner_image = Some(v.clone());
        }
        if let Some(v) = &patch.base_site {
            self.base_site = v.clone();
        }
        if let Some(v) = &patch.method {
            self.method = v.clone();
        }
        if let Some(v) = patch.banned {
            self.banned = v;
        }
    }
}

/// Partial update of a user record. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub shortener_api: Option<String>,
    pub mdisk_api: Option<String>,
    pub header_text: Option<String>,
    pub footer_text: Option<String>,
    pub banner_image: Option<String>,
    pub base_site: Option<String>,
    pub method: Option<String>,
    pub banned: Option<bool>,
}

impl UserPatch {
    pub fn banned(banned: bool) -> Self {
        Self {
            banned: Some(banned),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Settings given to users created on first contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDefaults {
    pub base_site: String,
    pub method: String,
}

/// Aggregate counters maintained by the link pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BotStats {
    pub posts: u64,
    pub links: u64,
    pub mdisk_links: u64,
    pub shortener_links: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> UserDefaults {
        UserDefaults {
            base_site: "droplink.co".to_string(),
            method: "shortener".to_string(),
        }
    }

    #[test]
    fn test_new_user_uses_defaults() {
        let user = User::new(42, &defaults());
        assert_eq!(user.user_id, 42);
        assert_eq!(user.base_site, "droplink.co");
        assert_eq!(user.method, "shortener");
        assert!(!user.banned);
        assert!(user.shortener_api.is_none());
    }

    #[test]
    fn test_apply_only_touches_set_fields() {
        let mut user = User::new(1, &defaults());
        user.shortener_api = Some("key".to_string());

        user.apply(&UserPatch {
            method: Some("mdisk".to_string()),
            banned: Some(true),
            ..Default::default()
        });

        assert_eq!(user.method, "mdisk");
        assert!(user.banned);
        assert_eq!(user.shortener_api.as_deref(), Some("key"));
        assert_eq!(user.base_site, "droplink.co");
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(UserPatch::default().is_empty());
        assert!(!UserPatch::banned(false).is_empty());
    }
}
