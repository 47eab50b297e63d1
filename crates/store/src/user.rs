use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::{User, UserDefaults, UserPatch};

/// Keyed access to user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user without creating it
    async fn get_user(&self, user_id: i64) -> StoreResult<Option<User>>;

    /// Look up a user, inserting a record built from `defaults` when absent
    async fn get_or_create_user(&self, user_id: i64, defaults: &UserDefaults) -> StoreResult<User>;

    async fn is_user_exist(&self, user_id: i64) -> StoreResult<bool>;

    /// Apply `patch` to an existing user.
    ///
    /// Returns `false` when no such user exists.
    async fn update_user_info(&self, user_id: i64, patch: &UserPatch) -> StoreResult<bool>;

    async fn total_users_count(&self) -> StoreResult<u64>;

    /// Ids of every user whose `banned` flag is set, ascending
    async fn banned_user_ids(&self) -> StoreResult<Vec<i64>>;
}
