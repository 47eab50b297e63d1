//! Map-backed store, used in tests and for dry runs without a database

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::{BotStats, User, UserDefaults, UserPatch};
use crate::stats::StatsStore;
use crate::user::UserStore;

#[derive(Default)]
struct Inner {
    users: HashMap<i64, User>,
    stats: BotStats,
    db_size: u64,
}

/// In-memory implementation of [`UserStore`] and [`StatsStore`]
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user record as-is
    pub fn insert_user(&self, user: User) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.users.insert(user.user_id, user);
    }

    pub fn set_stats(&self, stats: BotStats) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.stats = stats;
    }

    pub fn set_db_size(&self, bytes: u64) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.db_size = bytes;
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, user_id: i64) -> StoreResult<Option<User>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner.users.get(&user_id).cloned())
    }

    async fn get_or_create_user(&self, user_id: i64, defaults: &UserDefaults) -> StoreResult<User> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let user = inner
            .users
            .entry(user_id)
            .or_insert_with(|| User::new(user_id, defaults));
        Ok(user.clone())
    }

    async fn is_user_exist(&self, user_id: i64) -> StoreResult<bool> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner.users.contains_key(&user_id))
    }

    async fn update_user_info(&self, user_id: i64, patch: &UserPatch) -> StoreResult<bool> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        match inner.users.get_mut(&user_id) {
            Some(user) => {
                user.apply(patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn total_users_count(&self) -> StoreResult<u64> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner.users.len() as u64)
    }

    async fn banned_user_ids(&self) -> StoreResult<Vec<i64>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut ids: Vec<i64> = inner
            .users
            .values()
            .filter(|u| u.banned)
            .map(|u| u.user_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn get_db_size(&self) -> StoreResult<u64> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner.db_size)
    }

    async fn get_bot_stats(&self) -> StoreResult<BotStats> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner.stats)
    }
}
