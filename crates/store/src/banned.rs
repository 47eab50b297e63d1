//! In-memory mirror of the persisted `banned` flag
//!
//! The message filter consults this set before any handler runs, so a
//! lookup must never touch the database. Ban and unban keep it in step with
//! the store after each successful write.

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use crate::error::StoreResult;
use crate::user::UserStore;

/// Thread-safe set of banned user IDs
#[derive(Clone, Default, Debug)]
pub struct BannedUsers {
    ids: Arc<RwLock<BTreeSet<i64>>>,
}

impl BannedUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the set from every banned user in the store
    pub async fn load<S: UserStore + ?Sized>(store: &S) -> StoreResult<Self> {
        let ids = store.banned_user_ids().await?;
        tracing::info!("Loaded {} banned user(s) from the store", ids.len());
        Ok(Self::from_ids(ids))
    }

    pub fn from_ids<I: IntoIterator<Item = i64>>(ids: I) -> Self {
        Self {
            ids: Arc::new(RwLock::new(ids.into_iter().collect())),
        }
    }

    pub fn contains(&self, user_id: i64) -> bool {
        let ids = self.ids.read().unwrap_or_else(|e| e.into_inner());
        ids.contains(&user_id)
    }

    /// Returns `true` if the id was not already present
    pub fn add(&self, user_id: i64) -> bool {
        let mut ids = self.ids.write().unwrap_or_else(|e| e.into_inner());
        ids.insert(user_id)
    }

    /// Returns `true` if the id was present
    pub fn remove(&self, user_id: i64) -> bool {
        let mut ids = self.ids.write().unwrap_or_else(|e| e.into_inner());
        ids.remove(&user_id)
    }

    /// Snapshot of the banned ids in ascending order
    pub fn list(&self) -> Vec<i64> {
        let ids = self.ids.read().unwrap_or_else(|e| e.into_inner());
        ids.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::model::{UserDefaults, UserPatch};

    #[test]
    fn test_add_remove_contains() {
        let banned = BannedUsers::new();
        assert!(!banned.contains(7));

        assert!(banned.add(7));
        assert!(!banned.add(7));
        assert!(banned.contains(7));

        assert!(banned.remove(7));
        assert!(!banned.remove(7));
        assert!(banned.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let banned = BannedUsers::new();
        let other = banned.clone();
        banned.add(1);
        assert!(other.contains(1));
    }

    #[test]
    fn test_list_is_sorted() {
        let banned = BannedUsers::from_ids([30, 10, 20]);
        assert_eq!(banned.list(), vec![10, 20, 30]);
        assert_eq!(banned.len(), 3);
    }

    #[tokio::test]
    async fn test_load_mirrors_store() {
        let store = MemoryStore::new();
        let defaults = UserDefaults {
            base_site: "droplink.co".to_string(),
            method: "shortener".to_string(),
        };
        for id in [1, 2, 3] {
            store.get_or_create_user(id, &defaults).await.unwrap();
        }
        store.update_user_info(2, &UserPatch::banned(true)).await.unwrap();

        let banned = BannedUsers::load(&store).await.unwrap();
        assert_eq!(banned.list(), vec![2]);
    }
}
