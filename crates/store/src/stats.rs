use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::BotStats;

/// Storage quota of the hosted database, in bytes
pub const STORAGE_QUOTA_BYTES: u64 = 536_870_912;

/// Read-only aggregate counters
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Bytes currently used by the database
    async fn get_db_size(&self) -> StoreResult<u64>;

    async fn get_bot_stats(&self) -> StoreResult<BotStats>;
}

/// Bytes left under [`STORAGE_QUOTA_BYTES`]; zero once the quota is exceeded
pub fn free_storage(used: u64) -> u64 {
    STORAGE_QUOTA_BYTES.saturating_sub(used)
}
