//! Persistence layer for the link bot
//!
//! This crate owns the user records, the aggregate bot statistics and the
//! in-memory mirror of banned users. Two backends implement the store
//! traits: SQLite through sqlx for production, and a plain in-memory map
//! used by tests.

pub mod banned;
pub mod error;
pub mod memory;
pub mod model;
pub mod sqlite;
pub mod stats;
pub mod user;

use std::sync::Arc;

pub use banned::BannedUsers;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use model::{BotStats, User, UserDefaults, UserPatch};
pub use sqlite::SqliteStore;
pub use stats::{free_storage, StatsStore, STORAGE_QUOTA_BYTES};
pub use user::UserStore;

/// Everything the bot needs from a backend
pub trait Store: UserStore + StatsStore {}

impl<T: UserStore + StatsStore> Store for T {}

/// Shared handle injected into the dispatcher
pub type SharedStore = Arc<dyn Store>;
