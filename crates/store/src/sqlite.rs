//! SQLite backend built on sqlx

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};

use crate::error::StoreResult;
use crate::model::{BotStats, User, UserDefaults, UserPatch};
use crate::stats::StatsStore;
use crate::user::UserStore;

const USER_COLUMNS: &str = "user_id, username, shortener_api, mdisk_api, header_text, \
    footer_text, banner_image, base_site, method, banned, created_at";

/// Wrapper around a sqlx SQLite pool
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `database_url` and apply pending migrations
    ///
    /// # Errors
    /// Returns an error if the connection or a migration fails
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to {}: {}", database_url, e);
                e
            })?;
        Self::from_pool(pool).await
    }

    /// Fresh private database living as long as the store
    pub async fn in_memory() -> StoreResult<Self> {
        // Every connection to `sqlite::memory:` gets its own database, so pin to one.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!("Database migrations applied");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn get_user(&self, user_id: i64) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_or_create_user(&self, user_id: i64, defaults: &UserDefaults) -> StoreResult<User> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO users (user_id, base_site, method, banned, created_at) \
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(user_id)
        .bind(&defaults.base_site)
        .bind(&defaults.method)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!("Created user record for {}", user_id);
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn is_user_exist(&self, user_id: i64) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn update_user_info(&self, user_id: i64, patch: &UserPatch) -> StoreResult<bool> {
        if patch.is_empty() {
            return self.is_user_exist(user_id).await;
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET ");
        {
            let mut fields = query.separated(", ");
            let text_fields = [
                ("username", &patch.username),
                ("shortener_api", &patch.shortener_api),
                ("mdisk_api", &patch.mdisk_api),
                ("header_text", &patch.header_text),
                ("footer_text", &patch.footer_text),
                ("banner_image", &patch.banner_image),
                ("base_site", &patch.base_site),
                ("method", &patch.method),
            ];
            for (column, value) in text_fields {
                if let Some(value) = value {
                    fields.push(format!("{column} = "));
                    fields.push_bind_unseparated(value.clone());
                }
            }
            if let Some(banned) = patch.banned {
                fields.push("banned = ");
                fields.push_bind_unseparated(banned);
            }
        }
        query.push(" WHERE user_id = ");
        query.push_bind(user_id);

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn total_users_count(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn banned_user_ids(&self) -> StoreResult<Vec<i64>> {
        let ids = sqlx::query_scalar("SELECT user_id FROM users WHERE banned = 1 ORDER BY user_id")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }
}

#[async_trait]
impl StatsStore for SqliteStore {
    async fn get_db_size(&self) -> StoreResult<u64> {
        let page_count: i64 = sqlx::query_scalar("PRAGMA page_count")
            .fetch_one(&self.pool)
            .await?;
        let page_size: i64 = sqlx::query_scalar("PRAGMA page_size")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(page_count * page_size).unwrap_or_default())
    }

    async fn get_bot_stats(&self) -> StoreResult<BotStats> {
        let row: Option<(i64, i64, i64, i64)> = sqlx::query_as(
            "SELECT posts, links, mdisk_links, shortener_links FROM bot_stats WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let stats = row
            .map(|(posts, links, mdisk_links, shortener_links)| BotStats {
                posts: u64::try_from(posts).unwrap_or_default(),
                links: u64::try_from(links).unwrap_or_default(),
                mdisk_links: u64::try_from(mdisk_links).unwrap_or_default(),
                shortener_links: u64::try_from(shortener_links).unwrap_or_default(),
            })
            .unwrap_or_default();
        Ok(stats)
    }
}
