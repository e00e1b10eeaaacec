//! SQLite-backed key-value store
//!
//! Primary durable store. Records serialize to JSON text in a single
//! `kv_records` table partitioned by collection name, so several record
//! types can share one database file.
//!
//! The pool connects lazily: construction never touches the filesystem,
//! and the first failure surfaces through `open` as `Unavailable`.

use crate::error::{Result, StoreError};
use crate::store::{KeyValueStore, Keyed};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::marker::PhantomData;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// SQLite implementation of [`KeyValueStore`] for one collection.
#[derive(Clone)]
pub struct SqliteKvStore<R> {
    pool: SqlitePool,
    collection: String,
    _record: PhantomData<fn() -> R>,
}

impl<R> SqliteKvStore<R> {
    /// Create a store for `collection` backed by the database at `db_path`.
    ///
    /// No connection is established here; `open` performs the first real
    /// access and reports environment problems.
    pub fn new(db_path: &Path, collection: &str) -> Result<Self> {
        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", db_path.display()))
                .map_err(|e| StoreError::Unavailable(e.to_string()))?
                .create_if_missing(true)
                .busy_timeout(Duration::from_secs(5))
                .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_lazy_with(options);

        Ok(Self {
            pool,
            collection: collection.to_string(),
            _record: PhantomData,
        })
    }
}

#[async_trait]
impl<R> KeyValueStore for SqliteKvStore<R>
where
    R: Keyed + Serialize + DeserializeOwned + Clone + Send + Sync,
{
    type Record = R;

    async fn open(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_records (
                collection TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (collection, key)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        tracing::debug!("Opened kv store for collection: {}", self.collection);

        Ok(())
    }

    async fn replace_all(&self, items: &[R]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM kv_records WHERE collection = ?")
            .bind(&self.collection)
            .execute(&mut *tx)
            .await?;

        for item in items {
            let value = serde_json::to_string(item)?;
            sqlx::query("INSERT INTO kv_records (collection, key, value) VALUES (?, ?, ?)")
                .bind(&self.collection)
                .bind(item.key())
                .bind(value)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            "Replaced collection {} with {} records",
            self.collection,
            items.len()
        );

        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<R>> {
        let rows = sqlx::query("SELECT value FROM kv_records WHERE collection = ? ORDER BY rowid")
            .bind(&self.collection)
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let value: String = row.get(0);
            records.push(serde_json::from_str(&value)?);
        }

        Ok(records)
    }
}
