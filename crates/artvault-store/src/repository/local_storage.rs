//! # Local Storage Repository
//!
//! The browser `localStorage` contract over the `local_storage` table.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ local_storage                                                │
//! │ ───────────────────────────────────────────────────────────  │
//! │ key (PK)      │ value (JSON text)          │ updated_at      │
//! │ artworks      │ [{"id":"...","title":...}] │ 2024-02-10T...  │
//! │ cartItems     │ [{"listingId":...}]        │ 2024-02-10T...  │
//! │ currentUser   │ {"id":"...","name":...}    │ 2024-02-10T...  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, warn};

use crate::error::StoreResult;

const UPSERT_ITEM: &str = r#"
    INSERT INTO local_storage (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
"#;

/// String-to-string storage with `localStorage` semantics.
///
/// ## Usage
/// ```rust,ignore
/// let repo = storage.local_storage();
/// repo.set_item("theme", "dark").await?;
/// assert_eq!(repo.get_item("theme").await?, Some("dark".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct LocalStorageRepository {
    pool: SqlitePool,
}

impl LocalStorageRepository {
    /// Creates a new LocalStorageRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LocalStorageRepository { pool }
    }

    /// Returns the value under `key`, or `None` if it was never set.
    pub async fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM local_storage WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "get_item");
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        debug!(key = %key, bytes = value.len(), "set_item");

        sqlx::query(UPSERT_ITEM)
            .bind(key)
            .bind(value)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Stores several `(key, value)` pairs in one transaction.
    ///
    /// Either every pair is written or, on any failure, none is.
    pub async fn set_items(&self, items: &[(&str, &str)]) -> StoreResult<()> {
        let updated_at = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        match Self::upsert_all(&mut tx, items, &updated_at).await {
            Ok(()) => {
                tx.commit().await?;
                debug!(count = items.len(), "set_items committed");
                Ok(())
            }
            Err(e) => {
                warn!(count = items.len(), "set_items rolled back");
                let _ = tx.rollback().await;
                Err(e)
            }
        }
    }

    async fn upsert_all(
        tx: &mut Transaction<'_, Sqlite>,
        items: &[(&str, &str)],
        updated_at: &str,
    ) -> StoreResult<()> {
        for (key, value) in items {
            debug!(key = %key, bytes = value.len(), "set_items");
            sqlx::query(UPSERT_ITEM)
                .bind(*key)
                .bind(*value)
                .bind(updated_at)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    /// Deletes `key`. Removing an absent key is not an error.
    pub async fn remove_item(&self, key: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM local_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, removed = result.rows_affected(), "remove_item");
        Ok(())
    }

    /// All keys currently set, sorted.
    pub async fn keys(&self) -> StoreResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM local_storage ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    /// Removes every key.
    pub async fn clear(&self) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM local_storage")
            .execute(&self.pool)
            .await?;

        debug!(removed = result.rows_affected(), "clear");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Storage, StorageConfig};

    async fn repo() -> super::LocalStorageRepository {
        Storage::new(StorageConfig::in_memory())
            .await
            .unwrap()
            .local_storage()
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let repo = repo().await;
        assert_eq!(repo.get_item("artworks").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let repo = repo().await;
        repo.set_item("theme", "light").await.unwrap();
        repo.set_item("theme", "dark").await.unwrap();

        assert_eq!(repo.get_item("theme").await.unwrap().as_deref(), Some("dark"));
        assert_eq!(repo.keys().await.unwrap(), vec!["theme".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let repo = repo().await;
        repo.set_item("b", "2").await.unwrap();
        repo.set_item("a", "1").await.unwrap();
        assert_eq!(repo.keys().await.unwrap(), vec!["a", "b"]);

        repo.remove_item("a").await.unwrap();
        repo.remove_item("never-set").await.unwrap();
        assert_eq!(repo.keys().await.unwrap(), vec!["b"]);

        repo.clear().await.unwrap();
        assert!(repo.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_items_writes_all() {
        let repo = repo().await;
        repo.set_item("a", "old").await.unwrap();

        repo.set_items(&[("a", "1"), ("b", "2")]).await.unwrap();

        assert_eq!(repo.get_item("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(repo.get_item("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_set_items_is_all_or_nothing() {
        let storage = Storage::new(StorageConfig::in_memory()).await.unwrap();
        sqlx::query(
            r#"
            CREATE TRIGGER reject_locked BEFORE INSERT ON local_storage
            WHEN NEW.key = 'locked'
            BEGIN
                SELECT RAISE(ABORT, 'locked key');
            END
            "#,
        )
        .execute(storage.pool())
        .await
        .unwrap();

        let repo = storage.local_storage();
        repo.set_item("a", "old").await.unwrap();

        assert!(repo.set_items(&[("a", "new"), ("locked", "x")]).await.is_err());

        assert_eq!(repo.get_item("a").await.unwrap().as_deref(), Some("old"));
        assert_eq!(repo.get_item("locked").await.unwrap(), None);
    }
}
