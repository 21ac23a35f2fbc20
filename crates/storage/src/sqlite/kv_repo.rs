use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{KeyValueStore, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl KeyValueStore for SqliteRepository {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|e| StorageError::Serialization(e.to_string()))
        })
        .transpose()
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        Ok(())
    }
}
