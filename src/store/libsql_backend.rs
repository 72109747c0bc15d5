//! libSQL backend — async `KeyValueStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::migrations;
use crate::store::traits::KeyValueStore;

/// libSQL key-value store.
///
/// Stores a single connection that is reused for all operations.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Open(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Open(format!("Failed to open libSQL database: {e}")))?;

        let store = Self::from_database(db).await?;
        info!(path = %path.display(), "Store opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StoreError::Open(format!("Failed to create in-memory database: {e}")))?;
        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, StoreError> {
        let conn = db
            .connect()
            .map_err(|e| StoreError::Open(format!("Failed to create connection: {e}")))?;
        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl KeyValueStore for LibSqlStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut rows = self
            .conn()
            .query("SELECT value FROM kv WHERE key = ?1", params![key])
            .await
            .map_err(|e| StoreError::Query(format!("get: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let value: String = row
                    .get(0)
                    .map_err(|e| StoreError::Query(format!("get: {e}")))?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Query(format!("get: {e}"))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        self.conn()
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, now],
            )
            .await
            .map_err(|e| StoreError::Query(format!("set: {e}")))?;
        debug!(key, "Stored value");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let count = self
            .conn()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .await
            .map_err(|e| StoreError::Query(format!("delete: {e}")))?;
        Ok(count > 0)
    }
}
