//! Connection pool for the adventure graph database.
//!
//! Every connection enforces foreign keys: the scene deletion cascade and
//! the "choice points at a real scene" rule both lean on them.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use crate::persistence::PersistenceError;

/// Writers wait this long for a competing transaction before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// File databases allow a few readers alongside the single writer.
const FILE_POOL_SIZE: u32 = 4;

/// Shared handle to the graph database. Cloning shares the pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database file at `path`, creating it and any missing parent
    /// directories, and bring the schema up to date.
    pub async fn open(path: &Path) -> Result<Self, PersistenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT);

        let db = Self::connect(options, FILE_POOL_SIZE).await?;
        tracing::debug!(path = %path.display(), "Opened adventure database");
        Ok(db)
    }

    /// A private in-memory graph with the schema applied.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self, PersistenceError> {
        let options = SqliteConnectOptions::new().in_memory(true);
        // Each in-memory connection is its own database, so keep exactly one.
        Self::connect(options, 1).await
    }

    async fn connect(
        options: SqliteConnectOptions,
        max_connections: u32,
    ) -> Result<Self, PersistenceError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options.foreign_keys(true))
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| PersistenceError::Migration(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for open connections to finish and checkpoint the WAL.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_names(db: &Database) -> Vec<String> {
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_schema_has_graph_tables() {
        let db = Database::new_in_memory().await.unwrap();
        let names = table_names(&db).await;
        for table in ["adventures", "scenes", "choices", "player_progress"] {
            assert!(names.iter().any(|n| n == table), "missing {table}");
        }
    }

    #[tokio::test]
    async fn test_orphan_scene_violates_foreign_key() {
        let db = Database::new_in_memory().await.unwrap();
        let result = sqlx::query(
            "INSERT INTO scenes (id, adventure_id, title, content, sort_order, created_at, updated_at) \
             VALUES ('s1', 'missing', 't', 'c', 0, 0, 0)",
        )
        .execute(db.pool())
        .await;
        assert!(result.is_err(), "orphan scene should violate the foreign key");
    }

    #[tokio::test]
    async fn test_file_database_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("questweave.db");
        let db = Database::open(&db_path).await.unwrap();

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(mode, "wal");
        let foreign_keys: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(foreign_keys, 1);
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_reopen_keeps_rows_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("questweave.db");

        let db = Database::open(&db_path).await.unwrap();
        sqlx::query(
            "INSERT INTO adventures (id, author_id, title, description, created_at, updated_at) \
             VALUES ('a1', 'u1', 'Keep', '', 1, 1)",
        )
        .execute(db.pool())
        .await
        .unwrap();
        let before = table_names(&db).await;
        db.close().await;

        let reopened = Database::open(&db_path).await.unwrap();
        assert_eq!(table_names(&reopened).await, before);
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM adventures")
            .fetch_one(reopened.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
