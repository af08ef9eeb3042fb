//! SQLite-backed implementation of [`AdventureRepository`].

use adventure::Adventure;
use sqlx::SqlitePool;

use super::helpers::{decode_flag, decode_timestamp, encode_flag, encode_timestamp};
use crate::persistence::traits::AdventureRepository;
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct AdventureRow {
    id: String,
    author_id: String,
    title: String,
    description: String,
    is_published: i64,
    created_at: i64,
    updated_at: i64,
}

impl From<AdventureRow> for Adventure {
    fn from(r: AdventureRow) -> Self {
        Self {
            id: r.id,
            author_id: r.author_id,
            title: r.title,
            description: r.description,
            is_published: decode_flag(r.is_published),
            created_at: decode_timestamp(r.created_at),
            updated_at: decode_timestamp(r.updated_at),
        }
    }
}

/// SQLite implementation of [`AdventureRepository`].
#[derive(Clone)]
pub struct SqliteAdventureRepository {
    pool: SqlitePool,
}

impl SqliteAdventureRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AdventureRepository for SqliteAdventureRepository {
    async fn insert_adventure(&self, adventure: &Adventure) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO adventures
                (id, author_id, title, description, is_published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&adventure.id)
        .bind(&adventure.author_id)
        .bind(&adventure.title)
        .bind(&adventure.description)
        .bind(encode_flag(adventure.is_published))
        .bind(encode_timestamp(adventure.created_at))
        .bind(encode_timestamp(adventure.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_adventure(&self, id: &str) -> Result<Option<Adventure>, PersistenceError> {
        let row: Option<AdventureRow> = sqlx::query_as(
            r#"
            SELECT id, author_id, title, description, is_published, created_at, updated_at
            FROM adventures
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Adventure::from))
    }

    async fn list_adventures_by_author(
        &self,
        author_id: &str,
    ) -> Result<Vec<Adventure>, PersistenceError> {
        let rows: Vec<AdventureRow> = sqlx::query_as(
            r#"
            SELECT id, author_id, title, description, is_published, created_at, updated_at
            FROM adventures
            WHERE author_id = ?
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Adventure::from).collect())
    }

    async fn update_adventure(&self, adventure: &Adventure) -> Result<bool, PersistenceError> {
        // author_id is deliberately absent: authorship never changes.
        let result = sqlx::query(
            r#"
            UPDATE adventures
            SET title = ?, description = ?, is_published = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&adventure.title)
        .bind(&adventure.description)
        .bind(encode_flag(adventure.is_published))
        .bind(encode_timestamp(adventure.updated_at))
        .bind(&adventure.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_adventure(&self, id: &str) -> Result<bool, PersistenceError> {
        let result = sqlx::query("DELETE FROM adventures WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
