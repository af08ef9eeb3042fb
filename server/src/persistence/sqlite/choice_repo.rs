//! SQLite-backed repository for choices.

use adventure::Choice;
use sqlx::SqlitePool;

use super::helpers::{decode_timestamp, encode_timestamp};
use crate::persistence::traits::ChoiceRepository;
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct ChoiceRow {
    id: String,
    from_scene_id: String,
    to_scene_id: String,
    text: String,
    image_url: Option<String>,
    condition: Option<String>,
    sort_order: i64,
    created_at: i64,
    updated_at: i64,
}

impl From<ChoiceRow> for Choice {
    fn from(r: ChoiceRow) -> Self {
        Self {
            id: r.id,
            from_scene_id: r.from_scene_id,
            to_scene_id: r.to_scene_id,
            text: r.text,
            image_url: r.image_url,
            condition: r.condition,
            order: r.sort_order,
            created_at: decode_timestamp(r.created_at),
            updated_at: decode_timestamp(r.updated_at),
        }
    }
}

const SELECT_CHOICE: &str = "SELECT id, from_scene_id, to_scene_id, text, image_url, condition, \
                             sort_order, created_at, updated_at FROM choices";

/// SQLite implementation of [`ChoiceRepository`].
#[derive(Clone)]
pub struct SqliteChoiceRepository {
    pool: SqlitePool,
}

impl SqliteChoiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ChoiceRepository for SqliteChoiceRepository {
    async fn insert_choice(&self, choice: &Choice) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO choices
                (id, from_scene_id, to_scene_id, text, image_url, condition,
                 sort_order, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&choice.id)
        .bind(&choice.from_scene_id)
        .bind(&choice.to_scene_id)
        .bind(&choice.text)
        .bind(&choice.image_url)
        .bind(&choice.condition)
        .bind(choice.order)
        .bind(encode_timestamp(choice.created_at))
        .bind(encode_timestamp(choice.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_choice(&self, id: &str) -> Result<Option<Choice>, PersistenceError> {
        let row: Option<ChoiceRow> = sqlx::query_as(&format!("{SELECT_CHOICE} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Choice::from))
    }

    async fn list_choices_from(&self, scene_id: &str) -> Result<Vec<Choice>, PersistenceError> {
        let rows: Vec<ChoiceRow> = sqlx::query_as(&format!(
            "{SELECT_CHOICE} WHERE from_scene_id = ? ORDER BY sort_order, created_at, id"
        ))
        .bind(scene_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Choice::from).collect())
    }

    async fn list_choices_touching(&self, scene_id: &str) -> Result<Vec<Choice>, PersistenceError> {
        let rows: Vec<ChoiceRow> = sqlx::query_as(&format!(
            "{SELECT_CHOICE} WHERE from_scene_id = ? OR to_scene_id = ? ORDER BY sort_order, id"
        ))
        .bind(scene_id)
        .bind(scene_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Choice::from).collect())
    }

    async fn update_choice(&self, choice: &Choice) -> Result<bool, PersistenceError> {
        let result = sqlx::query(
            r#"
            UPDATE choices
            SET to_scene_id = ?, text = ?, image_url = ?, condition = ?,
                sort_order = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&choice.to_scene_id)
        .bind(&choice.text)
        .bind(&choice.image_url)
        .bind(&choice.condition)
        .bind(choice.order)
        .bind(encode_timestamp(choice.updated_at))
        .bind(&choice.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_choice(&self, id: &str) -> Result<bool, PersistenceError> {
        let result = sqlx::query("DELETE FROM choices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_choices_touching(&self, scene_id: &str) -> Result<u64, PersistenceError> {
        let result = sqlx::query("DELETE FROM choices WHERE from_scene_id = ? OR to_scene_id = ?")
            .bind(scene_id)
            .bind(scene_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
