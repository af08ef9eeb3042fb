//! SQLite-backed repository for scenes.

use adventure::Scene;
use sqlx::SqlitePool;

use super::helpers::{decode_flag, decode_timestamp, encode_flag, encode_timestamp};
use crate::persistence::traits::SceneRepository;
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct SceneRow {
    id: String,
    adventure_id: String,
    title: String,
    content: String,
    image_url: Option<String>,
    is_start_scene: i64,
    sort_order: i64,
    created_at: i64,
    updated_at: i64,
}

impl From<SceneRow> for Scene {
    fn from(r: SceneRow) -> Self {
        Self {
            id: r.id,
            adventure_id: r.adventure_id,
            title: r.title,
            content: r.content,
            image_url: r.image_url,
            is_start_scene: decode_flag(r.is_start_scene),
            order: r.sort_order,
            created_at: decode_timestamp(r.created_at),
            updated_at: decode_timestamp(r.updated_at),
        }
    }
}

/// SQLite implementation of [`SceneRepository`].
#[derive(Clone)]
pub struct SqliteSceneRepository {
    pool: SqlitePool,
}

impl SqliteSceneRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SceneRepository for SqliteSceneRepository {
    async fn insert_scene(&self, scene: &Scene) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO scenes
                (id, adventure_id, title, content, image_url, is_start_scene,
                 sort_order, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&scene.id)
        .bind(&scene.adventure_id)
        .bind(&scene.title)
        .bind(&scene.content)
        .bind(&scene.image_url)
        .bind(encode_flag(scene.is_start_scene))
        .bind(scene.order)
        .bind(encode_timestamp(scene.created_at))
        .bind(encode_timestamp(scene.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_scene(&self, id: &str) -> Result<Option<Scene>, PersistenceError> {
        let row: Option<SceneRow> = sqlx::query_as(
            r#"
            SELECT id, adventure_id, title, content, image_url, is_start_scene,
                   sort_order, created_at, updated_at
            FROM scenes
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Scene::from))
    }

    async fn list_scenes(&self, adventure_id: &str) -> Result<Vec<Scene>, PersistenceError> {
        let rows: Vec<SceneRow> = sqlx::query_as(
            r#"
            SELECT id, adventure_id, title, content, image_url, is_start_scene,
                   sort_order, created_at, updated_at
            FROM scenes
            WHERE adventure_id = ?
            ORDER BY sort_order, created_at, id
            "#,
        )
        .bind(adventure_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Scene::from).collect())
    }

    async fn update_scene(&self, scene: &Scene) -> Result<bool, PersistenceError> {
        let result = sqlx::query(
            r#"
            UPDATE scenes
            SET title = ?, content = ?, image_url = ?, is_start_scene = ?,
                sort_order = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&scene.title)
        .bind(&scene.content)
        .bind(&scene.image_url)
        .bind(encode_flag(scene.is_start_scene))
        .bind(scene.order)
        .bind(encode_timestamp(scene.updated_at))
        .bind(&scene.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_scene(&self, id: &str) -> Result<bool, PersistenceError> {
        let result = sqlx::query("DELETE FROM scenes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
