//! SQLite-backed repository for player progress.

use adventure::PlayerProgress;
use sqlx::SqlitePool;

use super::helpers::{decode_timestamp, decode_variables, encode_timestamp, encode_variables};
use crate::persistence::traits::ProgressRepository;
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct ProgressRow {
    id: String,
    user_id: String,
    adventure_id: String,
    current_scene_id: String,
    variables: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<ProgressRow> for PlayerProgress {
    type Error = PersistenceError;

    fn try_from(r: ProgressRow) -> Result<Self, Self::Error> {
        Ok(Self {
            variables: decode_variables(&r.variables)?,
            id: r.id,
            user_id: r.user_id,
            adventure_id: r.adventure_id,
            current_scene_id: r.current_scene_id,
            created_at: decode_timestamp(r.created_at),
            updated_at: decode_timestamp(r.updated_at),
        })
    }
}

/// SQLite implementation of [`ProgressRepository`].
#[derive(Clone)]
pub struct SqliteProgressRepository {
    pool: SqlitePool,
}

impl SqliteProgressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ProgressRepository for SqliteProgressRepository {
    async fn insert_progress(&self, progress: &PlayerProgress) -> Result<(), PersistenceError> {
        let variables = encode_variables(&progress.variables)?;

        sqlx::query(
            r#"
            INSERT INTO player_progress
                (id, user_id, adventure_id, current_scene_id, variables, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&progress.id)
        .bind(&progress.user_id)
        .bind(&progress.adventure_id)
        .bind(&progress.current_scene_id)
        .bind(variables)
        .bind(encode_timestamp(progress.created_at))
        .bind(encode_timestamp(progress.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_progress(
        &self,
        user_id: &str,
        adventure_id: &str,
    ) -> Result<Option<PlayerProgress>, PersistenceError> {
        let row: Option<ProgressRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, adventure_id, current_scene_id, variables, created_at, updated_at
            FROM player_progress
            WHERE user_id = ? AND adventure_id = ?
            "#,
        )
        .bind(user_id)
        .bind(adventure_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PlayerProgress::try_from).transpose()
    }

    async fn list_progress_at_scene(
        &self,
        scene_id: &str,
    ) -> Result<Vec<PlayerProgress>, PersistenceError> {
        let rows: Vec<ProgressRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, adventure_id, current_scene_id, variables, created_at, updated_at
            FROM player_progress
            WHERE current_scene_id = ?
            ORDER BY user_id
            "#,
        )
        .bind(scene_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PlayerProgress::try_from).collect()
    }

    async fn update_progress(&self, progress: &PlayerProgress) -> Result<bool, PersistenceError> {
        let variables = encode_variables(&progress.variables)?;

        let result = sqlx::query(
            r#"
            UPDATE player_progress
            SET current_scene_id = ?, variables = ?, updated_at = ?
            WHERE user_id = ? AND adventure_id = ?
            "#,
        )
        .bind(&progress.current_scene_id)
        .bind(variables)
        .bind(encode_timestamp(progress.updated_at))
        .bind(&progress.user_id)
        .bind(&progress.adventure_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_progress(
        &self,
        user_id: &str,
        adventure_id: &str,
    ) -> Result<bool, PersistenceError> {
        let result =
            sqlx::query("DELETE FROM player_progress WHERE user_id = ? AND adventure_id = ?")
                .bind(user_id)
                .bind(adventure_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn redirect_progress(
        &self,
        from_scene_id: &str,
        to_scene_id: &str,
        updated_at: u64,
    ) -> Result<u64, PersistenceError> {
        let result = sqlx::query(
            r#"
            UPDATE player_progress
            SET current_scene_id = ?, updated_at = ?
            WHERE current_scene_id = ?
            "#,
        )
        .bind(to_scene_id)
        .bind(encode_timestamp(updated_at))
        .bind(from_scene_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::{Database, SqliteAdventureRepository, SqliteSceneRepository};
    use crate::persistence::traits::{AdventureRepository, SceneRepository};
    use adventure::{Adventure, Scene, Variables};
    use serde_json::json;

    async fn test_db() -> (Database, SqliteProgressRepository) {
        let db = Database::new_in_memory().await.unwrap();
        SqliteAdventureRepository::new(db.pool().clone())
            .insert_adventure(&Adventure {
                id: "a1".to_string(),
                author_id: "u1".to_string(),
                title: "Cave".to_string(),
                description: "Dark".to_string(),
                is_published: true,
                created_at: 0,
                updated_at: 0,
            })
            .await
            .unwrap();
        let scenes = SqliteSceneRepository::new(db.pool().clone());
        for id in ["s1", "s2"] {
            scenes
                .insert_scene(&Scene {
                    id: id.to_string(),
                    adventure_id: "a1".to_string(),
                    title: id.to_string(),
                    content: String::new(),
                    image_url: None,
                    is_start_scene: id == "s1",
                    order: 0,
                    created_at: 0,
                    updated_at: 0,
                })
                .await
                .unwrap();
        }
        let repo = SqliteProgressRepository::new(db.pool().clone());
        (db, repo)
    }

    fn make_progress(id: &str, user: &str, scene: &str, variables: Variables) -> PlayerProgress {
        PlayerProgress {
            id: id.to_string(),
            user_id: user.to_string(),
            adventure_id: "a1".to_string(),
            current_scene_id: scene.to_string(),
            variables,
            created_at: 20,
            updated_at: 20,
        }
    }

    #[tokio::test]
    async fn test_insert_and_load_roundtrip() {
        let (_db, repo) = test_db().await;
        let vars = json!({"gold": 12, "flags": {"met_witch": true}})
            .as_object()
            .cloned()
            .unwrap();
        let progress = make_progress("p1", "u2", "s1", vars);
        repo.insert_progress(&progress).await.unwrap();

        assert_eq!(
            repo.load_progress("u2", "a1").await.unwrap(),
            Some(progress)
        );
        assert!(repo.load_progress("u3", "a1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_one_row_per_player_and_adventure() {
        let (_db, repo) = test_db().await;
        repo.insert_progress(&make_progress("p1", "u2", "s1", Variables::new()))
            .await
            .unwrap();
        let duplicate = repo
            .insert_progress(&make_progress("p2", "u2", "s2", Variables::new()))
            .await;
        assert!(matches!(duplicate, Err(PersistenceError::Sqlx(_))));
    }

    #[tokio::test]
    async fn test_redirect_moves_only_matching_rows() {
        let (_db, repo) = test_db().await;
        repo.insert_progress(&make_progress("p1", "u2", "s2", Variables::new()))
            .await
            .unwrap();
        repo.insert_progress(&make_progress("p2", "u3", "s2", Variables::new()))
            .await
            .unwrap();
        repo.insert_progress(&make_progress("p3", "u4", "s1", Variables::new()))
            .await
            .unwrap();

        assert_eq!(repo.redirect_progress("s2", "s1", 99).await.unwrap(), 2);
        assert!(repo.list_progress_at_scene("s2").await.unwrap().is_empty());

        let at_start = repo.list_progress_at_scene("s1").await.unwrap();
        assert_eq!(at_start.len(), 3);
        let moved = repo.load_progress("u2", "a1").await.unwrap().unwrap();
        assert_eq!(moved.updated_at, 99);
        let untouched = repo.load_progress("u4", "a1").await.unwrap().unwrap();
        assert_eq!(untouched.updated_at, 20);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (_db, repo) = test_db().await;
        let mut progress = make_progress("p1", "u2", "s1", Variables::new());
        repo.insert_progress(&progress).await.unwrap();

        progress.current_scene_id = "s2".to_string();
        progress.variables.insert("torch".to_string(), json!(true));
        assert!(repo.update_progress(&progress).await.unwrap());
        let loaded = repo.load_progress("u2", "a1").await.unwrap().unwrap();
        assert_eq!(loaded.current_scene_id, "s2");
        assert_eq!(loaded.variables["torch"], true);

        assert!(repo.delete_progress("u2", "a1").await.unwrap());
        assert!(!repo.delete_progress("u2", "a1").await.unwrap());
    }
}
