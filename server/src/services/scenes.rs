use std::sync::Arc;

use adventure::{EntityKind, Scene, SceneData, SceneDeletionReport};

use crate::error::MutationError;
use crate::integrity::GraphIntegrity;
use crate::persistence::{generate_id, now_timestamp, EntityStore, SceneRepository};

/// Create, read and update scenes. Deletion runs the integrity protocol.
pub struct SceneService<St> {
    store: Arc<St>,
}

impl<St> Clone for SceneService<St> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<St: EntityStore> SceneService<St> {
    pub fn new(store: Arc<St>) -> Self {
        Self { store }
    }

    /// `order` is stored as given; sibling scenes are never renumbered.
    pub async fn create(
        &self,
        adventure_id: &str,
        data: SceneData,
    ) -> Result<Scene, MutationError> {
        self.create_with_id(None, adventure_id, data).await
    }

    /// Like [`Self::create`], keeping a caller-chosen id when one is given.
    pub async fn create_with_id(
        &self,
        id: Option<String>,
        adventure_id: &str,
        data: SceneData,
    ) -> Result<Scene, MutationError> {
        let now = now_timestamp();
        let scene = Scene {
            id: id.filter(|id| !id.is_empty()).unwrap_or_else(generate_id),
            adventure_id: adventure_id.to_string(),
            title: data.title,
            content: data.content,
            image_url: data.image_url,
            is_start_scene: data.is_start_scene.unwrap_or(false),
            order: data.order,
            created_at: now,
            updated_at: now,
        };
        self.store.scenes().insert_scene(&scene).await?;

        tracing::debug!(scene_id = %scene.id, adventure_id, "Created scene");
        Ok(scene)
    }

    pub async fn get(&self, id: &str) -> Result<Scene, MutationError> {
        self.store
            .scenes()
            .load_scene(id)
            .await?
            .ok_or_else(|| MutationError::not_found(EntityKind::Scene, id))
    }

    pub async fn list_for_adventure(
        &self,
        adventure_id: &str,
    ) -> Result<Vec<Scene>, MutationError> {
        Ok(self.store.scenes().list_scenes(adventure_id).await?)
    }

    pub async fn update(&self, id: &str, data: SceneData) -> Result<Scene, MutationError> {
        let mut scene = self.get(id).await?;
        data.apply(&mut scene);
        scene.updated_at = now_timestamp();

        if !self.store.scenes().update_scene(&scene).await? {
            return Err(MutationError::not_found(EntityKind::Scene, id));
        }
        Ok(scene)
    }

    pub async fn delete(
        &self,
        id: &str,
        redirect_scene_id: &str,
    ) -> Result<SceneDeletionReport, MutationError> {
        GraphIntegrity::new(Arc::clone(&self.store))
            .delete_scene(id, redirect_scene_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seed_scenario;

    fn scene_data(title: &str, order: i64) -> SceneData {
        SceneData {
            title: title.to_string(),
            content: format!("{title} content"),
            image_url: None,
            is_start_scene: None,
            order,
        }
    }

    #[tokio::test]
    async fn test_create_keeps_order_verbatim() {
        let s = seed_scenario().await;
        let service = SceneService::new(Arc::clone(&s.store));

        let created = service
            .create(&s.adventure_id, scene_data("Crypt", 0))
            .await
            .unwrap();
        assert!(!created.is_start_scene);
        assert_eq!(created.order, 0);

        let scenes = service.list_for_adventure(&s.adventure_id).await.unwrap();
        assert_eq!(scenes.len(), 3);
        let orders: Vec<i64> = scenes.iter().map(|scene| scene.order).collect();
        assert_eq!(orders.iter().filter(|o| **o == 0).count(), 2);
    }

    #[tokio::test]
    async fn test_create_with_caller_id() {
        let s = seed_scenario().await;
        let service = SceneService::new(Arc::clone(&s.store));

        let named = service
            .create_with_id(Some("vault".to_string()), &s.adventure_id, scene_data("Vault", 3))
            .await
            .unwrap();
        assert_eq!(named.id, "vault");
        assert_eq!(service.get("vault").await.unwrap(), named);

        let blank = service
            .create_with_id(Some(String::new()), &s.adventure_id, scene_data("Blank", 4))
            .await
            .unwrap();
        assert!(!blank.id.is_empty());

        let duplicate = service
            .create_with_id(Some("vault".to_string()), &s.adventure_id, scene_data("Again", 5))
            .await;
        assert!(matches!(duplicate, Err(MutationError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_start_flag() {
        let s = seed_scenario().await;
        let service = SceneService::new(Arc::clone(&s.store));

        let updated = service
            .update(&s.start_scene_id, scene_data("Gatehouse", 4))
            .await
            .unwrap();
        assert!(updated.is_start_scene);
        assert_eq!(updated.title, "Gatehouse");
        assert_eq!(service.get(&s.start_scene_id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_create_in_missing_adventure_fails() {
        let s = seed_scenario().await;
        let service = SceneService::new(Arc::clone(&s.store));

        let result = service.create("nope", scene_data("Void", 0)).await;
        assert!(matches!(result, Err(MutationError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_update_missing_scene_is_not_found() {
        let s = seed_scenario().await;
        let service = SceneService::new(Arc::clone(&s.store));
        assert!(matches!(
            service.update("nope", scene_data("Void", 0)).await,
            Err(MutationError::NotFound {
                kind: EntityKind::Scene,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_runs_the_protocol() {
        let s = seed_scenario().await;
        let service = SceneService::new(Arc::clone(&s.store));

        let report = service
            .delete(&s.second_scene_id, &s.start_scene_id)
            .await
            .unwrap();
        assert!(report.success);
        assert!(service.get(&s.second_scene_id).await.is_err());
    }
}
