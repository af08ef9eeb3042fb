use std::sync::Arc;

use adventure::{CreateProgressData, EntityKind, PlayerProgress, UpdateProgressData};

use crate::error::MutationError;
use crate::persistence::{
    generate_id, now_timestamp, EntityStore, ProgressRepository, SceneRepository,
};

/// Player progress, one row per (user, adventure).
///
/// Players only ever touch their own row, so there is no ownership check.
/// The current scene must belong to the progress row's adventure.
pub struct ProgressService<St> {
    store: Arc<St>,
}

impl<St> Clone for ProgressService<St> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<St: EntityStore> ProgressService<St> {
    pub fn new(store: Arc<St>) -> Self {
        Self { store }
    }

    pub async fn get(
        &self,
        user_id: &str,
        adventure_id: &str,
    ) -> Result<Option<PlayerProgress>, MutationError> {
        Ok(self
            .store
            .progress()
            .load_progress(user_id, adventure_id)
            .await?)
    }

    pub async fn create(
        &self,
        user_id: &str,
        data: CreateProgressData,
    ) -> Result<PlayerProgress, MutationError> {
        self.require_scene_in(&data.adventure_id, &data.current_scene_id).await?;
        let now = now_timestamp();
        let progress = PlayerProgress {
            id: generate_id(),
            user_id: user_id.to_string(),
            adventure_id: data.adventure_id,
            current_scene_id: data.current_scene_id,
            variables: data.variables,
            created_at: now,
            updated_at: now,
        };
        self.store.progress().insert_progress(&progress).await?;
        Ok(progress)
    }

    /// Returns `None` when the player has no progress in this adventure.
    pub async fn update(
        &self,
        user_id: &str,
        adventure_id: &str,
        data: UpdateProgressData,
    ) -> Result<Option<PlayerProgress>, MutationError> {
        let Some(mut progress) = self.get(user_id, adventure_id).await? else {
            return Ok(None);
        };
        if let Some(scene_id) = &data.current_scene_id {
            self.require_scene_in(adventure_id, scene_id).await?;
        }
        data.apply(&mut progress);
        progress.updated_at = now_timestamp();

        if !self.store.progress().update_progress(&progress).await? {
            return Ok(None);
        }
        Ok(Some(progress))
    }

    /// Returns `false` when there was nothing to delete.
    pub async fn delete(&self, user_id: &str, adventure_id: &str) -> Result<bool, MutationError> {
        Ok(self
            .store
            .progress()
            .delete_progress(user_id, adventure_id)
            .await?)
    }

    async fn require_scene_in(
        &self,
        adventure_id: &str,
        scene_id: &str,
    ) -> Result<(), MutationError> {
        match self.store.scenes().load_scene(scene_id).await? {
            Some(scene) if scene.adventure_id == adventure_id => Ok(()),
            _ => Err(MutationError::not_found(EntityKind::Scene, scene_id)),
        }
    }
}
