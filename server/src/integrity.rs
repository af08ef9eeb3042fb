//! Scene deletion that leaves no dangling references.
//!
//! A scene is referenced by choices on either end and by the progress rows of
//! players standing on it. Deleting one removes the choices, moves those
//! players to a redirect scene of the same adventure, then drops the scene
//! row. All preconditions are checked before the first write so a rejected
//! deletion changes nothing.
//!
//! The three writes are not wrapped in a transaction. A storage failure
//! between them leaves the earlier writes committed.

use std::sync::Arc;

use adventure::{AffectedData, EntityKind, Scene, SceneDeletionReport, SceneRef};

use crate::error::MutationError;
use crate::persistence::{
    now_timestamp, ChoiceRepository, EntityStore, ProgressRepository, SceneRepository,
};

pub struct GraphIntegrity<St> {
    store: Arc<St>,
}

impl<St: EntityStore> GraphIntegrity<St> {
    pub fn new(store: Arc<St>) -> Self {
        Self { store }
    }

    /// Delete `scene_id`, sending its players to `redirect_scene_id`.
    pub async fn delete_scene(
        &self,
        scene_id: &str,
        redirect_scene_id: &str,
    ) -> Result<SceneDeletionReport, MutationError> {
        let scene = self.require_scene(scene_id).await?;
        let redirect = self.require_scene(redirect_scene_id).await?;
        // Players never leave their adventure, so the redirect must stay inside it.
        if redirect.adventure_id != scene.adventure_id {
            return Err(MutationError::not_found(EntityKind::Scene, redirect_scene_id));
        }

        if scene.is_start_scene {
            return Err(MutationError::CannotDeleteStartScene);
        }
        if scene.id == redirect.id {
            return Err(MutationError::InvalidRedirectTarget);
        }

        let choices_removed = self
            .store
            .choices()
            .delete_choices_touching(&scene.id)
            .await?;
        let player_progress_updated = self
            .store
            .progress()
            .redirect_progress(&scene.id, &redirect.id, now_timestamp())
            .await?;
        self.store.scenes().delete_scene(&scene.id).await?;

        let affected = AffectedData {
            player_progress_updated,
            choices_removed,
        };
        tracing::info!(
            scene_id = %scene.id,
            redirect_to = %redirect.id,
            choices_removed,
            player_progress_updated,
            "Deleted scene"
        );

        Ok(SceneDeletionReport::new(
            SceneRef::from(&scene),
            SceneRef::from(&redirect),
            affected,
        ))
    }

    async fn require_scene(&self, id: &str) -> Result<Scene, MutationError> {
        self.store
            .scenes()
            .load_scene(id)
            .await?
            .ok_or_else(|| MutationError::not_found(EntityKind::Scene, id))
    }
}
