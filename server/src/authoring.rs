//! Ownership-checked single edits, plus the player-side progress calls.
//!
//! Unlike a batch, a single edit tells the caller why it was refused: a
//! target that does not exist is `NotFound`, one owned by someone else is
//! `Unauthorized`. Progress calls act on the caller's own row and need no
//! ownership.

use std::sync::Arc;

use adventure::{
    Adventure, Choice, ChoiceData, CreateAdventureData, CreateProgressData, EntityKind,
    PlayerProgress, Scene, SceneData, SceneDeletionReport, UpdateAdventureData,
    UpdateProgressData,
};

use crate::batch::BatchExecutor;
use crate::error::MutationError;
use crate::ownership::OwnershipResolver;
use crate::persistence::EntityStore;
use crate::services::{AdventureService, ChoiceService, ProgressService, SceneService};

pub struct Authoring<St> {
    ownership: OwnershipResolver<St>,
    adventures: AdventureService<St>,
    scenes: SceneService<St>,
    choices: ChoiceService<St>,
    progress: ProgressService<St>,
    batches: BatchExecutor<St>,
}

impl<St: EntityStore> Authoring<St> {
    pub fn new(store: Arc<St>) -> Self {
        Self {
            ownership: OwnershipResolver::new(Arc::clone(&store)),
            adventures: AdventureService::new(Arc::clone(&store)),
            scenes: SceneService::new(Arc::clone(&store)),
            choices: ChoiceService::new(Arc::clone(&store)),
            progress: ProgressService::new(Arc::clone(&store)),
            batches: BatchExecutor::new(store),
        }
    }

    pub fn batches(&self) -> &BatchExecutor<St> {
        &self.batches
    }

    pub async fn validate_ownership(&self, kind: EntityKind, id: &str, user_id: &str) -> bool {
        self.ownership.is_owner(kind, id, user_id).await
    }

    pub async fn list_adventures(&self, user_id: &str) -> Result<Vec<Adventure>, MutationError> {
        self.adventures.list_by_author(user_id).await
    }

    pub async fn create_adventure(
        &self,
        user_id: &str,
        data: CreateAdventureData,
    ) -> Result<Adventure, MutationError> {
        self.adventures.create(user_id, data).await
    }

    pub async fn update_adventure(
        &self,
        user_id: &str,
        id: &str,
        data: UpdateAdventureData,
    ) -> Result<Adventure, MutationError> {
        self.authorize(EntityKind::Adventure, id, user_id).await?;
        self.adventures.update(id, data).await
    }

    pub async fn delete_adventure(&self, user_id: &str, id: &str) -> Result<(), MutationError> {
        self.authorize(EntityKind::Adventure, id, user_id).await?;
        self.adventures.delete(id).await
    }

    pub async fn create_scene(
        &self,
        user_id: &str,
        adventure_id: &str,
        data: SceneData,
    ) -> Result<Scene, MutationError> {
        self.authorize(EntityKind::Adventure, adventure_id, user_id).await?;
        self.scenes.create(adventure_id, data).await
    }

    pub async fn update_scene(
        &self,
        user_id: &str,
        id: &str,
        data: SceneData,
    ) -> Result<Scene, MutationError> {
        self.authorize(EntityKind::Scene, id, user_id).await?;
        self.scenes.update(id, data).await
    }

    pub async fn delete_scene(
        &self,
        user_id: &str,
        id: &str,
        redirect_scene_id: &str,
    ) -> Result<SceneDeletionReport, MutationError> {
        self.authorize(EntityKind::Scene, id, user_id).await?;
        self.scenes.delete(id, redirect_scene_id).await
    }

    pub async fn create_choice(
        &self,
        user_id: &str,
        from_scene_id: &str,
        data: ChoiceData,
    ) -> Result<Choice, MutationError> {
        let adventure = self
            .authorize(EntityKind::Scene, from_scene_id, user_id)
            .await?;
        self.require_scene_in(&adventure, &data.to_scene_id).await?;
        self.choices.create(from_scene_id, data).await
    }

    pub async fn update_choice(
        &self,
        user_id: &str,
        id: &str,
        data: ChoiceData,
    ) -> Result<Choice, MutationError> {
        let adventure = self.authorize(EntityKind::Choice, id, user_id).await?;
        self.require_scene_in(&adventure, &data.to_scene_id).await?;
        self.choices.update(id, data).await
    }

    pub async fn delete_choice(&self, user_id: &str, id: &str) -> Result<(), MutationError> {
        self.authorize(EntityKind::Choice, id, user_id).await?;
        self.choices.delete(id).await
    }

    pub async fn get_progress(
        &self,
        user_id: &str,
        adventure_id: &str,
    ) -> Result<Option<PlayerProgress>, MutationError> {
        self.progress.get(user_id, adventure_id).await
    }

    pub async fn create_progress(
        &self,
        user_id: &str,
        data: CreateProgressData,
    ) -> Result<PlayerProgress, MutationError> {
        self.progress.create(user_id, data).await
    }

    pub async fn update_progress(
        &self,
        user_id: &str,
        adventure_id: &str,
        data: UpdateProgressData,
    ) -> Result<Option<PlayerProgress>, MutationError> {
        self.progress.update(user_id, adventure_id, data).await
    }

    pub async fn delete_progress(
        &self,
        user_id: &str,
        adventure_id: &str,
    ) -> Result<bool, MutationError> {
        self.progress.delete(user_id, adventure_id).await
    }

    /// Resolve the adventure behind an entity and check the user wrote it.
    async fn authorize(
        &self,
        kind: EntityKind,
        id: &str,
        user_id: &str,
    ) -> Result<Adventure, MutationError> {
        match self.ownership.owning_adventure(kind, id).await? {
            None => Err(MutationError::not_found(kind, id)),
            Some(adventure) if adventure.is_authored_by(user_id) => Ok(adventure),
            Some(adventure) => {
                tracing::warn!(
                    %kind,
                    id,
                    adventure_id = %adventure.id,
                    user_id,
                    "Unauthorized edit"
                );
                Err(MutationError::Unauthorized)
            }
        }
    }

    async fn require_scene_in(
        &self,
        adventure: &Adventure,
        scene_id: &str,
    ) -> Result<Scene, MutationError> {
        match self.scenes.get(scene_id).await {
            Ok(scene) if scene.adventure_id == adventure.id => Ok(scene),
            Ok(_) => Err(MutationError::not_found(EntityKind::Scene, scene_id)),
            Err(e) => Err(e),
        }
    }
}
