//! Resolves who owns a graph entity.
//!
//! Only adventures record an author. A scene is owned by whoever owns its
//! adventure, and a choice by whoever owns its source scene. Any missing link
//! in that chain, or a storage error while walking it, resolves to "not the
//! owner".

use std::sync::Arc;

use adventure::{Adventure, EntityKind};

use crate::persistence::{
    AdventureRepository, ChoiceRepository, EntityStore, PersistenceError, SceneRepository,
};

pub struct OwnershipResolver<St> {
    store: Arc<St>,
}

impl<St> Clone for OwnershipResolver<St> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<St: EntityStore> OwnershipResolver<St> {
    pub fn new(store: Arc<St>) -> Self {
        Self { store }
    }

    /// True only if the entity exists and `user_id` authored its adventure.
    pub async fn is_owner(&self, kind: EntityKind, id: &str, user_id: &str) -> bool {
        match self.owning_adventure(kind, id).await {
            Ok(Some(adventure)) => adventure.is_authored_by(user_id),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(
                    %kind,
                    id,
                    depth = kind.chain_depth(),
                    error = %e,
                    "Ownership lookup failed"
                );
                false
            }
        }
    }

    /// Walk from an entity up to the adventure that owns it.
    pub async fn owning_adventure(
        &self,
        kind: EntityKind,
        id: &str,
    ) -> Result<Option<Adventure>, PersistenceError> {
        let adventure_id = match kind {
            EntityKind::Adventure => id.to_string(),
            EntityKind::Scene => match self.store.scenes().load_scene(id).await? {
                Some(scene) => scene.adventure_id,
                None => return Ok(None),
            },
            EntityKind::Choice => {
                let Some(choice) = self.store.choices().load_choice(id).await? else {
                    return Ok(None);
                };
                match self.store.scenes().load_scene(&choice.from_scene_id).await? {
                    Some(scene) => scene.adventure_id,
                    None => return Ok(None),
                }
            }
        };

        self.store.adventures().load_adventure(&adventure_id).await
    }
}
