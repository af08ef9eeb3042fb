use std::sync::Arc;

use adventure::{Choice, ChoiceData, EntityKind};

use crate::error::MutationError;
use crate::persistence::{generate_id, now_timestamp, ChoiceRepository, EntityStore};

/// Create, read, update and delete choices.
///
/// Whether both ends of a choice live in the same adventure is checked by
/// the caller, not here.
pub struct ChoiceService<St> {
    store: Arc<St>,
}

impl<St> Clone for ChoiceService<St> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<St: EntityStore> ChoiceService<St> {
    pub fn new(store: Arc<St>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        from_scene_id: &str,
        data: ChoiceData,
    ) -> Result<Choice, MutationError> {
        self.create_with_id(None, from_scene_id, data).await
    }

    /// Like [`Self::create`], keeping a caller-chosen id when one is given.
    pub async fn create_with_id(
        &self,
        id: Option<String>,
        from_scene_id: &str,
        data: ChoiceData,
    ) -> Result<Choice, MutationError> {
        let now = now_timestamp();
        let choice = Choice {
            id: id.filter(|id| !id.is_empty()).unwrap_or_else(generate_id),
            from_scene_id: from_scene_id.to_string(),
            to_scene_id: data.to_scene_id,
            text: data.text,
            image_url: data.image_url,
            condition: data.condition,
            order: data.order,
            created_at: now,
            updated_at: now,
        };
        self.store.choices().insert_choice(&choice).await?;

        tracing::debug!(
            choice_id = %choice.id,
            from = %choice.from_scene_id,
            to = %choice.to_scene_id,
            "Created choice"
        );
        Ok(choice)
    }

    pub async fn get(&self, id: &str) -> Result<Choice, MutationError> {
        self.store
            .choices()
            .load_choice(id)
            .await?
            .ok_or_else(|| MutationError::not_found(EntityKind::Choice, id))
    }

    pub async fn list_from_scene(&self, scene_id: &str) -> Result<Vec<Choice>, MutationError> {
        Ok(self.store.choices().list_choices_from(scene_id).await?)
    }

    pub async fn update(&self, id: &str, data: ChoiceData) -> Result<Choice, MutationError> {
        let mut choice = self.get(id).await?;
        data.apply(&mut choice);
        choice.updated_at = now_timestamp();

        if !self.store.choices().update_choice(&choice).await? {
            return Err(MutationError::not_found(EntityKind::Choice, id));
        }
        Ok(choice)
    }

    pub async fn delete(&self, id: &str) -> Result<(), MutationError> {
        if !self.store.choices().delete_choice(id).await? {
            return Err(MutationError::not_found(EntityKind::Choice, id));
        }
        tracing::debug!(choice_id = id, "Deleted choice");
        Ok(())
    }
}
