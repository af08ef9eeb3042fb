use std::sync::Arc;

use adventure::{Adventure, CreateAdventureData, EntityKind, UpdateAdventureData};

use crate::error::MutationError;
use crate::persistence::{generate_id, now_timestamp, AdventureRepository, EntityStore};

/// Create, read, update and delete adventures.
pub struct AdventureService<St> {
    store: Arc<St>,
}

impl<St> Clone for AdventureService<St> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<St: EntityStore> AdventureService<St> {
    pub fn new(store: Arc<St>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        author_id: &str,
        data: CreateAdventureData,
    ) -> Result<Adventure, MutationError> {
        let now = now_timestamp();
        let adventure = Adventure {
            id: generate_id(),
            author_id: author_id.to_string(),
            title: data.title,
            description: data.description,
            is_published: data.is_published.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };
        self.store.adventures().insert_adventure(&adventure).await?;

        tracing::info!(adventure_id = %adventure.id, author_id, "Created adventure");
        Ok(adventure)
    }

    pub async fn get(&self, id: &str) -> Result<Adventure, MutationError> {
        self.store
            .adventures()
            .load_adventure(id)
            .await?
            .ok_or_else(|| MutationError::not_found(EntityKind::Adventure, id))
    }

    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<Adventure>, MutationError> {
        Ok(self
            .store
            .adventures()
            .list_adventures_by_author(author_id)
            .await?)
    }

    pub async fn update(
        &self,
        id: &str,
        data: UpdateAdventureData,
    ) -> Result<Adventure, MutationError> {
        let mut adventure = self.get(id).await?;
        data.apply(&mut adventure);
        adventure.updated_at = now_timestamp();

        if !self.store.adventures().update_adventure(&adventure).await? {
            return Err(MutationError::not_found(EntityKind::Adventure, id));
        }
        tracing::debug!(adventure_id = id, "Updated adventure");
        Ok(adventure)
    }

    /// Removes the adventure. Its scenes, choices and progress rows go with it.
    pub async fn delete(&self, id: &str) -> Result<(), MutationError> {
        if !self.store.adventures().delete_adventure(id).await? {
            return Err(MutationError::not_found(EntityKind::Adventure, id));
        }
        tracing::info!(adventure_id = id, "Deleted adventure");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::empty_store;

    fn create_data(title: &str) -> CreateAdventureData {
        CreateAdventureData {
            title: title.to_string(),
            description: "A short tale".to_string(),
            is_published: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_unpublished() {
        let (_db, store) = empty_store().await;
        let service = AdventureService::new(store);

        let created = service.create("u1", create_data("Moors")).await.unwrap();
        assert!(!created.is_published);
        assert_eq!(created.author_id, "u1");
        assert_eq!(service.get(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let (_db, store) = empty_store().await;
        let service = AdventureService::new(store);
        let created = service.create("u1", create_data("Moors")).await.unwrap();

        let updated = service
            .update(
                &created.id,
                UpdateAdventureData {
                    is_published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.is_published);
        assert_eq!(updated.title, "Moors");
        assert_eq!(service.get(&created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_missing_adventure_is_not_found() {
        let (_db, store) = empty_store().await;
        let service = AdventureService::new(store);

        assert!(matches!(
            service.get("nope").await,
            Err(MutationError::NotFound {
                kind: EntityKind::Adventure,
                ..
            })
        ));
        assert!(matches!(
            service.update("nope", UpdateAdventureData::default()).await,
            Err(MutationError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete("nope").await,
            Err(MutationError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_by_author() {
        let (_db, store) = empty_store().await;
        let service = AdventureService::new(store);
        service.create("u1", create_data("One")).await.unwrap();
        service.create("u1", create_data("Two")).await.unwrap();
        service.create("u2", create_data("Other")).await.unwrap();

        let mine = service.list_by_author("u1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|a| a.author_id == "u1"));
    }
}
