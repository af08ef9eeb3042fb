//! Ordered execution of client edit batches.
//!
//! A batch runs in two phases. Validation resolves the owner of every
//! operation's target before anything is written; a single failure rejects
//! the whole batch with [`BatchResult::rejected`]. Execution then applies the
//! operations in input order and stops at the first error. Operations that
//! already ran stay committed.
//!
//! `createScene` and `createChoice` may carry their own id. Later operations
//! in the same batch can target that id, and validation counts it as owned
//! once the creating operation has itself passed.

use std::collections::HashSet;
use std::sync::Arc;

use adventure::{BatchEntry, BatchOperation, BatchOutput, BatchResult, EntityKind};
use tracing::Instrument;

use crate::error::MutationError;
use crate::ownership::OwnershipResolver;
use crate::persistence::EntityStore;
use crate::services::{AdventureService, ChoiceService, SceneService};

pub struct BatchExecutor<St> {
    ownership: OwnershipResolver<St>,
    adventures: AdventureService<St>,
    scenes: SceneService<St>,
    choices: ChoiceService<St>,
}

impl<St: EntityStore> BatchExecutor<St> {
    pub fn new(store: Arc<St>) -> Self {
        Self {
            ownership: OwnershipResolver::new(Arc::clone(&store)),
            adventures: AdventureService::new(Arc::clone(&store)),
            scenes: SceneService::new(Arc::clone(&store)),
            choices: ChoiceService::new(store),
        }
    }

    pub async fn execute(&self, user_id: &str, operations: Vec<BatchOperation>) -> BatchResult {
        let span = tracing::info_span!("batch", user = %user_id, operations = operations.len());
        self.execute_inner(user_id, operations).instrument(span).await
    }

    async fn execute_inner(&self, user_id: &str, operations: Vec<BatchOperation>) -> BatchResult {
        if let Some(index) = self.first_unauthorized(user_id, &operations).await {
            tracing::warn!(
                index,
                operation = operations[index].name(),
                "Rejected batch: unauthorized operation"
            );
            return BatchResult::rejected();
        }

        let mut results = Vec::with_capacity(operations.len());
        for (index, operation) in operations.into_iter().enumerate() {
            let name = operation.name();
            match self.apply(user_id, operation).await {
                Ok(output) => {
                    tracing::debug!(index, operation = name, "Applied operation");
                    results.push(BatchEntry::Ok(output));
                }
                Err(e) => {
                    tracing::warn!(index, operation = name, error = %e, "Batch stopped");
                    results.push(BatchEntry::error(e.to_string()));
                    return BatchResult {
                        success: false,
                        results,
                    };
                }
            }
        }

        tracing::info!(applied = results.len(), "Batch applied");
        BatchResult {
            success: true,
            results,
        }
    }

    /// Index of the first operation whose target the user does not own.
    async fn first_unauthorized(
        &self,
        user_id: &str,
        operations: &[BatchOperation],
    ) -> Option<usize> {
        let mut planned: HashSet<(EntityKind, &str)> = HashSet::new();
        for (index, operation) in operations.iter().enumerate() {
            if let Some(target) = operation.ownership_target() {
                let (kind, id) = target;
                if !planned.contains(&target) && !self.ownership.is_owner(kind, id, user_id).await
                {
                    return Some(index);
                }
            }
            if let Some(created) = operation.created_id() {
                // An id that is already taken stays with its real owner.
                let (kind, id) = created;
                if matches!(self.ownership.owning_adventure(kind, id).await, Ok(None)) {
                    planned.insert(created);
                }
            }
        }
        None
    }

    async fn apply(
        &self,
        user_id: &str,
        operation: BatchOperation,
    ) -> Result<BatchOutput, MutationError> {
        let output = match operation {
            BatchOperation::CreateAdventure { data } => {
                BatchOutput::Adventure(self.adventures.create(user_id, data).await?)
            }
            BatchOperation::UpdateAdventure { id, data } => {
                BatchOutput::Adventure(self.adventures.update(&id, data).await?)
            }
            BatchOperation::DeleteAdventure { id } => {
                self.adventures.delete(&id).await?;
                BatchOutput::Deleted(true)
            }
            BatchOperation::CreateScene {
                id,
                adventure_id,
                data,
            } => BatchOutput::Scene(self.scenes.create_with_id(id, &adventure_id, data).await?),
            BatchOperation::UpdateScene { id, data } => {
                BatchOutput::Scene(self.scenes.update(&id, data).await?)
            }
            BatchOperation::DeleteScene {
                id,
                redirect_progression_to_scene_id,
            } => {
                let report = self
                    .scenes
                    .delete(&id, &redirect_progression_to_scene_id)
                    .await?;
                tracing::debug!(warnings = ?report.details.warnings, "Scene deletion report");
                BatchOutput::Deleted(true)
            }
            BatchOperation::CreateChoice {
                id,
                from_scene_id,
                data,
            } => BatchOutput::Choice(
                self.choices
                    .create_with_id(id, &from_scene_id, data)
                    .await?,
            ),
            BatchOperation::UpdateChoice { id, data } => {
                BatchOutput::Choice(self.choices.update(&id, data).await?)
            }
            BatchOperation::DeleteChoice { id } => {
                self.choices.delete(&id).await?;
                BatchOutput::Deleted(true)
            }
        };
        Ok(output)
    }
}
