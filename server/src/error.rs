//! Errors surfaced by the mutation engine.

use adventure::EntityKind;

use crate::persistence::PersistenceError;

#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Cannot delete the start scene. Set another scene as the start scene first.")]
    CannotDeleteStartScene,

    #[error("Cannot redirect to the scene being deleted")]
    InvalidRedirectTarget,

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl MutationError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Start-scene and self-redirect rejections: the request was well formed
    /// but would break the graph.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::CannotDeleteStartScene | Self::InvalidRedirectTarget
        )
    }
}
