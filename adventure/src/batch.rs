//! Client-submitted edit batches and their per-operation results.

use serde::{Deserialize, Serialize};

use crate::model::{Adventure, Choice, Scene};
use crate::payloads::{ChoiceData, CreateAdventureData, SceneData, UpdateAdventureData};
use crate::types::EntityKind;

/// The single result returned when any operation of a batch fails its
/// ownership check.
pub const UNAUTHORIZED_BATCH_ERROR: &str = "Unauthorized operation in batch";

/// One edit in a batch. Wire form is tagged by `type`, e.g.
/// `{"type": "deleteScene", "id": "...", "redirectProgressionToSceneId": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BatchOperation {
    CreateAdventure {
        data: CreateAdventureData,
    },
    UpdateAdventure {
        id: String,
        data: UpdateAdventureData,
    },
    DeleteAdventure {
        id: String,
    },
    /// `id` lets later operations in the same batch refer to the new scene.
    CreateScene {
        #[serde(default)]
        id: Option<String>,
        adventure_id: String,
        data: SceneData,
    },
    UpdateScene {
        id: String,
        data: SceneData,
    },
    DeleteScene {
        id: String,
        redirect_progression_to_scene_id: String,
    },
    CreateChoice {
        #[serde(default)]
        id: Option<String>,
        from_scene_id: String,
        data: ChoiceData,
    },
    UpdateChoice {
        id: String,
        data: ChoiceData,
    },
    DeleteChoice {
        id: String,
    },
}

impl BatchOperation {
    /// The existing entity whose owner must be the acting user.
    ///
    /// `None` for `createAdventure`, which has nothing to own yet.
    pub fn ownership_target(&self) -> Option<(EntityKind, &str)> {
        match self {
            Self::CreateAdventure { .. } => None,
            Self::UpdateAdventure { id, .. } | Self::DeleteAdventure { id } => {
                Some((EntityKind::Adventure, id.as_str()))
            }
            Self::CreateScene { adventure_id, .. } => {
                Some((EntityKind::Adventure, adventure_id.as_str()))
            }
            Self::UpdateScene { id, .. } | Self::DeleteScene { id, .. } => {
                Some((EntityKind::Scene, id.as_str()))
            }
            Self::CreateChoice { from_scene_id, .. } => {
                Some((EntityKind::Scene, from_scene_id.as_str()))
            }
            Self::UpdateChoice { id, .. } | Self::DeleteChoice { id } => {
                Some((EntityKind::Choice, id.as_str()))
            }
        }
    }

    /// The caller-chosen id of an entity this operation creates, if any.
    pub fn created_id(&self) -> Option<(EntityKind, &str)> {
        match self {
            Self::CreateScene { id: Some(id), .. } if !id.is_empty() => {
                Some((EntityKind::Scene, id.as_str()))
            }
            Self::CreateChoice { id: Some(id), .. } if !id.is_empty() => {
                Some((EntityKind::Choice, id.as_str()))
            }
            _ => None,
        }
    }

    /// Wire name of the variant, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateAdventure { .. } => "createAdventure",
            Self::UpdateAdventure { .. } => "updateAdventure",
            Self::DeleteAdventure { .. } => "deleteAdventure",
            Self::CreateScene { .. } => "createScene",
            Self::UpdateScene { .. } => "updateScene",
            Self::DeleteScene { .. } => "deleteScene",
            Self::CreateChoice { .. } => "createChoice",
            Self::UpdateChoice { .. } => "updateChoice",
            Self::DeleteChoice { .. } => "deleteChoice",
        }
    }
}

/// What a successful operation produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchOutput {
    Adventure(Adventure),
    Scene(Scene),
    Choice(Choice),
    /// Deletes report `true`.
    Deleted(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Ok(BatchOutput),
    Failed { error: String },
}

impl BatchEntry {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Failed {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub success: bool,
    pub results: Vec<BatchEntry>,
}

impl BatchResult {
    /// The sentinel for a batch that failed validation.
    pub fn rejected() -> Self {
        Self {
            success: false,
            results: vec![BatchEntry::error(UNAUTHORIZED_BATCH_ERROR)],
        }
    }
}
