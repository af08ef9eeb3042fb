//! Summary returned after a scene has been removed from the graph.

use serde::{Deserialize, Serialize};

use crate::model::Scene;

pub const SCENE_DELETED_MESSAGE: &str = "Scene deleted and related data updated";

/// Identifies a scene by id and title for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRef {
    pub id: String,
    pub title: String,
}

impl From<&Scene> for SceneRef {
    fn from(scene: &Scene) -> Self {
        Self {
            id: scene.id.clone(),
            title: scene.title.clone(),
        }
    }
}

/// Rows touched by the cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedData {
    pub player_progress_updated: u64,
    pub choices_removed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDeletionDetails {
    pub deleted_scene: SceneRef,
    pub redirected_to: SceneRef,
    pub affected_data: AffectedData,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDeletionReport {
    pub success: bool,
    pub message: String,
    pub details: SceneDeletionDetails,
}

impl SceneDeletionReport {
    pub fn new(deleted: SceneRef, redirected_to: SceneRef, affected: AffectedData) -> Self {
        Self {
            success: true,
            message: SCENE_DELETED_MESSAGE.to_string(),
            details: SceneDeletionDetails {
                deleted_scene: deleted,
                redirected_to,
                affected_data: affected,
                warnings: warnings_for(affected),
            },
        }
    }
}

/// Human-readable notes about what the cascade changed. Empty when nothing
/// besides the scene itself was touched.
pub fn warnings_for(affected: AffectedData) -> Vec<String> {
    let mut warnings = Vec::new();
    let choices = affected.choices_removed;
    if choices > 0 {
        let noun = if choices == 1 { "choice" } else { "choices" };
        warnings.push(format!("Removed {choices} {noun} that referenced this scene"));
    }
    let players = affected.player_progress_updated;
    if players > 0 {
        let owner = if players == 1 { "player's" } else { "players'" };
        warnings.push(format!("Updated {players} {owner} progress to the new scene"));
    }
    warnings
}
