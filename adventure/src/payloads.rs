//! Input payloads for creating and editing graph records, and the rules for
//! folding an edit into an existing record.

use serde::{Deserialize, Serialize};

use crate::model::{Adventure, Choice, PlayerProgress, Scene, Variables};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdventureData {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub is_published: Option<bool>,
}

/// Partial adventure edit. `None` means "leave unchanged", never "clear".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdventureData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
}

/// Scene fields, shared by create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneData {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_start_scene: Option<bool>,
    pub order: i64,
}

/// Choice fields, shared by create and update. The source scene is given
/// separately because it identifies where the choice lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceData {
    pub text: String,
    pub to_scene_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgressData {
    pub adventure_id: String,
    pub current_scene_id: String,
    #[serde(default)]
    pub variables: Variables,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressData {
    #[serde(default)]
    pub current_scene_id: Option<String>,
    #[serde(default)]
    pub variables: Option<Variables>,
}

impl UpdateAdventureData {
    pub fn apply(self, adventure: &mut Adventure) {
        if let Some(title) = self.title {
            adventure.title = title;
        }
        if let Some(description) = self.description {
            adventure.description = description;
        }
        if let Some(is_published) = self.is_published {
            adventure.is_published = is_published;
        }
    }
}

impl SceneData {
    /// Replace the editable fields of `scene`. An absent `is_start_scene`
    /// keeps the current flag; the image is replaced even when absent.
    pub fn apply(self, scene: &mut Scene) {
        scene.title = self.title;
        scene.content = self.content;
        scene.image_url = self.image_url;
        if let Some(is_start_scene) = self.is_start_scene {
            scene.is_start_scene = is_start_scene;
        }
        scene.order = self.order;
    }
}

impl ChoiceData {
    pub fn apply(self, choice: &mut Choice) {
        choice.to_scene_id = self.to_scene_id;
        choice.text = self.text;
        choice.image_url = self.image_url;
        choice.condition = self.condition;
        choice.order = self.order;
    }
}

impl UpdateProgressData {
    /// Move the player if a scene is given and shallow-merge variables,
    /// letting keys from the update win.
    pub fn apply(self, progress: &mut PlayerProgress) {
        if let Some(scene_id) = self.current_scene_id {
            progress.current_scene_id = scene_id;
        }
        if let Some(variables) = self.variables {
            progress.variables.extend(variables);
        }
    }
}
