//! Persisted graph records.
//!
//! Field names serialize in camelCase so results can be handed to a web
//! client unchanged. Timestamps are unix seconds.

use serde::{Deserialize, Serialize};

/// Opaque player state. Stored and merged, never interpreted.
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// A branching story owned by one author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adventure {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub description: String,
    pub is_published: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

/// A node of the story graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub adventure_id: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub is_start_scene: bool,
    /// Author-facing sequence number. Stored as given, never renumbered.
    pub order: i64,
    pub created_at: u64,
    pub updated_at: u64,
}

/// A directed edge between two scenes of the same adventure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: String,
    pub from_scene_id: String,
    pub to_scene_id: String,
    pub text: String,
    pub image_url: Option<String>,
    /// Evaluated by the player client, not here.
    pub condition: Option<String>,
    pub order: i64,
    pub created_at: u64,
    pub updated_at: u64,
}

/// Where a player currently is in an adventure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProgress {
    pub id: String,
    pub user_id: String,
    pub adventure_id: String,
    pub current_scene_id: String,
    #[serde(default)]
    pub variables: Variables,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Adventure {
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }
}

impl Choice {
    /// True if the choice leaves from or leads into `scene_id`.
    pub fn touches(&self, scene_id: &str) -> bool {
        self.from_scene_id == scene_id || self.to_scene_id == scene_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(from: &str, to: &str) -> Choice {
        Choice {
            id: "c1".to_string(),
            from_scene_id: from.to_string(),
            to_scene_id: to.to_string(),
            text: "Open the door".to_string(),
            image_url: None,
            condition: None,
            order: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn choice_touches_both_directions() {
        let c = choice("s1", "s2");
        assert!(c.touches("s1"));
        assert!(c.touches("s2"));
        assert!(!c.touches("s3"));
    }

    #[test]
    fn adventure_serializes_camel_case() {
        let adventure = Adventure {
            id: "a1".to_string(),
            author_id: "u1".to_string(),
            title: "The Cave".to_string(),
            description: "Dark and damp".to_string(),
            is_published: false,
            created_at: 10,
            updated_at: 10,
        };
        let json = serde_json::to_value(&adventure).unwrap();
        assert_eq!(json["authorId"], "u1");
        assert_eq!(json["isPublished"], false);
        assert!(adventure.is_authored_by("u1"));
        assert!(!adventure.is_authored_by("u2"));
    }

    #[test]
    fn progress_variables_default_to_empty() {
        let json = r#"{
            "id": "p1",
            "userId": "u2",
            "adventureId": "a1",
            "currentSceneId": "s1",
            "createdAt": 0,
            "updatedAt": 0
        }"#;
        let progress: PlayerProgress = serde_json::from_str(json).unwrap();
        assert!(progress.variables.is_empty());
    }
}
