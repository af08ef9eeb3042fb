//! Async repository trait definitions for the persistence layer.
//!
//! Each trait covers one table of the adventure graph. [`EntityStore`]
//! bundles the four so services can be generic over a single parameter.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send` and can be driven from `tokio::spawn`.

use super::PersistenceError;
use adventure::{Adventure, Choice, PlayerProgress, Scene};
use std::future::Future;

/// Repository for adventures.
pub trait AdventureRepository: Send + Sync {
    fn insert_adventure(
        &self,
        adventure: &Adventure,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    fn load_adventure(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Adventure>, PersistenceError>> + Send;
    fn list_adventures_by_author(
        &self,
        author_id: &str,
    ) -> impl Future<Output = Result<Vec<Adventure>, PersistenceError>> + Send;
    /// Returns `false` if no row matched.
    fn update_adventure(
        &self,
        adventure: &Adventure,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
    /// Removes the adventure together with everything it owns.
    /// Returns `false` if no row matched.
    fn delete_adventure(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
}

/// Repository for scenes.
pub trait SceneRepository: Send + Sync {
    fn insert_scene(
        &self,
        scene: &Scene,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    fn load_scene(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Scene>, PersistenceError>> + Send;
    /// Scenes of one adventure ordered by their author-supplied `order`.
    fn list_scenes(
        &self,
        adventure_id: &str,
    ) -> impl Future<Output = Result<Vec<Scene>, PersistenceError>> + Send;
    fn update_scene(
        &self,
        scene: &Scene,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
    /// Deletes the bare row. Callers must clear choices and progress pointers
    /// first; see [`crate::integrity`].
    fn delete_scene(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
}

/// Repository for choices.
pub trait ChoiceRepository: Send + Sync {
    fn insert_choice(
        &self,
        choice: &Choice,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    fn load_choice(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Choice>, PersistenceError>> + Send;
    /// Outgoing choices of a scene ordered by `order`.
    fn list_choices_from(
        &self,
        scene_id: &str,
    ) -> impl Future<Output = Result<Vec<Choice>, PersistenceError>> + Send;
    /// Choices leaving from or leading into a scene.
    fn list_choices_touching(
        &self,
        scene_id: &str,
    ) -> impl Future<Output = Result<Vec<Choice>, PersistenceError>> + Send;
    fn update_choice(
        &self,
        choice: &Choice,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
    fn delete_choice(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
    /// Deletes every choice leaving from or leading into a scene and returns
    /// how many rows went away.
    fn delete_choices_touching(
        &self,
        scene_id: &str,
    ) -> impl Future<Output = Result<u64, PersistenceError>> + Send;
}

/// Repository for player progress, keyed by (user, adventure).
pub trait ProgressRepository: Send + Sync {
    fn insert_progress(
        &self,
        progress: &PlayerProgress,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    fn load_progress(
        &self,
        user_id: &str,
        adventure_id: &str,
    ) -> impl Future<Output = Result<Option<PlayerProgress>, PersistenceError>> + Send;
    fn list_progress_at_scene(
        &self,
        scene_id: &str,
    ) -> impl Future<Output = Result<Vec<PlayerProgress>, PersistenceError>> + Send;
    fn update_progress(
        &self,
        progress: &PlayerProgress,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
    fn delete_progress(
        &self,
        user_id: &str,
        adventure_id: &str,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
    /// Points every player standing on `from_scene_id` at `to_scene_id` and
    /// returns how many rows moved.
    fn redirect_progress(
        &self,
        from_scene_id: &str,
        to_scene_id: &str,
        updated_at: u64,
    ) -> impl Future<Output = Result<u64, PersistenceError>> + Send;
}

/// The four repositories of one backing store.
pub trait EntityStore: Send + Sync + 'static {
    type Adventures: AdventureRepository;
    type Scenes: SceneRepository;
    type Choices: ChoiceRepository;
    type Progress: ProgressRepository;

    fn adventures(&self) -> &Self::Adventures;
    fn scenes(&self) -> &Self::Scenes;
    fn choices(&self) -> &Self::Choices;
    fn progress(&self) -> &Self::Progress;
}
