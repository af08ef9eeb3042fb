pub mod batch;
pub mod deletion;
pub mod model;
pub mod payloads;
pub mod types;

pub use batch::{BatchEntry, BatchOperation, BatchOutput, BatchResult, UNAUTHORIZED_BATCH_ERROR};
pub use deletion::{AffectedData, SceneDeletionDetails, SceneDeletionReport, SceneRef};
pub use model::{Adventure, Choice, PlayerProgress, Scene, Variables};
pub use payloads::{
    ChoiceData, CreateAdventureData, CreateProgressData, SceneData, UpdateAdventureData,
    UpdateProgressData,
};
pub use types::EntityKind;
