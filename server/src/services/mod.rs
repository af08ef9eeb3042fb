//! Single-operation services over the adventure graph.
//!
//! Services do not check ownership. Callers either go through
//! [`crate::authoring::Authoring`] for one-off edits or through the batch
//! executor, which validates every operation up front.

mod adventures;
mod choices;
mod progress;
mod scenes;

pub use adventures::AdventureService;
pub use choices::ChoiceService;
pub use progress::ProgressService;
pub use scenes::SceneService;
