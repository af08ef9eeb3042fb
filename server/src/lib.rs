//! Mutation engine for branching-narrative adventures.
//!
//! Authors edit a graph of scenes joined by choices. Every edit to an
//! existing record is checked against the adventure's author, scene deletion
//! keeps choices and player progress consistent, and edit batches are
//! validated as a whole before any of them run.

pub mod authoring;
pub mod batch;
pub mod config;
pub mod error;
pub mod integrity;
pub mod ownership;
pub mod persistence;
pub mod services;

#[cfg(test)]
mod testing;

pub use authoring::Authoring;
pub use batch::BatchExecutor;
pub use error::MutationError;
pub use integrity::GraphIntegrity;
pub use ownership::OwnershipResolver;
