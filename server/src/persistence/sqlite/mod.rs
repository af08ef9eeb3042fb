//! SQLite-backed repository implementations.
//!
//! ## Database setup
//!
//! [`Database`] wraps a `sqlx::SqlitePool` configured with:
//! - **WAL mode**: allows one writer and multiple concurrent readers.
//! - **Foreign keys enabled**: enforced at the connection level, so a choice
//!   can never point at a missing scene and deleting an adventure cascades
//!   to its scenes, choices and progress rows.
//! - **Embedded migrations**: `sqlx::migrate!` runs `migrations/001_initial_schema.sql`
//!   automatically when [`Database::open`] is called. The schema is idempotent.
//!
//! ## Repository types
//!
//! Each `Sqlite*Repository` holds a `SqlitePool` clone and implements the
//! corresponding trait from [`crate::persistence::traits`]:
//!
//! | Type | Trait |
//! |------|-------|
//! | [`SqliteAdventureRepository`] | `AdventureRepository` |
//! | [`SqliteSceneRepository`] | `SceneRepository` |
//! | [`SqliteChoiceRepository`] | `ChoiceRepository` |
//! | [`SqliteProgressRepository`] | `ProgressRepository` |
//!
//! [`SqliteStore`] bundles all four as an [`EntityStore`].
//!
//! Multi-row writes are issued as single statements. Nothing here opens a
//! transaction that spans repository calls.

mod adventure_repo;
mod choice_repo;
mod database;
pub(crate) mod helpers;
mod progress_repo;
mod scene_repo;

pub use adventure_repo::SqliteAdventureRepository;
pub use choice_repo::SqliteChoiceRepository;
pub use database::Database;
pub use progress_repo::SqliteProgressRepository;
pub use scene_repo::SqliteSceneRepository;

use sqlx::SqlitePool;

use crate::persistence::traits::EntityStore;

/// All adventure-graph repositories sharing one pool.
#[derive(Clone)]
pub struct SqliteStore {
    adventures: SqliteAdventureRepository,
    scenes: SqliteSceneRepository,
    choices: SqliteChoiceRepository,
    progress: SqliteProgressRepository,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            adventures: SqliteAdventureRepository::new(pool.clone()),
            scenes: SqliteSceneRepository::new(pool.clone()),
            choices: SqliteChoiceRepository::new(pool.clone()),
            progress: SqliteProgressRepository::new(pool),
        }
    }

    pub fn from_database(db: &Database) -> Self {
        Self::new(db.pool().clone())
    }
}

impl EntityStore for SqliteStore {
    type Adventures = SqliteAdventureRepository;
    type Scenes = SqliteSceneRepository;
    type Choices = SqliteChoiceRepository;
    type Progress = SqliteProgressRepository;

    fn adventures(&self) -> &Self::Adventures {
        &self.adventures
    }

    fn scenes(&self) -> &Self::Scenes {
        &self.scenes
    }

    fn choices(&self) -> &Self::Choices {
        &self.choices
    }

    fn progress(&self) -> &Self::Progress {
        &self.progress
    }
}
