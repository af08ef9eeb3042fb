//! Shared fixtures for engine tests.
//!
//! The seeded graph is the canonical small adventure: author `u1` owns
//! adventure `a1` whose start scene `s1` links to `s2` through choice `c1`,
//! and player `u2` is standing on `s2`.

use std::sync::Arc;

use adventure::{Adventure, Choice, PlayerProgress, Scene, Variables};

use crate::persistence::{
    AdventureRepository, ChoiceRepository, Database, EntityStore, ProgressRepository,
    SceneRepository, SqliteStore,
};

pub struct Scenario {
    pub store: Arc<SqliteStore>,
    pub author: String,
    pub player: String,
    pub adventure_id: String,
    pub start_scene_id: String,
    pub second_scene_id: String,
    pub choice_id: String,
}

pub async fn empty_store() -> (Database, Arc<SqliteStore>) {
    let db = Database::new_in_memory().await.unwrap();
    let store = Arc::new(SqliteStore::from_database(&db));
    (db, store)
}

pub fn sample_scene(id: &str, adventure_id: &str, is_start: bool, order: i64) -> Scene {
    Scene {
        id: id.to_string(),
        adventure_id: adventure_id.to_string(),
        title: format!("Scene {id}"),
        content: format!("Content of {id}"),
        image_url: None,
        is_start_scene: is_start,
        order,
        created_at: 1,
        updated_at: 1,
    }
}

pub fn sample_choice(id: &str, from: &str, to: &str) -> Choice {
    Choice {
        id: id.to_string(),
        from_scene_id: from.to_string(),
        to_scene_id: to.to_string(),
        text: format!("Go from {from} to {to}"),
        image_url: None,
        condition: None,
        order: 0,
        created_at: 1,
        updated_at: 1,
    }
}

pub fn sample_progress(id: &str, user: &str, adventure_id: &str, scene: &str) -> PlayerProgress {
    PlayerProgress {
        id: id.to_string(),
        user_id: user.to_string(),
        adventure_id: adventure_id.to_string(),
        current_scene_id: scene.to_string(),
        variables: Variables::new(),
        created_at: 1,
        updated_at: 1,
    }
}

pub async fn seed_scenario() -> Scenario {
    let (_db, store) = empty_store().await;

    store
        .adventures()
        .insert_adventure(&Adventure {
            id: "a1".to_string(),
            author_id: "u1".to_string(),
            title: "The Sunken Keep".to_string(),
            description: "Find the drowned king".to_string(),
            is_published: false,
            created_at: 1,
            updated_at: 1,
        })
        .await
        .unwrap();
    store
        .scenes()
        .insert_scene(&sample_scene("s1", "a1", true, 0))
        .await
        .unwrap();
    store
        .scenes()
        .insert_scene(&sample_scene("s2", "a1", false, 1))
        .await
        .unwrap();
    store
        .choices()
        .insert_choice(&sample_choice("c1", "s1", "s2"))
        .await
        .unwrap();
    store
        .progress()
        .insert_progress(&sample_progress("p1", "u2", "a1", "s2"))
        .await
        .unwrap();

    Scenario {
        store,
        author: "u1".to_string(),
        player: "u2".to_string(),
        adventure_id: "a1".to_string(),
        start_scene_id: "s1".to_string(),
        second_scene_id: "s2".to_string(),
        choice_id: "c1".to_string(),
    }
}
