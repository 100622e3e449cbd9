// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Realtime Database emulator integration tests.
//!
//! These tests require the Database emulator to be running with
//! FIREBASE_DATABASE_EMULATOR_HOST set, e.g.:
//!
//!   firebase emulators:start --only database
//!   FIREBASE_DATABASE_EMULATOR_HOST=127.0.0.1:9000 cargo test --test emulator_integration
//!
//! The search query orders by `key`, which the emulator allows without an
//! index rule.

use custom_leaderboards::config::Config;
use custom_leaderboards::db::RealtimeDb;
use custom_leaderboards::models::{ColumnInfo, DataType, EditorMode, EditorSession};
use custom_leaderboards::AppState;

mod common;

fn emulator_state() -> AppState {
    let config = Config::test_default();
    let db = RealtimeDb::new(&config);
    AppState::new(config, db)
}

#[tokio::test]
async fn test_emulator_round_trip() {
    require_emulator!();

    let state = emulator_state();
    let mut session = EditorSession::new();
    let key = state.schema_service.create_schema(&mut session);
    let slots = state
        .schema_service
        .set_column_count(&mut session, 2)
        .unwrap();
    session
        .update_slot(slots[0].id, Some("Name".to_string()), Some(DataType::String))
        .unwrap();
    session
        .update_slot(slots[1].id, Some("Score".to_string()), Some(DataType::Int))
        .unwrap();

    let schema = state.schema_service.generate_configuration(&session).unwrap();
    state
        .schema_service
        .publish_schema(&schema, EditorMode::Creation)
        .await
        .unwrap();

    let found = state.schema_service.search_schema(&key).await.unwrap().unwrap();
    assert_eq!(
        found.columns,
        vec![
            ColumnInfo::new("Name", DataType::String),
            ColumnInfo::new("Score", DataType::Int),
        ]
    );

    let entry_id = state
        .record_service
        .submit_record(&key, &["Alice".to_string(), "42".to_string()])
        .await
        .unwrap();
    let table = state.record_service.refresh_table(&key).await.unwrap();

    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].id, entry_id);
    assert_eq!(table.rows[0].cells, vec!["Alice", "42"]);

    println!("✓ Leaderboard round trip verified: key={}", key);
}

#[tokio::test]
async fn test_emulator_search_missing() {
    require_emulator!();

    let state = emulator_state();
    let found = state
        .schema_service
        .search_schema(&uuid::Uuid::new_v4().to_string())
        .await
        .unwrap();
    assert!(found.is_none());
}
