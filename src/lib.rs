// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Customizable leaderboards backed by a Firebase Realtime Database.
//!
//! Users define a schema of up to five named, typed columns, publish it
//! under a generated key, then submit and render rows matching it.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::RealtimeDb;
use services::{RecordService, SchemaService, SessionStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub schema_service: SchemaService,
    pub record_service: RecordService,
    pub sessions: SessionStore,
}

impl AppState {
    /// Wire the services to one database client.
    pub fn new(config: Config, db: RealtimeDb) -> Self {
        Self {
            schema_service: SchemaService::new(db.clone(), config.edit_policy),
            record_service: RecordService::new(db),
            sessions: SessionStore::new(),
            config,
        }
    }
}
