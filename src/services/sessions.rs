// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store of editor sessions, shared across requests.

use crate::error::AppError;
use crate::models::EditorSession;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Editor sessions keyed by session id.
///
/// Entries are only locked for synchronous edits. Flows that await the
/// database take a copy with [`SessionStore::get`] and write it back with
/// [`SessionStore::put`].
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, EditorSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new empty session and return its id.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, EditorSession::new());
        tracing::debug!(session_id = %id, "Editor session created");
        id
    }

    /// Copy of the session.
    pub fn get(&self, id: Uuid) -> Result<EditorSession, AppError> {
        self.sessions
            .get(&id)
            .map(|s| s.clone())
            .ok_or_else(|| not_found(id))
    }

    /// Run `f` against the stored session.
    pub fn update<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut EditorSession) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut session = self.sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        f(session.value_mut())
    }

    /// Store `session` under `id`, if that session still exists.
    pub fn put(&self, id: Uuid, session: EditorSession) -> Result<(), AppError> {
        let mut slot = self.sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        *slot = session;
        Ok(())
    }

    /// Drop the session. Returns whether it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            tracing::debug!(session_id = %id, "Editor session closed");
        }
        removed
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {} not found", id))
}
