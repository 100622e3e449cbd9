// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schema manager: creating, publishing, searching and editing leaderboard
//! schemas.

use crate::config::EditPolicy;
use crate::db::RealtimeDb;
use crate::error::AppError;
use crate::models::leaderboard::check_column_count;
use crate::models::{
    ColumnSlot, EditorMode, EditorSession, LeaderboardDocument, LeaderboardSchema,
};
use std::collections::HashSet;

/// Service owning leaderboard creation and edits.
#[derive(Clone)]
pub struct SchemaService {
    db: RealtimeDb,
    edit_policy: EditPolicy,
}

impl SchemaService {
    pub fn new(db: RealtimeDb, edit_policy: EditPolicy) -> Self {
        Self { db, edit_policy }
    }

    /// Generate a fresh leaderboard key and put the session in creation mode.
    pub fn create_schema(&self, session: &mut EditorSession) -> String {
        let key = uuid::Uuid::new_v4().to_string();
        session.start_creation(key.clone());
        tracing::info!(key = %key, "New leaderboard key generated");
        key
    }

    /// Materialize `count` empty column slots.
    pub fn set_column_count(
        &self,
        session: &mut EditorSession,
        count: usize,
    ) -> Result<Vec<ColumnSlot>, AppError> {
        match session.set_column_count(count) {
            Ok(slots) => {
                tracing::debug!(count, "Column slots created");
                Ok(slots.to_vec())
            }
            Err(e) => {
                tracing::warn!(count, "Rejected column count");
                Err(e)
            }
        }
    }

    /// Build the schema document from the session's slots, exactly as
    /// entered.
    ///
    /// The slot count must be within the column bounds. Blank and duplicate
    /// column names are accepted. Duplicates mean later records can only
    /// hold one value for that name.
    pub fn generate_configuration(
        &self,
        session: &EditorSession,
    ) -> Result<LeaderboardSchema, AppError> {
        let key = session.key.clone().ok_or_else(|| {
            AppError::Validation("No leaderboard key; create or load a leaderboard first".to_string())
        })?;

        let columns = session.columns();
        check_column_count(columns.len()).inspect_err(|_| {
            tracing::warn!(key = %key, columns = columns.len(), "Schema has no usable column list");
        })?;

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                tracing::warn!(key = %key, column = %column.name, "Duplicate column name in schema");
            }
        }

        Ok(LeaderboardSchema::new(key, columns))
    }

    /// Write a schema to the store.
    ///
    /// New leaderboards are written with a full replace. Edits follow the
    /// configured [`EditPolicy`].
    pub async fn publish_schema(
        &self,
        schema: &LeaderboardSchema,
        mode: EditorMode,
    ) -> Result<(), AppError> {
        check_column_count(schema.columns.len())?;

        match (mode, self.edit_policy) {
            (EditorMode::Creation, _) | (EditorMode::Edit, EditPolicy::Replace) => {
                self.db.put_leaderboard_schema(schema).await?;
            }
            (EditorMode::Edit, EditPolicy::PreserveEntries) => {
                self.db.update_leaderboard_schema(schema).await?;
            }
        }

        tracing::info!(
            key = %schema.key,
            columns = schema.number_of_columns,
            mode = ?mode,
            policy = ?self.edit_policy,
            "Leaderboard schema published"
        );
        Ok(())
    }

    /// Look a leaderboard up by key. `None` when no leaderboard has it.
    pub async fn search_schema(&self, key: &str) -> Result<Option<LeaderboardDocument>, AppError> {
        let found = self.db.find_leaderboard(key).await?;
        if found.is_none() {
            tracing::warn!(key, "Leaderboard not found");
        }
        Ok(found)
    }

    /// Load an existing leaderboard into the session for editing.
    pub async fn begin_edit(
        &self,
        session: &mut EditorSession,
        key: &str,
    ) -> Result<LeaderboardDocument, AppError> {
        let doc = self
            .search_schema(key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Leaderboard {} not found", key)))?;

        session.start_edit(doc.key.clone(), &doc.columns);
        tracing::info!(key = %doc.key, columns = doc.columns.len(), "Editing leaderboard");
        Ok(doc)
    }
}
