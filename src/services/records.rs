// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record manager: submitting rows to a leaderboard and rendering its table.

use crate::db::RealtimeDb;
use crate::error::AppError;
use crate::models::{ColumnInfo, LeaderboardDocument, LeaderboardRecord, LeaderboardTable};
use serde_json::Value;

/// Service for leaderboard entries.
#[derive(Clone)]
pub struct RecordService {
    db: RealtimeDb,
}

impl RecordService {
    pub fn new(db: RealtimeDb) -> Self {
        Self { db }
    }

    /// Fetch the ordered column list of a stored leaderboard.
    pub async fn fetch_columns(&self, key: &str) -> Result<Vec<ColumnInfo>, AppError> {
        match self.db.get_columns(key).await {
            Ok(Some(columns)) => Ok(columns),
            Ok(None) => {
                tracing::warn!(key, "Leaderboard has no columns");
                Err(AppError::NotFound(format!(
                    "Columns for leaderboard {} not found",
                    key
                )))
            }
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to fetch column information");
                Err(e)
            }
        }
    }

    /// Append one row of values, given in column order. Returns the entry id.
    ///
    /// Nothing is written unless there is exactly one value per column.
    pub async fn submit_record(&self, key: &str, values: &[String]) -> Result<String, AppError> {
        let columns = self.fetch_columns(key).await?;
        let record = build_record(&columns, values)?;

        let entry_id = self.db.push_entry(key, &record).await?;
        tracing::info!(key, entry_id = %entry_id, "Record added to leaderboard");
        Ok(entry_id)
    }

    /// Read the whole leaderboard document.
    pub async fn fetch_leaderboard(&self, key: &str) -> Result<Option<LeaderboardDocument>, AppError> {
        self.db.get_leaderboard(key).await
    }

    /// Re-fetch the leaderboard and lay it out as a table.
    pub async fn refresh_table(&self, key: &str) -> Result<LeaderboardTable, AppError> {
        let doc = self
            .fetch_leaderboard(key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Leaderboard {} not found", key)))?;

        if doc.columns.is_empty() {
            tracing::warn!(key, "No columns found in leaderboard data");
        }

        let table = LeaderboardTable::from_document(&doc);
        tracing::debug!(key, rows = table.rows.len(), "Leaderboard table refreshed");
        Ok(table)
    }
}

/// Pair values with column names, in order. Values stay as given.
pub fn build_record(columns: &[ColumnInfo], values: &[String]) -> Result<LeaderboardRecord, AppError> {
    if columns.len() != values.len() {
        tracing::warn!(
            columns = columns.len(),
            values = values.len(),
            "Mismatch between values and columns"
        );
        return Err(AppError::Validation(format!(
            "Expected {} values, one per column, got {}",
            columns.len(),
            values.len()
        )));
    }

    Ok(columns
        .iter()
        .zip(values)
        .map(|(column, value)| (column.name.clone(), Value::String(value.clone())))
        .collect())
}
