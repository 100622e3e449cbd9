// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard routes: lookup, entries and tables.

use crate::error::{AppError, Result};
use crate::models::{ColumnInfo, LeaderboardDocument, LeaderboardTable};
use crate::services::templates::{catalog, TemplateSummary};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Leaderboard routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/templates", get(list_templates))
        .route("/api/leaderboards/{key}", get(search_leaderboard))
        .route("/api/leaderboards/{key}/columns", get(get_columns))
        .route("/api/leaderboards/{key}/entries", post(submit_entry))
        .route("/api/leaderboards/{key}/table", get(get_table))
}

// ─── Templates ───────────────────────────────────────────────

async fn list_templates() -> Result<Json<Vec<TemplateSummary>>> {
    Ok(Json(catalog()?))
}

// ─── Lookup ──────────────────────────────────────────────────

/// Find a leaderboard by key.
async fn search_leaderboard(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<LeaderboardDocument>> {
    state
        .schema_service
        .search_schema(&key)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Leaderboard {} not found", key)))
}

async fn get_columns(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<ColumnInfo>>> {
    let columns = state.record_service.fetch_columns(&key).await?;
    Ok(Json(columns))
}

// ─── Entries ─────────────────────────────────────────────────

/// One row of values, in column order.
#[derive(Debug, Deserialize, Validate)]
struct SubmitEntryRequest {
    #[validate(length(max = 5))]
    values: Vec<String>,
}

/// Response for a submitted entry.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubmitEntryResponse {
    pub entry_id: String,
    pub table: LeaderboardTable,
}

/// Add a row, then return the refreshed table.
async fn submit_entry(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(payload): Json<SubmitEntryRequest>,
) -> Result<(StatusCode, Json<SubmitEntryResponse>)> {
    payload.validate()?;

    let entry_id = state
        .record_service
        .submit_record(&key, &payload.values)
        .await?;
    let table = state.record_service.refresh_table(&key).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitEntryResponse { entry_id, table }),
    ))
}

async fn get_table(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<LeaderboardTable>> {
    let table = state.record_service.refresh_table(&key).await?;
    Ok(Json(table))
}
