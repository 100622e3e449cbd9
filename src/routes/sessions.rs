// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schema editor routes.
//!
//! A session holds one user's editor state: the key being created or
//! edited, the mode, and the column slots.

use crate::error::{AppError, Result};
use crate::models::{
    ColumnSlot, DataType, EditorMode, EditorSession, LeaderboardSchema, LeaderboardTable, SlotId,
};
use crate::services::templates::{apply_template, Template};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

/// Session routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route(
            "/api/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route("/api/sessions/{id}/key", post(new_key))
        .route("/api/sessions/{id}/exit", post(exit_editor))
        .route("/api/sessions/{id}/columns", put(set_column_count))
        .route("/api/sessions/{id}/columns/{slot}", patch(update_slot))
        .route("/api/sessions/{id}/configuration", get(get_configuration))
        .route("/api/sessions/{id}/publish", post(publish))
        .route("/api/sessions/{id}/template", post(use_template))
        .route("/api/sessions/{id}/edit", post(begin_edit))
}

/// Current editor state.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub session_id: String,
    pub key: Option<String>,
    pub mode: EditorMode,
    pub slots: Vec<ColumnSlot>,
}

impl SessionResponse {
    fn new(id: Uuid, session: EditorSession) -> Self {
        Self {
            session_id: id.to_string(),
            key: session.key,
            mode: session.mode,
            slots: session.slots,
        }
    }
}

/// Result of writing a schema: what was written and the table as it now
/// stands.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PublishResponse {
    pub schema: LeaderboardSchema,
    pub table: LeaderboardTable,
}

/// Result of loading a leaderboard for editing.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EditResponse {
    pub session: SessionResponse,
    pub table: LeaderboardTable,
}

#[derive(Debug, Deserialize, Validate)]
struct ColumnCountRequest {
    #[validate(range(min = 1, max = 5))]
    count: i64,
}

#[derive(Debug, Deserialize, Validate)]
struct SlotUpdateRequest {
    #[validate(length(max = 100))]
    name: Option<String>,
    data_type: Option<DataType>,
}

#[derive(Debug, Deserialize)]
struct TemplateRequest {
    template: Template,
}

#[derive(Debug, Deserialize, Validate)]
struct EditRequest {
    #[validate(length(min = 1))]
    key: String,
}

/// Open a session and generate a key for a new leaderboard.
async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let id = state.sessions.create();
    let session = state.sessions.update(id, |session| {
        state.schema_service.create_schema(session);
        Ok(session.clone())
    })?;

    tracing::info!(session_id = %id, key = ?session.key, "Editor session opened");
    Ok((StatusCode::CREATED, Json(SessionResponse::new(id, session))))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let session = state.sessions.get(id)?;
    Ok(Json(SessionResponse::new(id, session)))
}

/// Leave the editor.
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if !state.sessions.remove(id) {
        return Err(AppError::NotFound(format!("Session {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Close the column editor, keeping the key and mode.
async fn exit_editor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let session = state.sessions.update(id, |session| {
        session.exit();
        Ok(session.clone())
    })?;
    Ok(Json(SessionResponse::new(id, session)))
}

/// Start over with a fresh key.
async fn new_key(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let session = state.sessions.update(id, |session| {
        state.schema_service.create_schema(session);
        Ok(session.clone())
    })?;
    Ok(Json(SessionResponse::new(id, session)))
}

async fn set_column_count(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ColumnCountRequest>,
) -> Result<Json<SessionResponse>> {
    payload.validate()?;
    let count = usize::try_from(payload.count)
        .map_err(|_| AppError::Validation(format!("Invalid column count {}", payload.count)))?;

    let session = state.sessions.update(id, |session| {
        state.schema_service.set_column_count(session, count)?;
        Ok(session.clone())
    })?;
    Ok(Json(SessionResponse::new(id, session)))
}

async fn update_slot(
    State(state): State<Arc<AppState>>,
    Path((id, slot)): Path<(Uuid, u32)>,
    Json(payload): Json<SlotUpdateRequest>,
) -> Result<Json<ColumnSlot>> {
    payload.validate()?;

    let slot = state.sessions.update(id, |session| {
        session
            .update_slot(SlotId(slot), payload.name, payload.data_type)
            .cloned()
    })?;
    Ok(Json(slot))
}

/// Preview the schema document that publishing would write.
async fn get_configuration(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaderboardSchema>> {
    let session = state.sessions.get(id)?;
    let schema = state.schema_service.generate_configuration(&session)?;
    Ok(Json(schema))
}

/// Write the session's schema and return the resulting table.
async fn publish(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublishResponse>> {
    let session = state.sessions.get(id)?;
    publish_session(&state, &session).await.map(Json)
}

/// Fill the editor from a template and publish it as a new leaderboard.
async fn use_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TemplateRequest>,
) -> Result<Json<PublishResponse>> {
    let session = state.sessions.update(id, |session| {
        apply_template(&state.schema_service, session, payload.template)?;
        Ok(session.clone())
    })?;

    publish_session(&state, &session).await.map(Json)
}

/// Load an existing leaderboard into the session for editing.
async fn begin_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditRequest>,
) -> Result<Json<EditResponse>> {
    payload.validate()?;

    let mut session = state.sessions.get(id)?;
    let doc = state
        .schema_service
        .begin_edit(&mut session, payload.key.trim())
        .await?;
    state.sessions.put(id, session.clone())?;

    Ok(Json(EditResponse {
        session: SessionResponse::new(id, session),
        table: LeaderboardTable::from_document(&doc),
    }))
}

async fn publish_session(state: &AppState, session: &EditorSession) -> Result<PublishResponse> {
    let schema = state.schema_service.generate_configuration(session)?;
    state
        .schema_service
        .publish_schema(&schema, session.mode)
        .await?;
    let table = state.record_service.refresh_table(&schema.key).await?;

    Ok(PublishResponse { schema, table })
}
