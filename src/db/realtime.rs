// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Realtime Database REST client with typed leaderboard operations.
//!
//! Every location in the tree is addressed as `{base}/{path}.json`:
//! - GET reads a subtree (`null` when absent), optionally filtered with
//!   `orderBy`/`equalTo`
//! - PUT replaces a subtree
//! - PATCH merges the named children into a subtree
//! - POST appends a child under a generated push id

use crate::config::Config;
use crate::db::paths;
use crate::error::AppError;
use crate::models::leaderboard::validate_key;
use crate::models::{ColumnInfo, LeaderboardDocument, LeaderboardRecord, LeaderboardSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Namespace the emulator serves when none is configured.
const DEFAULT_EMULATOR_NAMESPACE: &str = "customizable-leaderboard-default-rtdb";

/// Realtime Database client.
#[derive(Clone)]
pub struct RealtimeDb {
    client: Option<RestClient>,
}

#[derive(Clone)]
struct RestClient {
    http: reqwest::Client,
    base_url: String,
    /// Extra query parameters sent with every request (`auth`, `ns`)
    params: Vec<(&'static str, String)>,
}

/// Body of a successful POST.
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

impl RealtimeDb {
    /// Create a client for the database in `config`.
    ///
    /// For local development with the emulator, set
    /// FIREBASE_DATABASE_EMULATOR_HOST (and optionally
    /// FIREBASE_DATABASE_NAMESPACE).
    pub fn new(config: &Config) -> Self {
        if let Ok(host) = std::env::var("FIREBASE_DATABASE_EMULATOR_HOST") {
            let namespace = std::env::var("FIREBASE_DATABASE_NAMESPACE")
                .unwrap_or_else(|_| DEFAULT_EMULATOR_NAMESPACE.to_string());
            tracing::info!(host = %host, namespace = %namespace, "Using Realtime Database emulator");
            return Self::with_params(format!("http://{}", host), vec![("ns", namespace)]);
        }

        tracing::info!(url = %config.database_url, "Using Realtime Database");
        Self::with_auth(config.database_url.clone(), config.database_auth.clone())
    }

    /// Create a client for an arbitrary base URL with no extra parameters.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_params(base_url.into(), Vec::new())
    }

    /// Create a client that sends `auth` as the `auth` query parameter on
    /// every request.
    pub fn with_auth(base_url: impl Into<String>, auth: Option<String>) -> Self {
        let params = auth.map(|token| ("auth", token)).into_iter().collect();
        Self::with_params(base_url.into(), params)
    }

    fn with_params(base_url: String, params: Vec<(&'static str, String)>) -> Self {
        Self {
            client: Some(RestClient {
                http: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                params,
            }),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&RestClient, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Leaderboard Operations ──────────────────────────────────

    /// Read the whole leaderboard document.
    pub async fn get_leaderboard(&self, key: &str) -> Result<Option<LeaderboardDocument>, AppError> {
        validate_key(key)?;
        self.get_client()?
            .get(&[paths::LEADERBOARDS, key])
            .await
    }

    /// Find a leaderboard by its `key` child.
    pub async fn find_leaderboard(&self, key: &str) -> Result<Option<LeaderboardDocument>, AppError> {
        validate_key(key)?;
        let matches: BTreeMap<String, LeaderboardDocument> = self
            .get_client()?
            .query_equal_to(&[paths::LEADERBOARDS], paths::KEY_FIELD, key)
            .await?;

        tracing::debug!(key, matches = matches.len(), "Leaderboard search finished");
        Ok(matches.into_values().next())
    }

    /// Replace the whole document with `schema`, dropping any entries.
    pub async fn put_leaderboard_schema(&self, schema: &LeaderboardSchema) -> Result<(), AppError> {
        validate_key(&schema.key)?;
        self.get_client()?
            .put(&[paths::LEADERBOARDS, schema.key.as_str()], schema)
            .await
    }

    /// Overwrite the schema fields of the document, leaving entries alone.
    pub async fn update_leaderboard_schema(
        &self,
        schema: &LeaderboardSchema,
    ) -> Result<(), AppError> {
        validate_key(&schema.key)?;
        self.get_client()?
            .patch(&[paths::LEADERBOARDS, schema.key.as_str()], schema)
            .await
    }

    /// Read the ordered column list of a leaderboard.
    pub async fn get_columns(&self, key: &str) -> Result<Option<Vec<ColumnInfo>>, AppError> {
        validate_key(key)?;
        self.get_client()?
            .get(&[paths::LEADERBOARDS, key, paths::COLUMNS])
            .await
    }

    /// Append a record to a leaderboard's entries, returning its push id.
    pub async fn push_entry(&self, key: &str, record: &LeaderboardRecord) -> Result<String, AppError> {
        validate_key(key)?;
        self.get_client()?
            .post(&[paths::LEADERBOARDS, key, paths::ENTRIES], record)
            .await
    }
}

impl RestClient {
    /// `{base}/{seg}/{seg}.json` with every segment percent-encoded.
    fn url(&self, segments: &[&str]) -> String {
        let path = segments
            .iter()
            .map(|s| urlencoding::encode(s).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}.json", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, segments: &[&str]) -> reqwest::RequestBuilder {
        let url = self.url(segments);
        tracing::debug!(method = %method, url = %url, "Realtime Database request");
        self.http.request(method, url).query(&self.params)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Option<T>, AppError> {
        let response = self
            .request(reqwest::Method::GET, segments)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let value: serde_json::Value = check_response_json(response).await?;
        if value.is_null() {
            return Ok(None);
        }

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| AppError::Parse(format!("{}: {}", segments.join("/"), e)))
    }

    async fn query_equal_to<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        order_by: &str,
        equal_to: &str,
    ) -> Result<BTreeMap<String, T>, AppError> {
        // Both filter values are JSON literals, so strings go in quoted.
        let order_by = serde_json::Value::from(order_by).to_string();
        let equal_to = serde_json::Value::from(equal_to).to_string();

        let response = self
            .request(reqwest::Method::GET, segments)
            .query(&[("orderBy", order_by), ("equalTo", equal_to)])
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let value: serde_json::Value = check_response_json(response).await?;
        if value.is_null() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::Parse(format!("{} query: {}", segments.join("/"), e)))
    }

    async fn put<T: Serialize + ?Sized>(&self, segments: &[&str], body: &T) -> Result<(), AppError> {
        let response = self
            .request(reqwest::Method::PUT, segments)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        check_response(response).await
    }

    async fn patch<T: Serialize + ?Sized>(&self, segments: &[&str], body: &T) -> Result<(), AppError> {
        let response = self
            .request(reqwest::Method::PATCH, segments)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        check_response(response).await
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &T,
    ) -> Result<String, AppError> {
        let response = self
            .request(reqwest::Method::POST, segments)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let pushed: PushResponse = check_response_json(response).await?;
        Ok(pushed.name)
    }
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<(), AppError> {
    if response.status().is_success() {
        return Ok(());
    }

    Err(response_error(response).await)
}

/// Check response and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    if !response.status().is_success() {
        return Err(response_error(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Parse(format!("JSON parse error: {}", e)))
}

async fn response_error(response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = %status, body = %body, "Realtime Database request failed");
    AppError::Transport(format!("HTTP {}: {}", status, body))
}
