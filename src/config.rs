// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

/// Default Realtime Database the leaderboards live in.
pub const DEFAULT_DATABASE_URL: &str = "https://customizable-leaderboard-default-rtdb.firebaseio.com";

/// What happens to a leaderboard's existing entries when its schema is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPolicy {
    /// Merge only the schema fields, leaving `entries` in place.
    #[default]
    PreserveEntries,
    /// Overwrite the whole document; previously submitted entries are lost.
    Replace,
}

impl FromStr for EditPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "preserve-entries" => Ok(EditPolicy::PreserveEntries),
            "replace" => Ok(EditPolicy::Replace),
            other => Err(ConfigError::Invalid("EDIT_POLICY", other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Realtime Database base URL, without a trailing slash
    pub database_url: String,
    /// Optional `auth` query parameter (database secret or ID token)
    pub database_auth: Option<String>,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Behavior of schema edits on existing entries
    pub edit_policy: EditPolicy,
}

impl Config {
    /// Config for tests: points at a local store that is never contacted.
    pub fn test_default() -> Self {
        Self {
            database_url: "http://127.0.0.1:9000".to_string(),
            database_auth: None,
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            edit_policy: EditPolicy::PreserveEntries,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let database_url = env::var("FIREBASE_DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if database_url.is_empty() {
            return Err(ConfigError::Invalid(
                "FIREBASE_DATABASE_URL",
                "empty".to_string(),
            ));
        }

        let edit_policy = match env::var("EDIT_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => EditPolicy::default(),
        };

        Ok(Self {
            database_url,
            database_auth: env::var("FIREBASE_AUTH_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            edit_policy,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
