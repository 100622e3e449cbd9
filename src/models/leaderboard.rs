// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard schema, record and document models.
//!
//! These mirror the JSON tree stored under `leaderboards/{key}` in the
//! Realtime Database:
//!
//! ```json
//! {
//!   "key": "5f0c...",
//!   "numberOfColumns": 2,
//!   "columns": [{"name": "Name", "dataType": "String"}, ...],
//!   "entries": {"-Nx...": {"Name": "Alice", "Score": "42"}}
//! }
//! ```

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Smallest number of columns a leaderboard may have.
pub const MIN_COLUMNS: usize = 1;
/// Largest number of columns a leaderboard may have.
pub const MAX_COLUMNS: usize = 5;

/// Characters the Realtime Database refuses in a key.
const FORBIDDEN_KEY_CHARS: &[char] = &['.', '$', '#', '[', ']', '/'];

/// Declared type of a column.
///
/// Declared only: record values are always stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DataType {
    #[default]
    String,
    Int,
    Float,
    Bool,
}

impl DataType {
    /// Map a template label suffix such as `(I)` to its data type.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "(S)" => Some(DataType::String),
            "(I)" => Some(DataType::Int),
            "(F)" => Some(DataType::Float),
            "(B)" => Some(DataType::Bool),
            _ => None,
        }
    }

    /// The name written to the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::Int => "Int",
            DataType::Float => "Float",
            DataType::Bool => "Bool",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A leaderboard's schema: its key plus ordered columns.
///
/// Column order matters: it is the order in which record values are
/// matched to column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSchema {
    pub key: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub number_of_columns: usize,
    pub columns: Vec<ColumnInfo>,
}

impl LeaderboardSchema {
    pub fn new(key: impl Into<String>, columns: Vec<ColumnInfo>) -> Self {
        Self {
            key: key.into(),
            number_of_columns: columns.len(),
            columns,
        }
    }
}

/// One stored row: column name to value.
///
/// Rows written here always hold text, but other clients may store any JSON
/// value, so the raw value is kept and only turned into text for display.
pub type LeaderboardRecord = BTreeMap<String, Value>;

/// The full document stored at `leaderboards/{key}`.
///
/// The store drops empty children, so `columns` and `entries` may be
/// missing from a fetched document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardDocument {
    pub key: String,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub number_of_columns: usize,
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
    #[serde(default)]
    pub entries: BTreeMap<String, LeaderboardRecord>,
}

impl LeaderboardDocument {
    /// The schema part of this document.
    pub fn schema(&self) -> LeaderboardSchema {
        LeaderboardSchema::new(self.key.clone(), self.columns.clone())
    }
}

/// Check that a leaderboard may have `count` columns.
pub fn check_column_count(count: usize) -> Result<(), AppError> {
    if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&count) {
        return Err(AppError::Validation(format!(
            "Number of columns must be between {} and {}, got {}",
            MIN_COLUMNS, MAX_COLUMNS, count
        )));
    }
    Ok(())
}

/// Check that `key` can be used as a single path segment in the store.
pub fn validate_key(key: &str) -> Result<(), AppError> {
    if key.trim().is_empty() {
        return Err(AppError::Validation(
            "Leaderboard key must not be empty".to_string(),
        ));
    }

    if key
        .chars()
        .any(|c| FORBIDDEN_KEY_CHARS.contains(&c) || c.is_ascii_control())
    {
        return Err(AppError::Validation(format!(
            "Leaderboard key contains a forbidden character: {:?}",
            key
        )));
    }

    Ok(())
}
