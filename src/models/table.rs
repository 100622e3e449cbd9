// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rendered leaderboard table.

use crate::models::leaderboard::LeaderboardDocument;
use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A leaderboard laid out for display: headers in column order and one row
/// per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardTable {
    pub key: String,
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// One entry of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TableRow {
    /// Store-generated entry id
    pub id: String,
    pub cells: Vec<String>,
}

impl LeaderboardTable {
    /// Render a fetched document.
    ///
    /// Rows follow entry id order, which for push ids is submission order.
    /// Cells follow the schema's column order; a field missing from a record
    /// renders as an empty cell and fields not in the schema are dropped.
    /// Values that are not text render as their JSON form.
    pub fn from_document(doc: &LeaderboardDocument) -> Self {
        let headers: Vec<String> = doc.columns.iter().map(|c| c.name.clone()).collect();

        let rows = doc
            .entries
            .iter()
            .map(|(id, record)| TableRow {
                id: id.clone(),
                cells: headers
                    .iter()
                    .map(|h| record.get(h).map(cell_text).unwrap_or_default())
                    .collect(),
            })
            .collect();

        Self {
            key: doc.key.clone(),
            headers,
            rows,
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
