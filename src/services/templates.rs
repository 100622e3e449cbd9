// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Template selector: predefined schemas that pre-fill the column editor.
//!
//! Catalog labels use the `Name(X)` notation, where the three-character
//! suffix names the data type: `(S)`, `(I)`, `(F)` or `(B)`.

use crate::error::AppError;
use crate::models::{ColumnInfo, DataType, EditorSession};
use crate::services::schema::SchemaService;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Length of the `(X)` type suffix on a label.
const SUFFIX_LEN: usize = 3;

/// The predefined templates, named by column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Template {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Template {
    pub const ALL: [Template; 5] = [
        Template::One,
        Template::Two,
        Template::Three,
        Template::Four,
        Template::Five,
    ];

    /// Catalog labels for this template, in column order.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            Template::One => &["Name(S)"],
            Template::Two => &["Name(S)", "Score(I)"],
            Template::Three => &["Name(S)", "Score(I)", "Time(F)"],
            Template::Four => &["Name(S)", "Score(I)", "Time(F)", "Completed(B)"],
            Template::Five => &[
                "Name(S)",
                "Level(I)",
                "Score(I)",
                "Accuracy(F)",
                "Completed(B)",
            ],
        }
    }

    /// Parsed columns for this template.
    ///
    /// The catalog is fixed, so a label that fails to parse is a bug here
    /// rather than bad input.
    pub fn columns(&self) -> Result<Vec<ColumnInfo>, AppError> {
        catalog_columns(&format!("{:?}", self), self.labels())
    }
}

fn catalog_columns(template: &str, labels: &[&str]) -> Result<Vec<ColumnInfo>, AppError> {
    labels
        .iter()
        .map(|label| parse_label(label))
        .collect::<Result<_, _>>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Template {} is malformed: {}", template, e)))
}

/// Split a `Name(X)` label into a column.
pub fn parse_label(label: &str) -> Result<ColumnInfo, AppError> {
    let split = label
        .len()
        .checked_sub(SUFFIX_LEN)
        .filter(|&at| label.is_char_boundary(at))
        .ok_or_else(|| AppError::Validation(format!("Template label too short: {:?}", label)))?;

    let (name, suffix) = label.split_at(split);
    let data_type = DataType::from_suffix(suffix).ok_or_else(|| {
        AppError::Validation(format!("Unknown type suffix {:?} in label {:?}", suffix, label))
    })?;

    Ok(ColumnInfo::new(name, data_type))
}

/// A catalog entry, for listing.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TemplateSummary {
    pub template: Template,
    pub columns: Vec<ColumnInfo>,
}

/// All templates with their columns.
pub fn catalog() -> Result<Vec<TemplateSummary>, AppError> {
    Template::ALL
        .iter()
        .map(|&template| {
            Ok(TemplateSummary {
                template,
                columns: template.columns()?,
            })
        })
        .collect()
}

/// Start a new leaderboard in `session` with the template's columns filled in.
///
/// Returns the new key. Publishing is left to the caller.
pub fn apply_template(
    schemas: &SchemaService,
    session: &mut EditorSession,
    template: Template,
) -> Result<String, AppError> {
    let columns = template.columns()?;

    let key = schemas.create_schema(session);
    schemas.set_column_count(session, columns.len())?;

    let ids: Vec<_> = session.slots.iter().map(|s| s.id).collect();
    for (id, column) in ids.into_iter().zip(columns) {
        tracing::debug!(column = %column.name, data_type = %column.data_type, "Template column");
        session.update_slot(id, Some(column.name), Some(column.data_type))?;
    }

    tracing::info!(key = %key, template = ?template, "Template applied");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditPolicy;
    use crate::db::RealtimeDb;

    #[test]
    fn test_parse_label() {
        assert_eq!(
            parse_label("Score(I)").unwrap(),
            ColumnInfo::new("Score", DataType::Int)
        );
        assert_eq!(
            parse_label("Completed(B)").unwrap(),
            ColumnInfo::new("Completed", DataType::Bool)
        );
        assert_eq!(parse_label("(F)").unwrap(), ColumnInfo::new("", DataType::Float));
    }

    #[test]
    fn test_parse_label_errors() {
        assert!(parse_label("Score").is_err());
        assert!(parse_label("Score(Z)").is_err());
        assert!(parse_label("I)").is_err());
        assert!(parse_label("Naïve").is_err());
    }

    #[test]
    fn test_malformed_catalog_is_internal() {
        let result = catalog_columns("Broken", &["Name(S)", "Score"]);
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_template_sizes_match_names() {
        for (n, template) in Template::ALL.iter().enumerate() {
            assert_eq!(template.columns().unwrap().len(), n + 1);
        }
    }

    #[test]
    fn test_catalog_lists_every_template() {
        let catalog = catalog().unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(
            catalog[1].columns,
            vec![
                ColumnInfo::new("Name", DataType::String),
                ColumnInfo::new("Score", DataType::Int),
            ]
        );
    }

    #[test]
    fn test_template_serde_names() {
        assert_eq!(serde_json::to_string(&Template::Three).unwrap(), "\"THREE\"");
        let parsed: Template = serde_json::from_str("\"FIVE\"").unwrap();
        assert_eq!(parsed, Template::Five);
    }

    #[test]
    fn test_apply_template_fills_session() {
        let schemas = SchemaService::new(RealtimeDb::new_mock(), EditPolicy::PreserveEntries);
        let mut session = EditorSession::new();
        session.set_column_count(5).unwrap();

        let key = apply_template(&schemas, &mut session, Template::Two).unwrap();

        assert_eq!(session.key.as_deref(), Some(key.as_str()));
        assert_eq!(session.columns(), Template::Two.columns().unwrap());

        let schema = schemas.generate_configuration(&session).unwrap();
        assert_eq!(schema.number_of_columns, 2);
    }
}
