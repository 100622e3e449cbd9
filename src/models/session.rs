// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Editor session: the state of one user building or editing a schema.

use crate::error::AppError;
use crate::models::leaderboard::{check_column_count, ColumnInfo, DataType};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Whether publishing creates a new leaderboard or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    #[default]
    Creation,
    Edit,
}

/// Stable identity of a column editor slot.
///
/// Ids are handed out in increasing order and never reused within a
/// session, so an id from a stale view can never address the wrong slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(transparent)]
pub struct SlotId(pub u32);

/// One column being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ColumnSlot {
    pub id: SlotId,
    pub name: String,
    pub data_type: DataType,
}

impl ColumnSlot {
    pub fn column(&self) -> ColumnInfo {
        ColumnInfo::new(self.name.clone(), self.data_type)
    }
}

/// Everything the schema editor knows about the leaderboard in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    /// Key of the leaderboard being created or edited
    pub key: Option<String>,
    pub mode: EditorMode,
    /// Column slots, in column order
    pub slots: Vec<ColumnSlot>,
    next_slot_id: u32,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new leaderboard under `key`.
    pub fn start_creation(&mut self, key: String) {
        self.key = Some(key);
        self.mode = EditorMode::Creation;
        self.slots.clear();
    }

    /// Switch to editing the existing leaderboard `key`, loading its columns.
    pub fn start_edit(&mut self, key: String, columns: &[ColumnInfo]) {
        self.key = Some(key);
        self.mode = EditorMode::Edit;
        self.slots.clear();
        for column in columns {
            let id = self.allocate_slot_id();
            self.slots.push(ColumnSlot {
                id,
                name: column.name.clone(),
                data_type: column.data_type,
            });
        }
    }

    /// Replace the slots with `count` empty ones.
    ///
    /// Fails without touching the current slots when `count` is out of range.
    pub fn set_column_count(&mut self, count: usize) -> Result<&[ColumnSlot], AppError> {
        check_column_count(count)?;

        self.slots.clear();
        for _ in 0..count {
            let id = self.allocate_slot_id();
            self.slots.push(ColumnSlot {
                id,
                name: String::new(),
                data_type: DataType::default(),
            });
        }

        Ok(&self.slots)
    }

    /// Edit the slot with the given id.
    pub fn update_slot(
        &mut self,
        id: SlotId,
        name: Option<String>,
        data_type: Option<DataType>,
    ) -> Result<&ColumnSlot, AppError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Column slot {} not found", id.0)))?;

        if let Some(name) = name {
            slot.name = name;
        }
        if let Some(data_type) = data_type {
            slot.data_type = data_type;
        }

        Ok(&*slot)
    }

    /// Columns as currently entered, in slot order.
    pub fn columns(&self) -> Vec<ColumnInfo> {
        self.slots.iter().map(ColumnSlot::column).collect()
    }

    /// Drop all slots, keeping key and mode.
    pub fn exit(&mut self) {
        self.slots.clear();
    }

    fn allocate_slot_id(&mut self) -> SlotId {
        let id = SlotId(self.next_slot_id);
        self.next_slot_id += 1;
        id
    }
}
