// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod leaderboard;
pub mod session;
pub mod table;

pub use leaderboard::{
    ColumnInfo, DataType, LeaderboardDocument, LeaderboardRecord, LeaderboardSchema,
};
pub use session::{ColumnSlot, EditorMode, EditorSession, SlotId};
pub use table::{LeaderboardTable, TableRow};
