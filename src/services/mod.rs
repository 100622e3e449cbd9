// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod records;
pub mod schema;
pub mod sessions;
pub mod templates;

pub use records::RecordService;
pub use schema::SchemaService;
pub use sessions::SessionStore;
pub use templates::Template;
