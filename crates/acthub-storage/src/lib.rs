// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence backend.
//!
//! Stores posts and comments in a single WAL-mode database file, with the
//! schema managed by embedded refinery migrations. All access is funneled
//! through one tokio-rusqlite connection.

mod adapter;
mod database;
mod migrations;
mod queries;

pub use adapter::SqlitePostStore;
pub use database::Database;
