// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hosted REST persistence backend.
//!
//! Implements [`PostStore`] against a PostgREST-style data API (the shape
//! exposed by Supabase): rows live under `/rest/v1/{table}`, filters are
//! `column=eq.value` query parameters, and writes ask for the created
//! representation back via the `Prefer` header.

mod client;

pub use client::RestPostStore;
