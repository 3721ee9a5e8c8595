// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP dashboard API for the Campaign Action Hub.
//!
//! Serves the post list, detail, completion, comment, and stats endpoints
//! the dashboard consumes, backed by whichever [`acthub_core::PostStore`]
//! the binary wires in. `/health` is public; everything under `/v1` is
//! guarded by a bearer token.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use server::{GatewayState, ServerConfig, build_router, start_server};
