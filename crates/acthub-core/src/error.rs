// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Campaign Action Hub.

use thiserror::Error;

/// The primary error type used across the ingestion pipeline, the storage
/// backends, and the dashboard gateway.
///
/// Variants follow the pipeline's failure taxonomy: only `Connection` is
/// fatal to an ingestion run; `Extraction`, `Persistence`, and `Archival`
/// are caught at the per-message boundary.
#[derive(Debug, Error)]
pub enum HubError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Mailbox unreachable or authentication rejected. Fatal to the run;
    /// carries the underlying transport error text for diagnostics.
    #[error("mailbox connection error: {message}")]
    Connection {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed or undecodable message structure. The message is skipped,
    /// the run continues.
    #[error("message extraction error: {message}")]
    Extraction { message: String },

    /// Downstream storage unreachable or rejected the write. The message is
    /// left unarchived so the next run retries it.
    #[error("persistence error: {message}")]
    Persistence {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Flag/move failed after successful persistence. Known duplicate-risk
    /// window; deduplicated by `source_id` on the next run.
    #[error("archival error: {message}")]
    Archival { message: String },

    /// No post matches the given id.
    #[error("post not found: {id}")]
    NotFound { id: i64 },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HubError {
    /// Short stage label for structured log fields.
    pub fn stage(&self) -> &'static str {
        match self {
            HubError::Config(_) => "config",
            HubError::Connection { .. } => "connect",
            HubError::Extraction { .. } => "extract",
            HubError::Persistence { .. } => "persist",
            HubError::Archival { .. } => "archive",
            HubError::NotFound { .. } => "lookup",
            HubError::Internal(_) => "internal",
        }
    }
}
