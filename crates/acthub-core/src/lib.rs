// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Campaign Action Hub.
//!
//! Provides the shared error type, the post/comment domain model, and the
//! [`PostStore`] trait that decouples the ingestion pipeline and dashboard
//! gateway from the concrete storage backend.

pub mod error;
pub mod store;
pub mod types;

pub use error::HubError;
pub use store::{Inserted, PostStore};
pub use types::{
    ActionType, Category, CategoryCount, Comment, NewPost, Post, PostFilter, PostStatus,
    SortOrder,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_error_has_all_variants() {
        let _config = HubError::Config("test".into());
        let _conn = HubError::Connection {
            message: "test".into(),
            source: None,
        };
        let _extract = HubError::Extraction {
            message: "test".into(),
        };
        let _persist = HubError::Persistence {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _archive = HubError::Archival {
            message: "test".into(),
        };
        let _not_found = HubError::NotFound { id: 42 };
        let _internal = HubError::Internal("test".into());
    }

    #[test]
    fn error_stage_labels() {
        assert_eq!(
            HubError::Connection {
                message: "x".into(),
                source: None
            }
            .stage(),
            "connect"
        );
        assert_eq!(
            HubError::Archival { message: "x".into() }.stage(),
            "archive"
        );
        assert_eq!(HubError::NotFound { id: 1 }.stage(), "lookup");
    }

    #[test]
    fn not_found_message_includes_id() {
        let err = HubError::NotFound { id: 7 };
        assert_eq!(err.to_string(), "post not found: 7");
    }
}
