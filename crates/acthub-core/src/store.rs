// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Persistence Gateway seam.
//!
//! Two interchangeable implementations exist: `acthub-storage` (direct
//! SQLite) and `acthub-rest` (PostgREST-style data API). The ingestion
//! pipeline and the dashboard gateway are agnostic to which is wired in.

use async_trait::async_trait;

use crate::error::HubError;
use crate::types::{CategoryCount, Comment, NewPost, Post, PostFilter, PostStatus, SortOrder};

/// Outcome of [`PostStore::insert_post`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inserted {
    /// A new row was created.
    Created(i64),
    /// A row with the same `source_id` already existed; no row was created.
    Existing(i64),
}

impl Inserted {
    /// The id of the row, whether freshly created or pre-existing.
    pub fn id(self) -> i64 {
        match self {
            Inserted::Created(id) | Inserted::Existing(id) => id,
        }
    }
}

/// Storage abstraction for posts and comments.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a post and return its server-assigned id.
    ///
    /// Idempotent on `source_id`: inserting a post whose `source_id` already
    /// exists returns [`Inserted::Existing`] with the prior row's id instead
    /// of creating a duplicate. Posts without a `source_id` (manual dashboard
    /// inserts, diagnostic posts) are never deduplicated.
    async fn insert_post(&self, post: &NewPost) -> Result<Inserted, HubError>;

    /// Fetch one post by id.
    async fn get_post(&self, id: i64) -> Result<Option<Post>, HubError>;

    /// List posts matching `filter`, ordered by `sort`.
    async fn list_posts(
        &self,
        filter: &PostFilter,
        sort: SortOrder,
    ) -> Result<Vec<Post>, HubError>;

    /// Update a post's status. Fails with [`HubError::NotFound`] when no
    /// row matches.
    async fn update_status(&self, id: i64, status: PostStatus) -> Result<(), HubError>;

    /// Append a comment to a post and return the comment id.
    async fn insert_comment(
        &self,
        post_id: i64,
        user_id: &str,
        content: &str,
    ) -> Result<i64, HubError>;

    /// List a post's comments, oldest first.
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, HubError>;

    /// Post counts per category, for dashboard badges.
    async fn category_counts(&self) -> Result<Vec<CategoryCount>, HubError>;
}
