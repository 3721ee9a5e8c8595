// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the pipeline, storage backends, and gateway.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Classification category assigned to a post.
///
/// The string forms ("Social Media", "Email Action", ...) are the canonical
/// values stored in the `posts` table and exposed over the REST surface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Category {
    Urgent,
    #[strum(serialize = "Social Media")]
    #[serde(rename = "Social Media")]
    SocialMedia,
    #[strum(serialize = "Email Action")]
    #[serde(rename = "Email Action")]
    EmailAction,
    Volunteer,
    Events,
    General,
}

/// Action type assigned to a post, independent of its category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    TechnicalSupport,
    SocialShare,
    EmailResponse,
    VolunteerRequest,
    EventCoordination,
    General,
}

/// Workflow status of a post. Status never regresses from `Completed`
/// back to `New` through this pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    New,
    Completed,
}

/// A classified, persisted record derived from one inbound message or a
/// manually created action item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned identifier; never client-chosen.
    pub id: i64,
    pub title: String,
    pub content: String,
    pub sender: String,
    pub recipient: String,
    pub category: Category,
    pub action_type: ActionType,
    pub status: PostStatus,
    /// Source message id (RFC 5322 Message-ID) when ingested from mail.
    /// Unique where present; the pipeline's idempotency key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// RFC 3339 timestamp set at ingestion time.
    pub created_at: String,
}

/// Fields for a post about to be inserted. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub sender: String,
    pub recipient: String,
    pub category: Category,
    pub action_type: ActionType,
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub created_at: String,
}

/// A comment attached to a post. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: String,
    pub content: String,
    pub created_at: String,
}

/// Optional filters for listing posts. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub category: Option<Category>,
    pub status: Option<PostStatus>,
}

/// Sort orders for post listings.
///
/// `Priority` orders Urgent-category posts first, then newest-created
/// within and across the remaining categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Priority,
}

/// Number of posts in one category, for dashboard badges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}
