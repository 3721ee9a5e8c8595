// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`PostStore`] trait.

use async_trait::async_trait;
use tracing::debug;

use acthub_config::model::StorageConfig;
use acthub_core::{
    CategoryCount, Comment, HubError, Inserted, NewPost, Post, PostFilter, PostStatus,
    PostStore, SortOrder,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed post store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules.
pub struct SqlitePostStore {
    db: Database,
}

impl SqlitePostStore {
    /// Open the database named by `config`, running migrations as needed.
    pub async fn open(config: &StorageConfig) -> Result<Self, HubError> {
        let db = Database::open(&config.database_path).await?;
        debug!(path = %config.database_path, "SQLite post store ready");
        Ok(Self { db })
    }

    /// Checkpoint the WAL. Call before process exit.
    pub async fn close(&self) -> Result<(), HubError> {
        self.db.checkpoint().await
    }
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn insert_post(&self, post: &NewPost) -> Result<Inserted, HubError> {
        queries::posts::insert_post(&self.db, post).await
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, HubError> {
        queries::posts::get_post(&self.db, id).await
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        sort: SortOrder,
    ) -> Result<Vec<Post>, HubError> {
        queries::posts::list_posts(&self.db, filter, sort).await
    }

    async fn update_status(&self, id: i64, status: PostStatus) -> Result<(), HubError> {
        queries::posts::update_status(&self.db, id, status).await
    }

    async fn insert_comment(
        &self,
        post_id: i64,
        user_id: &str,
        content: &str,
    ) -> Result<i64, HubError> {
        queries::comments::insert_comment(&self.db, post_id, user_id, content).await
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, HubError> {
        queries::comments::list_comments(&self.db, post_id).await
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>, HubError> {
        queries::posts::category_counts(&self.db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use acthub_core::{ActionType, Category};
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            backend: "sqlite".to_string(),
            database_path: path.to_string(),
        }
    }

    fn sample_post(title: &str, category: Category, created_at: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "body".to_string(),
            sender: "sender@example.org".to_string(),
            recipient: "hub@example.org".to_string(),
            category,
            action_type: ActionType::General,
            status: PostStatus::New,
            source_id: None,
            created_at: created_at.to_string(),
        }
    }

    async fn open_store(dir: &tempfile::TempDir) -> SqlitePostStore {
        let path = dir.path().join("hub.db");
        SqlitePostStore::open(&make_config(path.to_str().unwrap()))
            .await
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn insert_and_get_round_trip() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        let inserted = store
            .insert_post(&sample_post("hello", Category::General, "2026-02-01T10:00:00Z"))
            .await
            .unwrap();
        let Inserted::Created(id) = inserted else {
            panic!("expected a fresh row, got {inserted:?}");
        };

        let post = store.get_post(id).await.unwrap().unwrap();
        assert_eq!(post.title, "hello");
        assert_eq!(post.category, Category::General);
        assert_eq!(post.status, PostStatus::New);
        assert!(store.get_post(id + 100).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn source_id_collision_returns_existing_row() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        let mut post = sample_post("first", Category::Urgent, "2026-02-01T10:00:00Z");
        post.source_id = Some("msg-1@example.org".to_string());
        let first = store.insert_post(&post).await.unwrap();

        post.title = "second fetch of the same mail".to_string();
        let second = store.insert_post(&post).await.unwrap();
        assert_eq!(second, Inserted::Existing(first.id()));

        // the original row is untouched
        let stored = store.get_post(first.id()).await.unwrap().unwrap();
        assert_eq!(stored.title, "first");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn posts_without_source_id_are_never_deduplicated() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        let post = sample_post("manual", Category::General, "2026-02-01T10:00:00Z");
        let a = store.insert_post(&post).await.unwrap();
        let b = store.insert_post(&post).await.unwrap();
        assert!(matches!(a, Inserted::Created(_)));
        assert!(matches!(b, Inserted::Created(_)));
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn list_respects_filters_and_priority_sort() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .insert_post(&sample_post("old general", Category::General, "2026-02-01T08:00:00Z"))
            .await
            .unwrap();
        let urgent = store
            .insert_post(&sample_post("urgent", Category::Urgent, "2026-02-01T09:00:00Z"))
            .await
            .unwrap();
        store
            .insert_post(&sample_post("new general", Category::General, "2026-02-01T10:00:00Z"))
            .await
            .unwrap();
        store.update_status(urgent.id(), PostStatus::Completed).await.unwrap();

        let newest = store
            .list_posts(&PostFilter::default(), SortOrder::Newest)
            .await
            .unwrap();
        assert_eq!(
            newest.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            ["new general", "urgent", "old general"]
        );

        let priority = store
            .list_posts(&PostFilter::default(), SortOrder::Priority)
            .await
            .unwrap();
        assert_eq!(priority[0].title, "urgent");

        let completed_only = store
            .list_posts(
                &PostFilter {
                    category: None,
                    status: Some(PostStatus::Completed),
                },
                SortOrder::Newest,
            )
            .await
            .unwrap();
        assert_eq!(completed_only.len(), 1);
        assert_eq!(completed_only[0].title, "urgent");

        let general = store
            .list_posts(
                &PostFilter {
                    category: Some(Category::General),
                    status: None,
                },
                SortOrder::Oldest,
            )
            .await
            .unwrap();
        assert_eq!(
            general.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            ["old general", "new general"]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn update_status_missing_post_is_not_found() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        let err = store.update_status(999, PostStatus::Completed).await.unwrap_err();
        assert!(matches!(err, HubError::NotFound { id: 999 }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn comments_append_and_list_in_order() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        let post = store
            .insert_post(&sample_post("discussed", Category::Events, "2026-02-01T10:00:00Z"))
            .await
            .unwrap();

        store.insert_comment(post.id(), "alice", "first").await.unwrap();
        store.insert_comment(post.id(), "bob", "second").await.unwrap();

        let comments = store.list_comments(post.id()).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].user_id, "alice");
        assert_eq!(comments[1].content, "second");

        let err = store.insert_comment(999, "alice", "nope").await.unwrap_err();
        assert!(matches!(err, HubError::NotFound { id: 999 }));
        assert!(store.list_comments(999).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn category_counts_aggregate() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        for (title, category) in [
            ("a", Category::Urgent),
            ("b", Category::Urgent),
            ("c", Category::SocialMedia),
        ] {
            store
                .insert_post(&sample_post(title, category, "2026-02-01T10:00:00Z"))
                .await
                .unwrap();
        }

        let counts = store.category_counts().await.unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].category, "Social Media");
        assert_eq!(counts[0].count, 1);
        assert_eq!(counts[1].category, "Urgent");
        assert_eq!(counts[1].count, 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn reopening_keeps_data_and_reruns_no_migrations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hub.db");
        let config = make_config(path.to_str().unwrap());

        let store = SqlitePostStore::open(&config).await.unwrap();
        let id = store
            .insert_post(&sample_post("durable", Category::General, "2026-02-01T10:00:00Z"))
            .await
            .unwrap()
            .id();
        store.close().await.unwrap();
        drop(store);

        let reopened = SqlitePostStore::open(&config).await.unwrap();
        let post = reopened.get_post(id).await.unwrap().unwrap();
        assert_eq!(post.title, "durable");
    }
}
