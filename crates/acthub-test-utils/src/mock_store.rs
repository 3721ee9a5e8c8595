// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory mock `PostStore` for deterministic testing.
//!
//! Behaves like the real backends, including `source_id` deduplication
//! and priority ordering, and supports failure injection so pipeline
//! error paths can be exercised without a database.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;

use acthub_core::{
    CategoryCount, Comment, HubError, Inserted, NewPost, Post, PostFilter, PostStatus,
    PostStore, SortOrder,
};

/// A mock post store backed by `Vec`s.
#[derive(Default)]
pub struct MockPostStore {
    posts: Mutex<Vec<Post>>,
    comments: Mutex<Vec<Comment>>,
    next_post_id: AtomicI64,
    next_comment_id: AtomicI64,
    fail_inserts: AtomicBool,
}

impl MockPostStore {
    pub fn new() -> Self {
        Self {
            next_post_id: AtomicI64::new(1),
            next_comment_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// Make every subsequent `insert_post` fail with a persistence error.
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all stored posts, insertion order.
    pub fn posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostStore for MockPostStore {
    async fn insert_post(&self, post: &NewPost) -> Result<Inserted, HubError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(HubError::Persistence {
                message: "injected insert failure".to_string(),
                source: None,
            });
        }

        let mut posts = self.posts.lock().unwrap();
        if let Some(source_id) = &post.source_id
            && let Some(existing) = posts
                .iter()
                .find(|p| p.source_id.as_ref() == Some(source_id))
        {
            return Ok(Inserted::Existing(existing.id));
        }

        let id = self.next_post_id.fetch_add(1, Ordering::SeqCst);
        posts.push(Post {
            id,
            title: post.title.clone(),
            content: post.content.clone(),
            sender: post.sender.clone(),
            recipient: post.recipient.clone(),
            category: post.category,
            action_type: post.action_type,
            status: post.status,
            source_id: post.source_id.clone(),
            created_at: post.created_at.clone(),
        });
        Ok(Inserted::Created(id))
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, HubError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        sort: SortOrder,
    ) -> Result<Vec<Post>, HubError> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.category.is_none_or(|c| p.category == c))
            .filter(|p| filter.status.is_none_or(|s| p.status == s))
            .cloned()
            .collect();
        match sort {
            SortOrder::Newest => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Oldest => posts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::Priority => posts.sort_by(|a, b| {
                let urgency = |p: &Post| u8::from(p.category != acthub_core::Category::Urgent);
                urgency(a)
                    .cmp(&urgency(b))
                    .then_with(|| b.created_at.cmp(&a.created_at))
            }),
        }
        Ok(posts)
    }

    async fn update_status(&self, id: i64, status: PostStatus) -> Result<(), HubError> {
        let mut posts = self.posts.lock().unwrap();
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.status = status;
                Ok(())
            }
            None => Err(HubError::NotFound { id }),
        }
    }

    async fn insert_comment(
        &self,
        post_id: i64,
        user_id: &str,
        content: &str,
    ) -> Result<i64, HubError> {
        if self.posts.lock().unwrap().iter().all(|p| p.id != post_id) {
            return Err(HubError::NotFound { id: post_id });
        }
        let id = self.next_comment_id.fetch_add(1, Ordering::SeqCst);
        self.comments.lock().unwrap().push(Comment {
            id,
            post_id,
            user_id: user_id.to_string(),
            content: content.to_string(),
            created_at: format!("2026-01-01T00:00:{:02}Z", id % 60),
        });
        Ok(id)
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, HubError> {
        let mut comments: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>, HubError> {
        let posts = self.posts.lock().unwrap();
        let mut counts: Vec<CategoryCount> = Vec::new();
        for post in posts.iter() {
            let name = post.category.to_string();
            match counts.iter_mut().find(|c| c.category == name) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    category: name,
                    count: 1,
                }),
            }
        }
        counts.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(counts)
    }
}
