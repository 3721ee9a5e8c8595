// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client implementing [`PostStore`] over a PostgREST data API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use acthub_config::model::RestConfig;
use acthub_core::{
    Category, CategoryCount, Comment, HubError, Inserted, NewPost, Post, PostFilter,
    PostStatus, PostStore, SortOrder,
};

/// REST-backed post store.
///
/// The same API key is sent both as `apikey` and as a bearer token, which
/// is what Supabase's PostgREST deployment expects.
pub struct RestPostStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestPostStore {
    /// Build a client from the `[rest]` config section.
    ///
    /// Requires `endpoint_url` and `api_key`; both are enforced by config
    /// validation when the backend is selected, so missing values here are
    /// a wiring bug.
    pub fn new(config: &RestConfig) -> Result<Self, HubError> {
        let endpoint = config
            .endpoint_url
            .as_deref()
            .ok_or_else(|| HubError::Config("rest.endpoint_url is not set".to_string()))?;
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| HubError::Config("rest.api_key is not set".to_string()))?;

        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(api_key)
            .map_err(|e| HubError::Config(format!("invalid rest.api_key header value: {e}")))?;
        headers.insert("apikey", key_value);
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| HubError::Config(format!("invalid rest.api_key header value: {e}")))?;
        headers.insert("authorization", bearer);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| HubError::Persistence {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    async fn read_rows<T: for<'de> Deserialize<'de>>(
        response: Response,
    ) -> Result<Vec<T>, HubError> {
        let response = check_status(response).await?;
        response.json().await.map_err(|e| HubError::Persistence {
            message: format!("malformed response body: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Resolve a `source_id` to the id of the row already holding it.
    async fn find_by_source_id(&self, source_id: &str) -> Result<Option<i64>, HubError> {
        let response = self
            .client
            .get(self.table_url("posts"))
            .query(&[
                ("select", "id".to_string()),
                ("source_id", format!("eq.{source_id}")),
            ])
            .send()
            .await
            .map_err(map_transport)?;
        let rows: Vec<IdRow> = Self::read_rows(response).await?;
        Ok(rows.first().map(|row| row.id))
    }
}

#[async_trait]
impl PostStore for RestPostStore {
    async fn insert_post(&self, post: &NewPost) -> Result<Inserted, HubError> {
        let response = self
            .client
            .post(self.table_url("posts"))
            .header("prefer", "return=representation")
            .json(post)
            .send()
            .await
            .map_err(map_transport)?;

        // PostgREST reports a unique violation as 409; resolve it to the
        // row that already carries this source_id.
        if response.status() == StatusCode::CONFLICT
            && let Some(source_id) = post.source_id.as_deref()
        {
            let id = self.find_by_source_id(source_id).await?.ok_or_else(|| {
                HubError::Persistence {
                    message: format!("conflict for source_id {source_id} but no row found"),
                    source: None,
                }
            })?;
            debug!(id, source_id, "insert resolved to existing row");
            return Ok(Inserted::Existing(id));
        }

        let rows: Vec<Post> = Self::read_rows(response).await?;
        let row = rows.into_iter().next().ok_or_else(|| HubError::Persistence {
            message: "insert returned no representation".to_string(),
            source: None,
        })?;
        Ok(Inserted::Created(row.id))
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, HubError> {
        let response = self
            .client
            .get(self.table_url("posts"))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(map_transport)?;
        let rows: Vec<Post> = Self::read_rows(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        sort: SortOrder,
    ) -> Result<Vec<Post>, HubError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(category) = filter.category {
            query.push(("category", format!("eq.{category}")));
        }
        if let Some(status) = filter.status {
            query.push(("status", format!("eq.{status}")));
        }
        query.push((
            "order",
            match sort {
                SortOrder::Oldest => "created_at.asc,id.asc".to_string(),
                // Priority is resolved client-side below; fetch newest-first.
                SortOrder::Newest | SortOrder::Priority => "created_at.desc,id.desc".to_string(),
            },
        ));

        let response = self
            .client
            .get(self.table_url("posts"))
            .query(&query)
            .send()
            .await
            .map_err(map_transport)?;
        let mut posts: Vec<Post> = Self::read_rows(response).await?;

        if sort == SortOrder::Priority {
            // Stable: urgent posts float to the front, newest-first within
            // each band.
            posts.sort_by_key(|p| u8::from(p.category != Category::Urgent));
        }
        Ok(posts)
    }

    async fn update_status(&self, id: i64, status: PostStatus) -> Result<(), HubError> {
        let response = self
            .client
            .patch(self.table_url("posts"))
            .query(&[("id", format!("eq.{id}"))])
            .header("prefer", "return=representation")
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await
            .map_err(map_transport)?;
        let rows: Vec<IdRow> = Self::read_rows(response).await?;
        if rows.is_empty() {
            return Err(HubError::NotFound { id });
        }
        Ok(())
    }

    async fn insert_comment(
        &self,
        post_id: i64,
        user_id: &str,
        content: &str,
    ) -> Result<i64, HubError> {
        let body = serde_json::json!({
            "post_id": post_id,
            "user_id": user_id,
            "content": content,
            "created_at": now_rfc3339(),
        });
        let response = self
            .client
            .post(self.table_url("comments"))
            .header("prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(map_transport)?;

        // A foreign-key violation on post_id also surfaces as 409.
        if response.status() == StatusCode::CONFLICT {
            return Err(HubError::NotFound { id: post_id });
        }
        let rows: Vec<IdRow> = Self::read_rows(response).await?;
        rows.first().map(|row| row.id).ok_or_else(|| HubError::Persistence {
            message: "insert returned no representation".to_string(),
            source: None,
        })
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, HubError> {
        let response = self
            .client
            .get(self.table_url("comments"))
            .query(&[
                ("post_id", format!("eq.{post_id}")),
                ("order", "created_at.asc,id.asc".to_string()),
            ])
            .send()
            .await
            .map_err(map_transport)?;
        Self::read_rows(response).await
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>, HubError> {
        let response = self
            .client
            .get(self.table_url("posts"))
            .query(&[("select", "category")])
            .send()
            .await
            .map_err(map_transport)?;
        let rows: Vec<CategoryRow> = Self::read_rows(response).await?;

        let mut counts: Vec<CategoryCount> = Vec::new();
        for row in rows {
            match counts.iter_mut().find(|c| c.category == row.category) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    category: row.category,
                    count: 1,
                }),
            }
        }
        counts.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(counts)
    }
}

#[derive(Deserialize)]
struct IdRow {
    id: i64,
}

#[derive(Deserialize)]
struct CategoryRow {
    category: String,
}

fn map_transport(err: reqwest::Error) -> HubError {
    HubError::Persistence {
        message: format!("rest backend unreachable: {err}"),
        source: Some(Box::new(err)),
    }
}

async fn check_status(response: Response) -> Result<Response, HubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(HubError::Persistence {
        message: format!("rest backend returned {status}: {body}"),
        source: None,
    })
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_store(server: &MockServer) -> RestPostStore {
        RestPostStore::new(&RestConfig {
            endpoint_url: Some(server.uri()),
            api_key: Some("test-key".to_string()),
        })
        .unwrap()
    }

    fn post_row(id: i64, category: &str, created_at: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("post {id}"),
            "content": "body",
            "sender": "a@example.org",
            "recipient": "hub@example.org",
            "category": category,
            "action_type": "general",
            "status": "new",
            "source_id": null,
            "created_at": created_at,
        })
    }

    fn sample_new_post() -> NewPost {
        NewPost {
            title: "post 1".to_string(),
            content: "body".to_string(),
            sender: "a@example.org".to_string(),
            recipient: "hub@example.org".to_string(),
            category: Category::General,
            action_type: acthub_core::ActionType::General,
            status: PostStatus::New,
            source_id: Some("msg-1@example.org".to_string()),
            created_at: "2026-02-01T10:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_sends_auth_headers_and_returns_created_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/posts"))
            .and(header("apikey", "test-key"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("prefer", "return=representation"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!([post_row(42, "General", "2026-02-01T10:00:00Z")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = test_store(&server);
        let inserted = store.insert_post(&sample_new_post()).await.unwrap();
        assert_eq!(inserted, Inserted::Created(42));
    }

    #[tokio::test]
    async fn insert_conflict_resolves_to_existing_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/posts"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("source_id", "eq.msg-1@example.org"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 7 }])))
            .mount(&server)
            .await;

        let store = test_store(&server);
        let inserted = store.insert_post(&sample_new_post()).await.unwrap();
        assert_eq!(inserted, Inserted::Existing(7));
    }

    #[tokio::test]
    async fn get_post_maps_empty_result_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("id", "eq.5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = test_store(&server);
        assert!(store.get_post(5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_translates_filters_to_eq_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("category", "eq.Social Media"))
            .and(query_param("status", "eq.new"))
            .and(query_param("order", "created_at.desc,id.desc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([post_row(1, "Social Media", "2026-02-01T10:00:00Z")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = test_store(&server);
        let posts = store
            .list_posts(
                &PostFilter {
                    category: Some(Category::SocialMedia),
                    status: Some(PostStatus::New),
                },
                SortOrder::Newest,
            )
            .await
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].category, Category::SocialMedia);
    }

    #[tokio::test]
    async fn priority_sort_floats_urgent_posts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                post_row(3, "General", "2026-02-03T10:00:00Z"),
                post_row(2, "Urgent", "2026-02-02T10:00:00Z"),
                post_row(1, "General", "2026-02-01T10:00:00Z"),
            ])))
            .mount(&server)
            .await;

        let store = test_store(&server);
        let posts = store
            .list_posts(&PostFilter::default(), SortOrder::Priority)
            .await
            .unwrap();
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), [2, 3, 1]);
    }

    #[tokio::test]
    async fn update_status_missing_row_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/posts"))
            .and(query_param("id", "eq.99"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = test_store(&server);
        let err = store.update_status(99, PostStatus::Completed).await.unwrap_err();
        assert!(matches!(err, HubError::NotFound { id: 99 }));
    }

    #[tokio::test]
    async fn comment_on_missing_post_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/comments"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "23503",
                "message": "violates foreign key constraint"
            })))
            .mount(&server)
            .await;

        let store = test_store(&server);
        let err = store.insert_comment(99, "alice", "hi").await.unwrap_err();
        assert!(matches!(err, HubError::NotFound { id: 99 }));
    }

    #[tokio::test]
    async fn category_counts_aggregate_client_side() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("select", "category"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "category": "Urgent" },
                { "category": "General" },
                { "category": "Urgent" },
            ])))
            .mount(&server)
            .await;

        let store = test_store(&server);
        let counts = store.category_counts().await.unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].category, "General");
        assert_eq!(counts[0].count, 1);
        assert_eq!(counts[1].category, "Urgent");
        assert_eq!(counts[1].count, 2);
    }

    #[tokio::test]
    async fn server_error_is_a_persistence_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let store = test_store(&server);
        let err = store.get_post(1).await.unwrap_err();
        assert_eq!(err.stage(), "persist");
        assert!(err.to_string().contains("500"));
    }
}
