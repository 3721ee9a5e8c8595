// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the dashboard REST API.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use acthub_classifier::classify;
use acthub_core::{
    ActionType, Category, CategoryCount, Comment, HubError, NewPost, Post, PostFilter,
    PostStatus, SortOrder,
};

use crate::server::GatewayState;

/// Query parameters for GET /v1/posts.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(default)]
    pub sort: SortOrder,
}

/// Request body for POST /v1/posts.
///
/// Category and action type may be omitted; the server then classifies
/// the title and content the same way the mail pipeline would.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub action_type: Option<ActionType>,
}

/// Request body for POST /v1/mark-complete.
#[derive(Debug, Deserialize)]
pub struct MarkCompleteRequest {
    pub post_id: i64,
}

/// Response body for POST /v1/mark-complete.
#[derive(Debug, Serialize)]
pub struct MarkCompleteResponse {
    pub post_id: i64,
    pub status: PostStatus,
}

/// Request body for POST /v1/posts/{id}/comments.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub user_id: String,
    pub content: String,
}

/// Response body for GET /v1/stats.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: i64,
    pub categories: Vec<CategoryCount>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// [`HubError`] with an HTTP status mapping.
pub struct ApiError(HubError);

impl From<HubError> for ApiError {
    fn from(err: HubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            HubError::NotFound { .. } => StatusCode::NOT_FOUND,
            HubError::Persistence { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(stage = self.0.stage(), error = %self.0, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// GET /health (public)
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /v1/posts
pub async fn list_posts(
    State(state): State<GatewayState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let filter = PostFilter {
        category: query.category,
        status: query.status,
    };
    let posts = state.store.list_posts(&filter, query.sort).await?;
    Ok(Json(posts))
}

/// POST /v1/posts
pub async fn create_post(
    State(state): State<GatewayState>,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let (category, action_type) = match (body.category, body.action_type) {
        (Some(category), Some(action_type)) => (category, action_type),
        (category, action_type) => {
            let verdict = classify(&body.title, &body.content);
            (
                category.unwrap_or(verdict.category),
                action_type.unwrap_or(verdict.action_type),
            )
        }
    };

    let post = NewPost {
        title: body.title,
        content: body.content,
        sender: body.sender.unwrap_or_else(|| "dashboard".to_string()),
        recipient: body.recipient.unwrap_or_else(|| "team".to_string()),
        category,
        action_type,
        status: PostStatus::New,
        source_id: None,
        created_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    };
    let id = state.store.insert_post(&post).await?.id();
    let created = state
        .store
        .get_post(id)
        .await?
        .ok_or_else(|| HubError::Internal(format!("post {id} vanished after insert")))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/posts/{id}
pub async fn get_post(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .store
        .get_post(id)
        .await?
        .ok_or(HubError::NotFound { id })?;
    Ok(Json(post))
}

/// POST /v1/mark-complete
pub async fn mark_complete(
    State(state): State<GatewayState>,
    Json(body): Json<MarkCompleteRequest>,
) -> Result<Json<MarkCompleteResponse>, ApiError> {
    state
        .store
        .update_status(body.post_id, PostStatus::Completed)
        .await?;
    Ok(Json(MarkCompleteResponse {
        post_id: body.post_id,
        status: PostStatus::Completed,
    }))
}

/// GET /v1/posts/{id}/comments
pub async fn list_comments(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    // A missing post is a 404, not an empty list.
    state
        .store
        .get_post(id)
        .await?
        .ok_or(HubError::NotFound { id })?;
    let comments = state.store.list_comments(id).await?;
    Ok(Json(comments))
}

/// POST /v1/posts/{id}/comments
pub async fn create_comment(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
    Json(body): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment_id = state
        .store
        .insert_comment(id, &body.user_id, &body.content)
        .await?;
    let comments = state.store.list_comments(id).await?;
    let created = comments
        .into_iter()
        .find(|c| c.id == comment_id)
        .ok_or_else(|| HubError::Internal(format!("comment {comment_id} vanished after insert")))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/stats
pub async fn get_stats(State(state): State<GatewayState>) -> Result<Json<StatsResponse>, ApiError> {
    let categories = state.store.category_counts().await?;
    let total = categories.iter().map(|c| c.count).sum();
    Ok(Json(StatsResponse { total, categories }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_deserializes_defaults() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert!(query.category.is_none());
        assert!(query.status.is_none());
        assert_eq!(query.sort, SortOrder::Newest);
    }

    #[test]
    fn create_post_request_accepts_minimal_body() {
        let json = r#"{"title": "hello", "content": "world"}"#;
        let req: CreatePostRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.title, "hello");
        assert!(req.category.is_none());
        assert!(req.action_type.is_none());
    }

    #[test]
    fn create_post_request_accepts_display_category_names() {
        let json = r#"{"title": "t", "content": "c", "category": "Social Media",
                       "action_type": "social_share"}"#;
        let req: CreatePostRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.category, Some(Category::SocialMedia));
        assert_eq!(req.action_type, Some(ActionType::SocialShare));
    }

    #[test]
    fn error_response_serializes() {
        let resp = ErrorResponse {
            error: "something went wrong".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("something went wrong"));
    }
}
