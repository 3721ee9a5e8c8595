// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use acthub_core::{HubError, PostStore};

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Persistence backend serving the dashboard.
    pub store: Arc<dyn PostStore>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

/// Gateway server configuration (mirrors `GatewayConfig` from
/// `acthub-config` to avoid a config-crate dependency here).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Bearer token for auth (`None` = all `/v1` requests rejected).
    pub bearer_token: Option<String>,
}

/// Build the full route tree.
///
/// `/health` is public; everything under `/v1` sits behind the bearer
/// check. The dashboard is served from another origin, hence the
/// permissive CORS layer.
pub fn build_router(state: GatewayState, auth: AuthConfig) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route(
            "/v1/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route("/v1/posts/{id}", get(handlers::get_post))
        .route(
            "/v1/posts/{id}/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route("/v1/mark-complete", post(handlers::mark_complete))
        .route("/v1/stats", get(handlers::get_stats))
        .route_layer(axum_middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
}

/// Start the dashboard HTTP server. Runs until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), HubError> {
    let auth = AuthConfig {
        bearer_token: config.bearer_token.clone(),
    };
    let app = build_router(state, auth);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HubError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("dashboard API listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| HubError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
