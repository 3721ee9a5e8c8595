// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `acthub serve` -- run the dashboard API server.

use acthub_config::HubConfig;
use acthub_core::HubError;
use acthub_gateway::{GatewayState, ServerConfig, start_server};

use crate::store::open_store;

pub async fn run(config: &HubConfig) -> Result<(), HubError> {
    let store = open_store(config).await?;

    tracing::info!(
        backend = %config.storage.backend,
        host = %config.gateway.host,
        port = config.gateway.port,
        "starting dashboard API"
    );

    let state = GatewayState {
        store,
        start_time: std::time::Instant::now(),
    };
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
        bearer_token: config.gateway.bearer_token.clone(),
    };
    start_server(&server_config, state).await
}
