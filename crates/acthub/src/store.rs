// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend selection: wires the configured `PostStore` implementation.

use std::sync::Arc;

use acthub_config::HubConfig;
use acthub_core::{HubError, PostStore};
use acthub_rest::RestPostStore;
use acthub_storage::SqlitePostStore;

/// Open the persistence backend named by `storage.backend`.
pub async fn open_store(config: &HubConfig) -> Result<Arc<dyn PostStore>, HubError> {
    match config.storage.backend.as_str() {
        "sqlite" => {
            let store = SqlitePostStore::open(&config.storage).await?;
            Ok(Arc::new(store))
        }
        "rest" => {
            let store = RestPostStore::new(&config.rest)?;
            Ok(Arc::new(store))
        }
        // Config validation rejects unknown backends before we get here.
        other => Err(HubError::Config(format!(
            "unknown storage backend {other:?}"
        ))),
    }
}
