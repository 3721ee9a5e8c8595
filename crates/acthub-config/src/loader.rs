// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./acthub.toml` > `~/.config/acthub/acthub.toml`
//! > `/etc/acthub/acthub.toml` with environment variable overrides via the
//! `ACTHUB_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HubConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/acthub/acthub.toml` (system-wide)
/// 3. `~/.config/acthub/acthub.toml` (user XDG config)
/// 4. `./acthub.toml` (local directory)
/// 5. `ACTHUB_*` environment variables
pub fn load_config() -> Result<HubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HubConfig::default()))
        .merge(Toml::file("/etc/acthub/acthub.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("acthub/acthub.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("acthub.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<HubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HubConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HubConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ACTHUB_MAILBOX_ARCHIVE_FOLDER` must
/// map to `mailbox.archive_folder`, not `mailbox.archive.folder`.
fn env_provider() -> Env {
    Env::prefixed("ACTHUB_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: ACTHUB_MAILBOX_PASSWORD -> "mailbox_password"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("hub_", "hub.", 1)
            .replacen("mailbox_", "mailbox.", 1)
            .replacen("ingest_", "ingest.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("rest_", "rest.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
