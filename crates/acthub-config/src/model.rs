// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Campaign Action Hub.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Action Hub configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; the mailbox section must be filled in before `acthub ingest`
/// can reach a real server.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HubConfig {
    /// Identity and logging settings.
    #[serde(default)]
    pub hub: GeneralConfig,

    /// IMAP mailbox settings for the ingestion pipeline.
    #[serde(default)]
    pub mailbox: MailboxConfig,

    /// Ingestion run behavior.
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Persistence backend selection and SQLite settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// REST data API settings (used when `storage.backend = "rest"`).
    #[serde(default)]
    pub rest: RestConfig,

    /// Dashboard gateway HTTP server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Display name used in logs and the health endpoint.
    #[serde(default = "default_hub_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            name: default_hub_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_hub_name() -> String {
    "acthub".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// IMAP mailbox configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MailboxConfig {
    /// IMAP server hostname. Empty disables ingestion.
    #[serde(default)]
    pub host: String,

    /// IMAP TLS port.
    #[serde(default = "default_imap_port")]
    pub port: u16,

    /// Login username (usually the mailbox address).
    #[serde(default)]
    pub username: String,

    /// Login password.
    #[serde(default)]
    pub password: String,

    /// Folder to poll for unseen messages.
    #[serde(default = "default_folder")]
    pub folder: String,

    /// Folder processed messages are moved into. Created on demand.
    #[serde(default = "default_archive_folder")]
    pub archive_folder: String,

    /// Socket read/write timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_imap_port(),
            username: String::new(),
            password: String::new(),
            folder: default_folder(),
            archive_folder: default_archive_folder(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_imap_port() -> u16 {
    993
}

fn default_folder() -> String {
    "INBOX".to_string()
}

fn default_archive_folder() -> String {
    "Processed".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Ingestion run behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// Sender address stamped on diagnostic and status posts, so the
    /// dashboard needs no special-casing to display them.
    #[serde(default = "default_system_sender")]
    pub system_sender: String,

    /// Recipient address stamped on diagnostic and status posts.
    #[serde(default = "default_admin_recipient")]
    pub admin_recipient: String,

    /// Insert a low-noise General status post after a successful run that
    /// found no new mail.
    #[serde(default)]
    pub status_posts: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            system_sender: default_system_sender(),
            admin_recipient: default_admin_recipient(),
            status_posts: false,
        }
    }
}

fn default_system_sender() -> String {
    "system@localhost".to_string()
}

fn default_admin_recipient() -> String {
    "admin@localhost".to_string()
}

/// Persistence backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Backend selection: "sqlite" or "rest".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Path to the SQLite database file (sqlite backend only).
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database_path: default_database_path(),
        }
    }
}

fn default_backend() -> String {
    "sqlite".to_string()
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("acthub").join("acthub.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("acthub.db"))
        .to_string_lossy()
        .into_owned()
}

/// REST data API configuration (PostgREST-compatible, e.g. Supabase).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RestConfig {
    /// Base URL of the data API, e.g. `https://project.supabase.co`.
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Bearer API key sent in request headers.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Dashboard gateway HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Bearer token required on `/v1` routes. `None` rejects all
    /// authenticated requests (fail-closed).
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            bearer_token: None,
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8080
}
