// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects every failure instead of stopping at the first.

use crate::diagnostic::ConfigError;
use crate::model::HubConfig;

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &HubConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match config.storage.backend.as_str() {
        "sqlite" => {
            if config.storage.database_path.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: "storage.database_path must not be empty".to_string(),
                });
            }
        }
        "rest" => {
            if config.rest.endpoint_url.as_deref().unwrap_or("").is_empty() {
                errors.push(ConfigError::Validation {
                    message: "rest.endpoint_url is required when storage.backend = \"rest\""
                        .to_string(),
                });
            }
            if config.rest.api_key.as_deref().unwrap_or("").is_empty() {
                errors.push(ConfigError::Validation {
                    message: "rest.api_key is required when storage.backend = \"rest\""
                        .to_string(),
                });
            }
        }
        other => {
            errors.push(ConfigError::Validation {
                message: format!(
                    "storage.backend must be \"sqlite\" or \"rest\", got `{other}`"
                ),
            });
        }
    }

    if config.mailbox.port == 0 {
        errors.push(ConfigError::Validation {
            message: "mailbox.port must be non-zero".to_string(),
        });
    }

    // A zero timeout cannot be applied to the socket, which would leave
    // reads and writes unbounded.
    if config.mailbox.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "mailbox.timeout_secs must be non-zero".to_string(),
        });
    }

    // A host without credentials cannot authenticate; catch it at startup
    // rather than at the first scheduled ingest.
    if !config.mailbox.host.trim().is_empty() && config.mailbox.username.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "mailbox.username is required when mailbox.host is set".to_string(),
        });
    }

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    let level = config.hub.log_level.as_str();
    if !matches!(level, "trace" | "debug" | "info" | "warn" | "error") {
        errors.push(ConfigError::Validation {
            message: format!(
                "hub.log_level must be one of trace/debug/info/warn/error, got `{level}`"
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
