// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error diagnostics.
//!
//! Converts Figment deserialization errors and post-deserialization
//! validation failures into miette diagnostics rendered at startup.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error suitable for terminal rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A TOML or environment value failed to deserialize.
    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(acthub::config::invalid),
        help("check acthub.toml and ACTHUB_* environment variables against the documented keys")
    )]
    Figment {
        /// Figment's description of the failure, including the key path.
        message: String,
    },

    /// A value deserialized fine but violates a semantic constraint.
    #[error("invalid configuration value: {message}")]
    #[diagnostic(code(acthub::config::validation))]
    Validation { message: String },
}

/// Convert a Figment error (which may aggregate several failures) into
/// one diagnostic per failure.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Figment {
            message: e.to_string(),
        })
        .collect()
}

/// Render all collected errors to stderr via miette's fancy reporter.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        let report = miette::Report::msg(error.to_string());
        eprintln!("{report:?}");
    }
    eprintln!(
        "error: configuration invalid ({} problem{})",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figment_error_converts_to_diagnostics() {
        let err = crate::loader::load_config_from_str("hub = 3").unwrap_err();
        let errors = figment_to_config_errors(err);
        assert!(!errors.is_empty());
        assert!(errors[0].to_string().contains("invalid configuration"));
    }

    #[test]
    fn validation_error_displays_message() {
        let err = ConfigError::Validation {
            message: "mailbox.port must be non-zero".to_string(),
        };
        assert!(err.to_string().contains("mailbox.port"));
    }
}
