// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the configuration system.

use acthub_config::load_and_validate_str;

#[test]
fn minimal_config_loads_with_defaults() {
    let config = load_and_validate_str("").unwrap();
    assert_eq!(config.hub.name, "acthub");
    assert_eq!(config.storage.backend, "sqlite");
    assert_eq!(config.mailbox.folder, "INBOX");
}

#[test]
fn full_config_round_trips() {
    let config = load_and_validate_str(
        r#"
        [hub]
        name = "campaign-hub"
        log_level = "debug"

        [mailbox]
        host = "imap.titan.example"
        port = 993
        username = "campaign@example.org"
        password = "hunter2"
        folder = "INBOX"
        archive_folder = "Processed"

        [ingest]
        system_sender = "system@example.org"
        admin_recipient = "admin@example.org"
        status_posts = true

        [storage]
        backend = "rest"

        [rest]
        endpoint_url = "https://project.supabase.example"
        api_key = "service-role-key"

        [gateway]
        host = "0.0.0.0"
        port = 9000
        bearer_token = "dashboard-token"
        "#,
    )
    .unwrap();

    assert_eq!(config.hub.name, "campaign-hub");
    assert_eq!(config.mailbox.username, "campaign@example.org");
    assert!(config.ingest.status_posts);
    assert_eq!(config.storage.backend, "rest");
    assert_eq!(
        config.rest.endpoint_url.as_deref(),
        Some("https://project.supabase.example")
    );
    assert_eq!(config.gateway.port, 9000);
}

#[test]
fn rest_backend_without_credentials_is_invalid() {
    let errors = load_and_validate_str(
        r#"
        [storage]
        backend = "rest"
        "#,
    )
    .unwrap_err();
    assert_eq!(errors.len(), 2);
}

#[test]
fn typo_in_section_key_is_rejected() {
    let errors = load_and_validate_str(
        r#"
        [gateway]
        bearer_tokn = "oops"
        "#,
    )
    .unwrap_err();
    assert!(!errors.is_empty());
}
