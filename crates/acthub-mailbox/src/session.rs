// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IMAP session management over TLS.
//!
//! Blocking I/O by design: IMAP session state is inherently serial and the
//! pipeline processes one batch to completion. Callers on an async runtime
//! drive this through `spawn_blocking`.

use std::net::TcpStream;
use std::time::Duration;

use acthub_config::model::MailboxConfig;
use acthub_core::HubError;
use native_tls::{TlsConnector, TlsStream};
use tracing::{debug, warn};

use crate::Mailbox;

/// Message identifier within a session: the IMAP UID, stable across
/// sessions (unlike sequence numbers).
pub type Uid = u32;

/// An authenticated, selected IMAP session.
///
/// Exclusively owned by one pipeline run; concurrent runs against the same
/// mailbox are serialized by the external scheduler, not here.
pub struct MailSession {
    session: imap::Session<TlsStream<TcpStream>>,
    archive_folder: String,
    archive_checked: bool,
}

impl MailSession {
    /// Connect, authenticate, and select the configured folder.
    ///
    /// Any failure here is a [`HubError::Connection`] carrying the
    /// transport error text, and is fatal to the ingestion run.
    pub fn connect(config: &MailboxConfig) -> Result<Self, HubError> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let stream = TcpStream::connect((config.host.as_str(), config.port)).map_err(|e| {
            HubError::Connection {
                message: format!("tcp connect to {}:{} failed: {e}", config.host, config.port),
                source: Some(Box::new(e)),
            }
        })?;
        // Default transport timeouts are unbounded; a stalled server must
        // not hang the whole scheduled run. Config validation rejects a
        // zero timeout, so these only fail on an OS-level error.
        stream
            .set_read_timeout(Some(timeout))
            .and_then(|()| stream.set_write_timeout(Some(timeout)))
            .map_err(|e| HubError::Connection {
                message: format!("could not apply socket timeout: {e}"),
                source: Some(Box::new(e)),
            })?;

        let tls = TlsConnector::builder()
            .build()
            .map_err(|e| HubError::Connection {
                message: format!("tls setup failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let tls_stream =
            tls.connect(&config.host, stream)
                .map_err(|e| HubError::Connection {
                    message: format!("tls handshake with {} failed: {e}", config.host),
                    source: Some(Box::new(e)),
                })?;

        let mut client = imap::Client::new(tls_stream);
        client.read_greeting().map_err(|e| HubError::Connection {
            message: format!("imap greeting from {} failed: {e}", config.host),
            source: None,
        })?;

        let mut session = client
            .login(&config.username, &config.password)
            .map_err(|(e, _)| HubError::Connection {
                message: format!("imap login for {} rejected: {e}", config.username),
                source: None,
            })?;

        session.select(&config.folder).map_err(|e| HubError::Connection {
            message: format!("imap select of {} failed: {e}", config.folder),
            source: None,
        })?;

        debug!(host = %config.host, folder = %config.folder, "mailbox session established");

        Ok(Self {
            session,
            archive_folder: config.archive_folder.clone(),
            archive_checked: false,
        })
    }

    /// Create the archive folder unless a previous call in this session
    /// already did. An "already exists" CREATE failure is not fatal; the
    /// subsequent MOVE surfaces any real problem.
    fn ensure_archive_folder(&mut self) -> Result<(), HubError> {
        if self.archive_checked {
            return Ok(());
        }
        let exists = self
            .session
            .list(Some(""), Some(&self.archive_folder))
            .map(|names| !names.is_empty())
            .unwrap_or(false);
        if !exists {
            match self.session.create(&self.archive_folder) {
                Ok(()) => debug!(folder = %self.archive_folder, "created archive folder"),
                Err(e) => debug!(folder = %self.archive_folder, error = %e,
                    "archive folder create failed (may already exist)"),
            }
        }
        self.archive_checked = true;
        Ok(())
    }
}

impl Mailbox for MailSession {
    /// UIDs of unseen messages, ascending. Empty is a normal outcome.
    fn list_unseen(&mut self) -> Result<Vec<Uid>, HubError> {
        let mut uids: Vec<Uid> = self
            .session
            .uid_search("UNSEEN")
            .map_err(|e| HubError::Connection {
                message: format!("imap UNSEEN search failed: {e}"),
                source: None,
            })?
            .into_iter()
            .collect();
        uids.sort_unstable();
        Ok(uids)
    }

    /// Fetch one message's full RFC 822 bytes.
    fn fetch_raw(&mut self, uid: Uid) -> Result<Vec<u8>, HubError> {
        let fetches = self
            .session
            .uid_fetch(uid.to_string(), "RFC822")
            .map_err(|e| HubError::Extraction {
                message: format!("imap fetch of uid {uid} failed: {e}"),
            })?;
        fetches
            .iter()
            .next()
            .and_then(|f| f.body())
            .map(|b| b.to_vec())
            .ok_or_else(|| HubError::Extraction {
                message: format!("imap fetch of uid {uid} returned no body"),
            })
    }

    /// Mark a message seen and move it into the archive folder.
    ///
    /// Idempotent: UID STORE and UID MOVE are no-ops for a uid that was
    /// already archived or expunged, so re-archiving does not raise.
    fn archive(&mut self, uid: Uid) -> Result<(), HubError> {
        self.ensure_archive_folder()?;

        self.session
            .uid_store(uid.to_string(), "+FLAGS (\\Seen)")
            .map_err(|e| HubError::Archival {
                message: format!("flagging uid {uid} seen failed: {e}"),
            })?;

        self.session
            .uid_mv(uid.to_string(), &self.archive_folder)
            .map_err(|e| HubError::Archival {
                message: format!(
                    "moving uid {uid} to {} failed: {e}",
                    self.archive_folder
                ),
            })?;

        debug!(uid, folder = %self.archive_folder, "message archived");
        Ok(())
    }

    /// Expunge and log out. Failures here only get logged; the run's work
    /// is already done.
    fn close(mut self: Box<Self>) {
        if let Err(e) = self.session.expunge() {
            warn!(error = %e, "imap expunge failed during close");
        }
        if let Err(e) = self.session.logout() {
            warn!(error = %e, "imap logout failed");
        }
    }
}
