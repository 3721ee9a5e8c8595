// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mailbox connector for the Campaign Action Hub.
//!
//! Speaks IMAP over TLS, enumerates unseen messages, extracts normalized
//! `(sender, recipient, subject, body)` tuples from raw RFC 822 bytes, and
//! archives processed messages. The [`Mailbox`] trait is the seam the
//! ingestion pipeline depends on, so tests can substitute a scripted mock.

pub mod extract;
pub mod session;

pub use extract::{ExtractedMail, extract};
pub use session::{MailSession, Uid};

use acthub_core::HubError;

/// Mail-retrieval operations the pipeline consumes.
///
/// One implementor speaks real IMAP ([`MailSession`]); tests use a
/// scripted in-memory mailbox. All methods are blocking; the pipeline
/// drives them from `spawn_blocking`.
pub trait Mailbox: Send {
    /// UIDs of unseen messages, in server order (ascending).
    fn list_unseen(&mut self) -> Result<Vec<Uid>, HubError>;

    /// Full raw bytes of one message.
    fn fetch_raw(&mut self, uid: Uid) -> Result<Vec<u8>, HubError>;

    /// Mark seen and move to the archive folder. Idempotent for already
    /// archived uids.
    fn archive(&mut self, uid: Uid) -> Result<(), HubError>;

    /// Release the session. Always invoked, even on error paths.
    fn close(self: Box<Self>);
}
