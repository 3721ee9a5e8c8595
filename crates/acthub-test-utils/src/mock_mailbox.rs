// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted in-memory mailbox for pipeline tests.
//!
//! Messages are raw RFC 822 byte vectors keyed by uid. Fetch and archive
//! failures can be injected per uid; archived uids and session close are
//! observable through shared handles that survive the pipeline consuming
//! the boxed session.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use acthub_core::HubError;
use acthub_mailbox::{Mailbox, Uid};

/// Observable state shared between a [`MockMailbox`] and its test.
#[derive(Clone, Default)]
pub struct MailboxProbe {
    archived: Arc<Mutex<Vec<Uid>>>,
    closed: Arc<AtomicBool>,
}

impl MailboxProbe {
    /// Uids archived so far, in order.
    pub fn archived(&self) -> Vec<Uid> {
        self.archived.lock().unwrap().clone()
    }

    /// Whether the session was released.
    pub fn closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// A scripted mailbox with optional failure injection.
#[derive(Default)]
pub struct MockMailbox {
    messages: BTreeMap<Uid, Vec<u8>>,
    fail_fetch: HashSet<Uid>,
    fail_archive: HashSet<Uid>,
    probe: MailboxProbe,
}

impl MockMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw message under the given uid.
    pub fn with_message(mut self, uid: Uid, raw: impl Into<Vec<u8>>) -> Self {
        self.messages.insert(uid, raw.into());
        self
    }

    /// Convenience: add a simple plain-text message.
    pub fn with_plain_message(
        self,
        uid: Uid,
        sender: &str,
        subject: &str,
        body: &str,
    ) -> Self {
        let raw = format!(
            "From: {sender}\r\nTo: hub@example.org\r\nSubject: {subject}\r\n\
             Message-ID: <msg-{uid}@example.org>\r\nContent-Type: text/plain\r\n\r\n{body}\r\n"
        );
        self.with_message(uid, raw.into_bytes())
    }

    /// Make fetching this uid fail.
    pub fn failing_fetch(mut self, uid: Uid) -> Self {
        self.fail_fetch.insert(uid);
        self
    }

    /// Make archiving this uid fail.
    pub fn failing_archive(mut self, uid: Uid) -> Self {
        self.fail_archive.insert(uid);
        self
    }

    /// Handle for observing archive/close behavior after the pipeline
    /// takes ownership.
    pub fn probe(&self) -> MailboxProbe {
        self.probe.clone()
    }
}

impl Mailbox for MockMailbox {
    fn list_unseen(&mut self) -> Result<Vec<Uid>, HubError> {
        Ok(self.messages.keys().copied().collect())
    }

    fn fetch_raw(&mut self, uid: Uid) -> Result<Vec<u8>, HubError> {
        if self.fail_fetch.contains(&uid) {
            return Err(HubError::Extraction {
                message: format!("injected fetch failure for uid {uid}"),
            });
        }
        self.messages
            .get(&uid)
            .cloned()
            .ok_or_else(|| HubError::Extraction {
                message: format!("no such uid {uid}"),
            })
    }

    fn archive(&mut self, uid: Uid) -> Result<(), HubError> {
        if self.fail_archive.contains(&uid) {
            return Err(HubError::Archival {
                message: format!("injected archive failure for uid {uid}"),
            });
        }
        // Archiving an already-archived uid is a no-op, matching UID
        // STORE/MOVE semantics on a real server.
        let mut archived = self.probe.archived.lock().unwrap();
        if !archived.contains(&uid) {
            archived.push(uid);
        }
        Ok(())
    }

    fn close(self: Box<Self>) {
        self.probe.closed.store(true, Ordering::SeqCst);
    }
}
