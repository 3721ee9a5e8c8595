// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

/// Tally of one ingestion run.
///
/// `found` counts unseen messages at poll time; every one of them ends up
/// in exactly one of the other three buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Unseen messages present when the mailbox was polled.
    pub found: usize,
    /// Messages persisted as new posts and archived.
    pub ingested: usize,
    /// Messages whose source id already had a post. Archived, not re-stored.
    pub deduplicated: usize,
    /// Messages that failed at some stage and were left unarchived.
    pub errored: usize,
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} found, {} ingested, {} duplicate, {} errored",
            self.found, self.ingested, self.deduplicated, self.errored
        )
    }
}
