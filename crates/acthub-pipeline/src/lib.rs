// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The mail ingestion pipeline.
//!
//! A single run polls the configured mailbox for unseen messages and walks
//! each one through extract -> classify -> persist -> archive. Stages are
//! strictly ordered per message: a message is only archived after its post
//! is durably stored, so a crash or storage outage never loses mail.
//! Failures on one message are logged and do not abort the rest of the run.

mod report;
mod run;

pub use report::IngestReport;
pub use run::{Connector, run_ingest};
