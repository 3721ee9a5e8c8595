// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One ingestion run, end to end.
//!
//! IMAP is driven with a blocking client, so the whole run executes on a
//! `spawn_blocking` thread; store calls hop back onto the runtime via
//! `Handle::block_on`. The mailbox is produced by a [`Connector`] closure
//! so tests can hand in a scripted session instead of a TLS socket.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

use acthub_classifier::classify;
use acthub_config::model::{HubConfig, IngestConfig, MailboxConfig};
use acthub_core::{ActionType, Category, HubError, Inserted, NewPost, PostStatus, PostStore};
use acthub_mailbox::{Mailbox, Uid, extract};

use crate::report::IngestReport;

/// Produces a connected mailbox session. Invoked once per run, on the
/// blocking thread.
pub type Connector = Box<dyn FnOnce() -> Result<Box<dyn Mailbox>, HubError> + Send>;

/// Poll the mailbox once and process every unseen message.
///
/// Returns the run tally, or the fatal error when the session could not be
/// established or enumerated at all. A connection failure additionally
/// leaves an urgent alert post in the store so the outage is visible on
/// the dashboard.
pub async fn run_ingest(
    config: &HubConfig,
    store: Arc<dyn PostStore>,
    connector: Connector,
) -> Result<IngestReport, HubError> {
    let mailbox_cfg = config.mailbox.clone();
    let ingest_cfg = config.ingest.clone();
    let handle = Handle::current();
    tokio::task::spawn_blocking(move || {
        run_blocking(&handle, &mailbox_cfg, &ingest_cfg, store, connector)
    })
    .await
    .map_err(|e| HubError::Internal(format!("ingest task panicked: {e}")))?
}

fn run_blocking(
    handle: &Handle,
    mailbox_cfg: &MailboxConfig,
    ingest: &IngestConfig,
    store: Arc<dyn PostStore>,
    connector: Connector,
) -> Result<IngestReport, HubError> {
    let mut mailbox = match connector() {
        Ok(mailbox) => mailbox,
        Err(err) => {
            error!(host = %mailbox_cfg.host, error = %err, "mailbox connection failed");
            let alert = connection_alert(mailbox_cfg, ingest, &err);
            if let Err(persist_err) = handle.block_on(store.insert_post(&alert)) {
                error!(error = %persist_err, "could not record connection alert post");
            }
            return Err(err);
        }
    };

    let uids = match mailbox.list_unseen() {
        Ok(uids) => uids,
        Err(err) => {
            mailbox.close();
            return Err(err);
        }
    };

    let mut report = IngestReport {
        found: uids.len(),
        ..IngestReport::default()
    };
    info!(found = report.found, "mailbox polled");

    for uid in uids {
        match process_message(handle, mailbox.as_mut(), store.as_ref(), uid) {
            Ok(Inserted::Created(id)) => {
                report.ingested += 1;
                debug!(uid, post_id = id, "message ingested");
            }
            Ok(Inserted::Existing(id)) => {
                report.deduplicated += 1;
                debug!(uid, post_id = id, "duplicate of existing post");
            }
            Err(failure) => {
                report.errored += 1;
                warn!(
                    uid,
                    sender = failure.sender.as_deref().unwrap_or("unknown"),
                    subject = failure.subject.as_deref().unwrap_or("unknown"),
                    stage = failure.error.stage(),
                    error = %failure.error,
                    "message left unarchived"
                );
            }
        }
    }

    if report.found == 0 && ingest.status_posts {
        if let Err(err) = handle.block_on(store.insert_post(&idle_status(ingest))) {
            warn!(error = %err, "could not record idle status post");
        }
    }

    mailbox.close();
    info!(%report, "ingestion run complete");
    Ok(report)
}

/// A per-message failure with the mail metadata known at the time, so the
/// operator can triage a skipped message without reopening the mailbox.
/// `sender`/`subject` are `None` only when the error struck before the
/// message could be parsed.
struct MessageFailure {
    error: HubError,
    sender: Option<String>,
    subject: Option<String>,
}

impl MessageFailure {
    fn before_parse(error: HubError) -> Self {
        Self {
            error,
            sender: None,
            subject: None,
        }
    }
}

fn process_message(
    handle: &Handle,
    mailbox: &mut dyn Mailbox,
    store: &dyn PostStore,
    uid: Uid,
) -> Result<Inserted, MessageFailure> {
    let raw = mailbox.fetch_raw(uid).map_err(MessageFailure::before_parse)?;
    let mail = extract(&raw).map_err(MessageFailure::before_parse)?;
    let verdict = classify(&mail.subject, &mail.body);
    let fail = |error: HubError| MessageFailure {
        error,
        sender: Some(mail.sender.clone()),
        subject: Some(mail.subject.clone()),
    };
    let post = NewPost {
        title: mail.subject.clone(),
        content: mail.body.clone(),
        sender: mail.sender.clone(),
        recipient: mail.recipient.clone(),
        category: verdict.category,
        action_type: verdict.action_type,
        status: PostStatus::New,
        source_id: mail.message_id.clone(),
        created_at: mail.received_at.clone(),
    };
    let inserted = handle
        .block_on(store.insert_post(&post))
        .map_err(|e| fail(e))?;
    // A failed archive leaves the message unseen; the next poll retries it
    // and the source-id check keeps the posts table from growing a twin.
    mailbox.archive(uid).map_err(|e| fail(e))?;
    Ok(inserted)
}

fn connection_alert(mailbox: &MailboxConfig, ingest: &IngestConfig, err: &HubError) -> NewPost {
    NewPost {
        title: "Email System Alert: IMAP Connection Failed".to_string(),
        content: format!(
            "Could not connect to {}:{}. {err}\n\n\
             Check mailbox credentials and network reachability.",
            mailbox.host, mailbox.port
        ),
        sender: ingest.system_sender.clone(),
        recipient: ingest.admin_recipient.clone(),
        category: Category::Urgent,
        action_type: ActionType::TechnicalSupport,
        status: PostStatus::New,
        source_id: None,
        created_at: now_rfc3339(),
    }
}

fn idle_status(ingest: &IngestConfig) -> NewPost {
    NewPost {
        title: "Email System Status: no new mail".to_string(),
        content: "The scheduled poll completed; the inbox had no unseen messages.".to_string(),
        sender: ingest.system_sender.clone(),
        recipient: ingest.admin_recipient.clone(),
        category: Category::General,
        action_type: ActionType::General,
        status: PostStatus::New,
        source_id: None,
        created_at: now_rfc3339(),
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
