// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `acthub ingest` -- one mailbox poll, meant to be re-invoked by cron.

use acthub_config::HubConfig;
use acthub_core::HubError;
use acthub_mailbox::{MailSession, Mailbox};
use acthub_pipeline::{Connector, run_ingest};

use crate::store::open_store;

pub async fn run(config: &HubConfig) -> Result<(), HubError> {
    let store = open_store(config).await?;

    let mailbox_config = config.mailbox.clone();
    let connector: Connector = Box::new(move || {
        let session = MailSession::connect(&mailbox_config)?;
        Ok(Box::new(session) as Box<dyn Mailbox>)
    });

    // A connection failure propagates here and exits non-zero so the cron
    // job's failure is visible to its supervisor.
    let report = run_ingest(config, store, connector).await?;
    tracing::info!(%report, "ingest run finished");
    Ok(())
}
