// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test doubles for the hub crates.

mod mock_mailbox;
mod mock_store;

pub use mock_mailbox::{MailboxProbe, MockMailbox};
pub use mock_store::MockPostStore;
