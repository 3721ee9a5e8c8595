// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access goes through tokio-rusqlite's single background thread. Do NOT
//! create additional Connection instances for writes.

use std::path::Path;

use tracing::debug;

use acthub_core::HubError;

const PRAGMAS: &str = "PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 5000;";

/// Handle to the SQLite database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path` and bring its
    /// schema up to date.
    pub async fn open(path: &str) -> Result<Self, HubError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| HubError::Persistence {
                message: format!("could not create database directory {}", parent.display()),
                source: Some(Box::new(e)),
            })?;
        }

        // Migrations run on a short-lived synchronous connection; refinery
        // needs `&mut rusqlite::Connection`.
        let mut setup = rusqlite::Connection::open(path).map_err(map_sqlite_err)?;
        setup.execute_batch(PRAGMAS).map_err(map_sqlite_err)?;
        crate::migrations::run_migrations(&mut setup)?;
        drop(setup);

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| map_tr_err(e.into()))?;
        conn.call(|conn| {
            conn.execute_batch(PRAGMAS)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// The underlying async connection handle.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Flush the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), HubError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

pub(crate) fn map_tr_err(err: tokio_rusqlite::Error) -> HubError {
    HubError::Persistence {
        message: "database operation failed".to_string(),
        source: Some(Box::new(err)),
    }
}

fn map_sqlite_err(err: rusqlite::Error) -> HubError {
    HubError::Persistence {
        message: "database setup failed".to_string(),
        source: Some(Box::new(err)),
    }
}
