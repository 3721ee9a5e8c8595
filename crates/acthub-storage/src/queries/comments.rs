// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comment operations. Comments are append-only.

use rusqlite::params;

use acthub_core::{Comment, HubError};

use crate::database::Database;

/// Append a comment to a post.
///
/// Timestamps are assigned by SQLite so ordering is consistent even when
/// callers race.
pub async fn insert_comment(
    db: &Database,
    post_id: i64,
    user_id: &str,
    content: &str,
) -> Result<i64, HubError> {
    let user_id = user_id.to_string();
    let content = content.to_string();
    let id = db
        .connection()
        .call(move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?1)",
                params![post_id],
                |row| row.get(0),
            )?;
            if !exists {
                return Ok(None);
            }
            conn.execute(
                "INSERT INTO comments (post_id, user_id, content, created_at)
                 VALUES (?1, ?2, ?3, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
                params![post_id, user_id, content],
            )?;
            Ok(Some(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    id.ok_or(HubError::NotFound { id: post_id })
}

/// List a post's comments, oldest first.
pub async fn list_comments(db: &Database, post_id: i64) -> Result<Vec<Comment>, HubError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, post_id, user_id, content, created_at
                 FROM comments WHERE post_id = ?1 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![post_id], |row| {
                Ok(Comment {
                    id: row.get(0)?,
                    post_id: row.get(1)?,
                    user_id: row.get(2)?,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?;
            let mut comments = Vec::new();
            for row in rows {
                comments.push(row?);
            }
            Ok(comments)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
