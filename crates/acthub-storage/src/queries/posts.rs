// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post CRUD operations.

use rusqlite::params;

use acthub_core::{HubError, Inserted, NewPost, Post, PostFilter, PostStatus, SortOrder};

use crate::database::Database;

const POST_COLUMNS: &str =
    "id, title, content, sender, recipient, category, action_type, status, source_id, created_at";

/// Insert a post, deduplicating on `source_id`.
///
/// A UNIQUE violation on `source_id` resolves to the existing row's id
/// instead of an error.
pub async fn insert_post(db: &Database, post: &NewPost) -> Result<Inserted, HubError> {
    let post = post.clone();
    db.connection()
        .call(move |conn| {
            let result = conn.execute(
                "INSERT INTO posts (title, content, sender, recipient, category,
                                    action_type, status, source_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    post.title,
                    post.content,
                    post.sender,
                    post.recipient,
                    post.category.to_string(),
                    post.action_type.to_string(),
                    post.status.to_string(),
                    post.source_id,
                    post.created_at,
                ],
            );
            match result {
                Ok(_) => Ok(Inserted::Created(conn.last_insert_rowid())),
                Err(err) if post.source_id.is_some() && is_unique_violation(&err) => {
                    let id = conn.query_row(
                        "SELECT id FROM posts WHERE source_id = ?1",
                        params![post.source_id],
                        |row| row.get(0),
                    )?;
                    Ok(Inserted::Existing(id))
                }
                Err(err) => Err(err.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a post by id.
pub async fn get_post(db: &Database, id: i64) -> Result<Option<Post>, HubError> {
    db.connection()
        .call(move |conn| {
            let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1");
            let mut stmt = conn.prepare(&sql)?;
            match stmt.query_row(params![id], row_to_post) {
                Ok(post) => Ok(Some(post)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List posts matching `filter`, ordered by `sort`.
pub async fn list_posts(
    db: &Database,
    filter: &PostFilter,
    sort: SortOrder,
) -> Result<Vec<Post>, HubError> {
    let filter = filter.clone();
    db.connection()
        .call(move |conn| {
            let mut sql = format!("SELECT {POST_COLUMNS} FROM posts");
            let mut clauses = Vec::new();
            let mut binds: Vec<String> = Vec::new();
            if let Some(category) = filter.category {
                binds.push(category.to_string());
                clauses.push(format!("category = ?{}", binds.len()));
            }
            if let Some(status) = filter.status {
                binds.push(status.to_string());
                clauses.push(format!("status = ?{}", binds.len()));
            }
            if !clauses.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&clauses.join(" AND "));
            }
            sql.push_str(match sort {
                SortOrder::Newest => " ORDER BY created_at DESC, id DESC",
                SortOrder::Oldest => " ORDER BY created_at ASC, id ASC",
                SortOrder::Priority => {
                    " ORDER BY CASE WHEN category = 'Urgent' THEN 0 ELSE 1 END,
                      created_at DESC, id DESC"
                }
            });

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(binds), row_to_post)?;
            let mut posts = Vec::new();
            for row in rows {
                posts.push(row?);
            }
            Ok(posts)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update a post's status. Errors with `NotFound` when no row matches.
pub async fn update_status(db: &Database, id: i64, status: PostStatus) -> Result<(), HubError> {
    let affected = db
        .connection()
        .call(move |conn| {
            let n = conn.execute(
                "UPDATE posts SET status = ?1 WHERE id = ?2",
                params![status.to_string(), id],
            )?;
            Ok(n)
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    if affected == 0 {
        return Err(HubError::NotFound { id });
    }
    Ok(())
}

/// Post counts per category, alphabetical.
pub async fn category_counts(db: &Database) -> Result<Vec<acthub_core::CategoryCount>, HubError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT category, COUNT(*) FROM posts GROUP BY category ORDER BY category",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(acthub_core::CategoryCount {
                    category: row.get(0)?,
                    count: row.get(1)?,
                })
            })?;
            let mut counts = Vec::new();
            for row in rows {
                counts.push(row?);
            }
            Ok(counts)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn row_to_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        sender: row.get(3)?,
        recipient: row.get(4)?,
        category: parse_column(row, 5)?,
        action_type: parse_column(row, 6)?,
        status: parse_column(row, 7)?,
        source_id: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Parse an enum column stored as its display string.
fn parse_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e: T::Err| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
