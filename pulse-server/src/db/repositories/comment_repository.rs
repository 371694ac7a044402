use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use pulse_types::{Comment, NewComment};

use crate::db::query::TableDef;
use crate::db::DbPool;

const COMMENTS: TableDef = TableDef {
    name: "comments",
    id_column: "comment_id",
    columns: &["post_id", "user_id", "message", "like_count", "created_at"],
};

/// Comments are not exposed over HTTP; this repository backs internal use
/// and keeps the comments table exercised.
pub struct CommentRepository {
    pool: DbPool,
}

impl CommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Comment> {
        Ok(Comment {
            comment_id: row.get(0)?,
            post_id: row.get(1)?,
            user_id: row.get(2)?,
            message: row.get(3)?,
            like_count: row.get(4)?,
            created_at: row.get::<_, String>(5)?.parse::<DateTime<Utc>>().unwrap(),
        })
    }

    pub fn create(&self, new: &NewComment) -> Result<Comment> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            &COMMENTS.insert_sql(),
            params![
                new.post_id,
                new.user_id,
                new.message,
                new.like_count,
                created_at.to_rfc3339(),
            ],
        )
        .context("Failed to create comment")?;

        Ok(Comment {
            comment_id: conn.last_insert_rowid(),
            post_id: new.post_id,
            user_id: new.user_id,
            message: new.message.clone(),
            like_count: new.like_count,
            created_at,
        })
    }

    pub fn list(&self) -> Result<Vec<Comment>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&COMMENTS.select_all_sql(false))?;
        let comments = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    pub fn get_by_id(&self, comment_id: i64) -> Result<Option<Comment>> {
        let conn = self.pool.get()?;
        let comment = conn
            .query_row(&COMMENTS.select_by_id_sql(), [comment_id], Self::map_row)
            .optional()?;
        Ok(comment)
    }

    /// Partial update of message and like_count; `None` keeps stored values.
    pub fn update(
        &self,
        comment_id: i64,
        message: Option<&str>,
        like_count: Option<i64>,
    ) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute(
            &COMMENTS.update_sql(&["message", "like_count"]),
            params![message, like_count, comment_id],
        )
        .context("Failed to update comment")?;
        Ok(())
    }

    pub fn delete(&self, comment_id: i64) -> Result<usize> {
        let conn = self.pool.get()?;
        let rows = conn
            .execute(&COMMENTS.delete_sql(), [comment_id])
            .context("Failed to delete comment")?;
        Ok(rows)
    }
}
