use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use pulse_types::{CreateEngagementRequest, Engagement};

use crate::db::query::TableDef;
use crate::db::DbPool;

const ENGAGEMENTS: TableDef = TableDef {
    name: "engagements",
    id_column: "engagement_id",
    columns: &[
        "post_id",
        "likes_count",
        "comments_count",
        "shares_count",
        "video_completion_rate",
    ],
};

pub struct EngagementRepository {
    pool: DbPool,
}

impl EngagementRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Engagement> {
        Ok(Engagement {
            engagement_id: row.get(0)?,
            post_id: row.get(1)?,
            likes_count: row.get(2)?,
            comments_count: row.get(3)?,
            shares_count: row.get(4)?,
            video_completion_rate: row.get(5)?,
        })
    }

    pub fn create(&self, req: &CreateEngagementRequest) -> Result<Engagement> {
        let conn = self.pool.get()?;
        conn.execute(
            &ENGAGEMENTS.insert_sql(),
            params![
                req.post_id,
                req.likes_count,
                req.comments_count,
                req.shares_count,
                req.video_completion_rate,
            ],
        )
        .context("Failed to create engagement")?;

        Ok(Engagement {
            engagement_id: conn.last_insert_rowid(),
            post_id: req.post_id,
            likes_count: req.likes_count,
            comments_count: req.comments_count,
            shares_count: req.shares_count,
            video_completion_rate: req.video_completion_rate,
        })
    }

    pub fn list(&self) -> Result<Vec<Engagement>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&ENGAGEMENTS.select_all_sql(false))?;
        let engagements = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(engagements)
    }

    pub fn get_by_id(&self, engagement_id: i64) -> Result<Option<Engagement>> {
        let conn = self.pool.get()?;
        let engagement = conn
            .query_row(
                &ENGAGEMENTS.select_by_id_sql(),
                [engagement_id],
                Self::map_row,
            )
            .optional()?;
        Ok(engagement)
    }

    /// Partial update of the counters; `None` keeps stored values.
    pub fn update(
        &self,
        engagement_id: i64,
        likes_count: Option<i64>,
        comments_count: Option<i64>,
    ) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute(
            &ENGAGEMENTS.update_sql(&["likes_count", "comments_count"]),
            params![likes_count, comments_count, engagement_id],
        )
        .context("Failed to update engagement")?;
        Ok(())
    }

    pub fn delete(&self, engagement_id: i64) -> Result<usize> {
        let conn = self.pool.get()?;
        let rows = conn
            .execute(&ENGAGEMENTS.delete_sql(), [engagement_id])
            .context("Failed to delete engagement")?;
        Ok(rows)
    }
}
