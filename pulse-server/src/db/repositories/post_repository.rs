use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use pulse_types::{CreatePostRequest, Post};

use crate::db::query::TableDef;
use crate::db::DbPool;

const POSTS: TableDef = TableDef {
    name: "posts",
    id_column: "post_id",
    columns: &["user_id", "media_type", "media_url", "caption", "created_at"],
};

pub struct PostRepository {
    pool: DbPool,
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Post> {
        Ok(Post {
            post_id: row.get(0)?,
            user_id: row.get(1)?,
            media_type: row.get(2)?,
            media_url: row.get(3)?,
            caption: row.get(4)?,
            created_at: row.get::<_, String>(5)?.parse::<DateTime<Utc>>().unwrap(),
        })
    }

    /// Insert a new post and return the stored row. The foreign key to
    /// `users` is enforced by SQLite; a missing user surfaces as a
    /// constraint violation.
    pub fn create(&self, req: &CreatePostRequest) -> Result<Post> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            &POSTS.insert_sql(),
            params![
                req.user_id,
                req.media_type,
                req.media_url,
                req.caption,
                created_at.to_rfc3339(),
            ],
        )
        .context("Failed to create post")?;

        Ok(Post {
            post_id: conn.last_insert_rowid(),
            user_id: req.user_id,
            media_type: req.media_type.clone(),
            media_url: req.media_url.clone(),
            caption: req.caption.clone(),
            created_at,
        })
    }

    pub fn list(&self) -> Result<Vec<Post>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&POSTS.select_all_sql(false))?;
        let posts = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    pub fn get_by_id(&self, post_id: i64) -> Result<Option<Post>> {
        let conn = self.pool.get()?;
        let post = conn
            .query_row(&POSTS.select_by_id_sql(), [post_id], Self::map_row)
            .optional()?;
        Ok(post)
    }

    /// Partial update of the caption; `None` keeps the stored value.
    pub fn update(&self, post_id: i64, caption: Option<&str>) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute(&POSTS.update_sql(&["caption"]), params![caption, post_id])
            .context("Failed to update post")?;
        Ok(())
    }

    pub fn delete(&self, post_id: i64) -> Result<usize> {
        let conn = self.pool.get()?;
        let rows = conn
            .execute(&POSTS.delete_sql(), [post_id])
            .context("Failed to delete post")?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::UserRepository;
    use crate::db::Database;
    use pulse_types::CreateUserRequest;

    fn setup_with_user() -> (Database, i64) {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("Failed to initialize schema");
        let users = UserRepository::new(db.pool.clone());
        let user = users
            .create(&CreateUserRequest {
                username: "ada".to_string(),
                bio: None,
                followers_count: 0,
                following_count: 0,
                location: None,
                is_influential: false,
            })
            .expect("create user");
        (db, user.user_id)
    }

    fn sample_post(user_id: i64) -> CreatePostRequest {
        CreatePostRequest {
            user_id,
            media_type: "image".to_string(),
            media_url: "https://cdn.example.com/a.jpg".to_string(),
            caption: Some("first".to_string()),
        }
    }

    #[test]
    fn create_then_fetch_roundtrips() {
        let (db, user_id) = setup_with_user();
        let repo = PostRepository::new(db.pool.clone());

        let created = repo.create(&sample_post(user_id)).expect("create");
        let fetched = repo
            .get_by_id(created.post_id)
            .expect("fetch")
            .expect("post should exist");

        assert_eq!(fetched.user_id, user_id);
        assert_eq!(fetched.media_type, "image");
        assert_eq!(fetched.caption.as_deref(), Some("first"));
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[test]
    fn create_with_missing_user_fails() {
        let (db, _) = setup_with_user();
        let repo = PostRepository::new(db.pool.clone());
        assert!(repo.create(&sample_post(999)).is_err());
    }

    #[test]
    fn update_caption_keeps_other_columns() {
        let (db, user_id) = setup_with_user();
        let repo = PostRepository::new(db.pool.clone());
        let created = repo.create(&sample_post(user_id)).expect("create");

        repo.update(created.post_id, Some("edited")).expect("update");
        let fetched = repo
            .get_by_id(created.post_id)
            .expect("fetch")
            .expect("post should exist");
        assert_eq!(fetched.caption.as_deref(), Some("edited"));
        assert_eq!(fetched.media_url, created.media_url);

        // None leaves the caption alone
        repo.update(created.post_id, None).expect("update");
        let fetched = repo
            .get_by_id(created.post_id)
            .expect("fetch")
            .expect("post should exist");
        assert_eq!(fetched.caption.as_deref(), Some("edited"));
    }

    #[test]
    fn list_and_delete() {
        let (db, user_id) = setup_with_user();
        let repo = PostRepository::new(db.pool.clone());
        let first = repo.create(&sample_post(user_id)).expect("create");
        repo.create(&sample_post(user_id)).expect("create");

        assert_eq!(repo.list().expect("list").len(), 2);
        assert_eq!(repo.delete(first.post_id).expect("delete"), 1);
        assert_eq!(repo.list().expect("list").len(), 1);
    }
}
