use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use pulse_types::{CreateUserRequest, User};

use crate::db::query::TableDef;
use crate::db::DbPool;

const USERS: TableDef = TableDef {
    name: "users",
    id_column: "user_id",
    columns: &[
        "username",
        "bio",
        "followers_count",
        "following_count",
        "location",
        "is_influential",
    ],
};

pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            user_id: row.get(0)?,
            username: row.get(1)?,
            bio: row.get(2)?,
            followers_count: row.get(3)?,
            following_count: row.get(4)?,
            location: row.get(5)?,
            is_influential: row.get::<_, i64>(6)? != 0,
        })
    }

    /// Insert a new user and return the stored row.
    pub fn create(&self, req: &CreateUserRequest) -> Result<User> {
        let conn = self.pool.get()?;
        conn.execute(
            &USERS.insert_sql(),
            params![
                req.username,
                req.bio,
                req.followers_count,
                req.following_count,
                req.location,
                req.is_influential,
            ],
        )
        .context("Failed to create user")?;

        Ok(User {
            user_id: conn.last_insert_rowid(),
            username: req.username.clone(),
            bio: req.bio.clone(),
            followers_count: req.followers_count,
            following_count: req.following_count,
            location: req.location.clone(),
            is_influential: req.is_influential,
        })
    }

    /// List users, capped at `limit`.
    pub fn list(&self, limit: i64) -> Result<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&USERS.select_all_sql(true))?;
        let users = stmt
            .query_map([limit], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    pub fn get_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let conn = self.pool.get()?;
        let user = conn
            .query_row(&USERS.select_by_id_sql(), [user_id], Self::map_row)
            .optional()?;
        Ok(user)
    }

    /// Application-level uniqueness check; the schema UNIQUE constraint is
    /// the backstop.
    pub fn username_exists(&self, username: &str) -> Result<bool> {
        let conn = self.pool.get()?;
        let count: i64 =
            conn.query_row(&USERS.exists_sql("username"), [username], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Partial update; `None` fields keep their stored values.
    pub fn update(&self, user_id: i64, username: Option<&str>, bio: Option<&str>) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute(
            &USERS.update_sql(&["username", "bio"]),
            params![username, bio, user_id],
        )
        .context("Failed to update user")?;
        Ok(())
    }

    pub fn delete(&self, user_id: i64) -> Result<usize> {
        let conn = self.pool.get()?;
        let rows = conn
            .execute(&USERS.delete_sql(), [user_id])
            .context("Failed to delete user")?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn setup() -> Database {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("Failed to initialize schema");
        db
    }

    fn sample_user(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            bio: Some("hello".to_string()),
            followers_count: 12,
            following_count: 3,
            location: Some("Lisbon".to_string()),
            is_influential: true,
        }
    }

    #[test]
    fn create_then_fetch_returns_same_fields() {
        let db = setup();
        let repo = UserRepository::new(db.pool.clone());

        let created = repo.create(&sample_user("ada")).expect("create");
        let fetched = repo
            .get_by_id(created.user_id)
            .expect("fetch")
            .expect("user should exist");

        assert_eq!(fetched.username, "ada");
        assert_eq!(fetched.bio.as_deref(), Some("hello"));
        assert_eq!(fetched.followers_count, 12);
        assert_eq!(fetched.following_count, 3);
        assert_eq!(fetched.location.as_deref(), Some("Lisbon"));
        assert!(fetched.is_influential);
    }

    #[test]
    fn list_respects_limit() {
        let db = setup();
        let repo = UserRepository::new(db.pool.clone());
        for name in ["a", "b", "c", "d"] {
            repo.create(&sample_user(name)).expect("create");
        }

        assert_eq!(repo.list(2).expect("list").len(), 2);
        assert_eq!(repo.list(10).expect("list").len(), 4);
    }

    #[test]
    fn username_exists_after_create() {
        let db = setup();
        let repo = UserRepository::new(db.pool.clone());
        assert!(!repo.username_exists("ada").expect("check"));
        repo.create(&sample_user("ada")).expect("create");
        assert!(repo.username_exists("ada").expect("check"));
    }

    #[test]
    fn duplicate_username_violates_unique_constraint() {
        let db = setup();
        let repo = UserRepository::new(db.pool.clone());
        repo.create(&sample_user("ada")).expect("create");
        assert!(repo.create(&sample_user("ada")).is_err());
    }

    #[test]
    fn partial_update_keeps_unset_columns() {
        let db = setup();
        let repo = UserRepository::new(db.pool.clone());
        let created = repo.create(&sample_user("ada")).expect("create");

        repo.update(created.user_id, None, Some("new bio"))
            .expect("update");

        let fetched = repo
            .get_by_id(created.user_id)
            .expect("fetch")
            .expect("user should exist");
        assert_eq!(fetched.username, "ada");
        assert_eq!(fetched.bio.as_deref(), Some("new bio"));
    }

    #[test]
    fn delete_removes_row() {
        let db = setup();
        let repo = UserRepository::new(db.pool.clone());
        let created = repo.create(&sample_user("ada")).expect("create");

        assert_eq!(repo.delete(created.user_id).expect("delete"), 1);
        assert!(repo.get_by_id(created.user_id).expect("fetch").is_none());
        assert_eq!(repo.delete(created.user_id).expect("delete"), 0);
    }
}
