use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use pulse_types::{CreateFollowerRequest, Follower};

use crate::db::query::TableDef;
use crate::db::DbPool;

const FOLLOWERS: TableDef = TableDef {
    name: "followers",
    id_column: "follower_id",
    columns: &["user_id", "follower_user_id"],
};

pub struct FollowerRepository {
    pool: DbPool,
}

impl FollowerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Follower> {
        Ok(Follower {
            follower_id: row.get(0)?,
            user_id: row.get(1)?,
            follower_user_id: row.get(2)?,
        })
    }

    /// Record that `follower_user_id` follows `user_id`. Both sides must be
    /// existing users.
    pub fn create(&self, req: &CreateFollowerRequest) -> Result<Follower> {
        let conn = self.pool.get()?;
        conn.execute(
            &FOLLOWERS.insert_sql(),
            params![req.user_id, req.follower_user_id],
        )
        .context("Failed to create follower relation")?;

        Ok(Follower {
            follower_id: conn.last_insert_rowid(),
            user_id: req.user_id,
            follower_user_id: req.follower_user_id,
        })
    }

    pub fn list(&self) -> Result<Vec<Follower>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&FOLLOWERS.select_all_sql(false))?;
        let followers = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(followers)
    }

    pub fn get_by_id(&self, follower_id: i64) -> Result<Option<Follower>> {
        let conn = self.pool.get()?;
        let follower = conn
            .query_row(&FOLLOWERS.select_by_id_sql(), [follower_id], Self::map_row)
            .optional()?;
        Ok(follower)
    }

    pub fn delete(&self, follower_id: i64) -> Result<usize> {
        let conn = self.pool.get()?;
        let rows = conn
            .execute(&FOLLOWERS.delete_sql(), [follower_id])
            .context("Failed to delete follower relation")?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::UserRepository;
    use crate::db::Database;
    use pulse_types::CreateUserRequest;

    fn setup_with_users() -> (Database, i64, i64) {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("Failed to initialize schema");
        let users = UserRepository::new(db.pool.clone());
        let mut ids = Vec::new();
        for name in ["ada", "grace"] {
            let user = users
                .create(&CreateUserRequest {
                    username: name.to_string(),
                    bio: None,
                    followers_count: 0,
                    following_count: 0,
                    location: None,
                    is_influential: false,
                })
                .expect("create user");
            ids.push(user.user_id);
        }
        (db, ids[0], ids[1])
    }

    #[test]
    fn create_list_delete_roundtrip() {
        let (db, followed, follower) = setup_with_users();
        let repo = FollowerRepository::new(db.pool.clone());

        let relation = repo
            .create(&CreateFollowerRequest {
                user_id: followed,
                follower_user_id: follower,
            })
            .expect("create");

        let listed = repo.list().expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, followed);
        assert_eq!(listed[0].follower_user_id, follower);

        assert_eq!(repo.delete(relation.follower_id).expect("delete"), 1);
        assert!(repo.get_by_id(relation.follower_id).expect("fetch").is_none());
    }

    #[test]
    fn create_with_missing_user_fails() {
        let (db, followed, _) = setup_with_users();
        let repo = FollowerRepository::new(db.pool.clone());
        let result = repo.create(&CreateFollowerRequest {
            user_id: followed,
            follower_user_id: 999,
        });
        assert!(result.is_err());
    }
}
