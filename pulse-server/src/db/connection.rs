use anyhow::{Context, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use super::schema::TABLES;

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling support
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Create a new database connection pool.
    ///
    /// Foreign-key enforcement is off by default in SQLite, so every pooled
    /// connection enables it on open.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy();
        if path_str.trim().eq_ignore_ascii_case(MEMORY_DB_PATH) {
            return Self::in_memory();
        }

        let manager = SqliteConnectionManager::file(path)
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = Pool::new(manager).context("Failed to create database connection pool")?;
        Ok(Self { pool })
    }

    /// Create an in-memory database (used by tests).
    ///
    /// Capped at a single pooled connection: each plain in-memory connection
    /// is its own private database, so a larger pool would hand callers
    /// empty ones.
    pub fn in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory()
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .context("Failed to create in-memory database pool")?;
        Ok(Self { pool })
    }

    /// Create all tables, walking the schema in foreign-key dependency order.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connection()?;
        for (name, ddl) in TABLES {
            conn.execute_batch(ddl)
                .with_context(|| format!("Failed to create table '{name}'"))?;
            tracing::debug!("ensured table '{}'", name);
        }
        Ok(())
    }

    /// Drop all tables in reverse dependency order so no drop ever severs a
    /// foreign key that a remaining table still points at.
    pub fn drop_all(&self) -> Result<()> {
        let conn = self.connection()?;
        for (name, _) in TABLES.iter().rev() {
            conn.execute_batch(&format!("DROP TABLE IF EXISTS {name};"))
                .with_context(|| format!("Failed to drop table '{name}'"))?;
        }
        Ok(())
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .context("Failed to get database connection from pool")
    }
}
