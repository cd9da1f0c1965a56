//! SQLite storage for tasks, time entries, projects and holidays.
//!
//! Every [`Database`] owns one connection. Connections run in WAL mode with
//! a busy timeout, and multi-statement writes use `IMMEDIATE` transactions
//! so concurrent writers serialize on the write lock instead of failing
//! half way.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod entry_queries;
pub mod holiday_queries;
pub mod migrations;
pub mod project_queries;
pub mod task_queries;
pub mod utils;

/// How long a connection waits for a competing writer.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and brings its schema
    /// up to date.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;
        connection
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .db_context("Failed to enable WAL journal mode")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
