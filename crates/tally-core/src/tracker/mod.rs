//! High-level asynchronous API over the tally database.
//!
//! [`Tracker`] is the entry point used by the CLI and the MCP server. Every
//! operation validates its parameters, then opens a fresh connection on a
//! blocking thread and runs the storage call there, so callers never block
//! the async runtime on SQLite.
//!
//! ```text
//! params ──▶ validation (operations) ──▶ spawn_blocking ──▶ Database
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: creates [`Tracker`] instances (database path, billing)
//! - [`task_ops`]: task lookup, budgets, notes, rename, close and listing
//! - [`checklist_ops`]: checklist edits inside a task's notes
//! - [`entry_ops`]: time entries
//! - [`project_ops`]: projects and holidays
//! - [`report_ops`]: weekly and monthly reports and invoices
//!
//! ```rust,no_run
//! use tally_core::{params::CreateEntry, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path("/tmp/tally.db")
//!     .build()
//!     .await?;
//!
//! tracker
//!     .create_entry(&CreateEntry {
//!         date: "2024-03-11".to_string(),
//!         project: "Client A".to_string(),
//!         description: "Build API".to_string(),
//!         hours: 2.5,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, TallyError},
    invoice::BillingSettings,
};

pub mod builder;
pub mod checklist_ops;
pub mod entry_ops;
pub mod project_ops;
pub mod report_ops;
pub mod task_ops;

#[cfg(test)]
mod tests;

pub use builder::TrackerBuilder;

/// Main interface for tasks, time entries, projects and reports.
#[derive(Debug, Clone)]
pub struct Tracker {
    pub(crate) db_path: PathBuf,
    pub(crate) billing: BillingSettings,
}

impl Tracker {
    pub(crate) fn new(db_path: PathBuf, billing: BillingSettings) -> Self {
        Self { db_path, billing }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Billing defaults used by reports and invoices.
    pub fn billing(&self) -> &BillingSettings {
        &self.billing
    }

    /// Runs `op` against a fresh connection on the blocking thread pool.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| TallyError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
