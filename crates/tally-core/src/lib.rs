//! Core library for the tally timesheet tracker.
//!
//! Tracks hours against task budgets. A task is a project name plus a
//! description, carrying a budget in hours and free-form notes. Notes double
//! as a checklist: lines like `- [x] Draft schema (2h)` are parsed into items
//! whose hours drive a completion percentage. Time entries logged against the
//! same project and description are summed into the task's billed hours.
//!
//! On top of that the crate keeps projects and holidays, builds weekly and
//! monthly reports, and turns a month of billed time into an invoice.
//!
//! # Layout
//!
//! - [`budget`]: checklist parsing, completion and budget classification
//! - [`db`]: SQLite storage
//! - [`tracker`]: async facade used by the CLI and the MCP server
//! - [`autosave`]: debounced writes for interactive editing
//! - [`reports`] and [`invoice`]: period summaries and billing
//! - [`display`]: markdown rendering of everything above
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tally_core::{params::{AddItem, CreateEntry, TaskRef}, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path("tally.db")
//!     .build()
//!     .await?;
//!
//! tracker
//!     .add_item(&AddItem {
//!         project: "Client A".to_string(),
//!         description: "Build API".to_string(),
//!         text: "Draft schema".to_string(),
//!         hours: Some(2.0),
//!     })
//!     .await?;
//! tracker
//!     .create_entry(&CreateEntry {
//!         date: "2024-03-05".to_string(),
//!         project: "Client A".to_string(),
//!         description: "Build API".to_string(),
//!         hours: 1.5,
//!     })
//!     .await?;
//!
//! let task = tracker
//!     .show_task(&TaskRef {
//!         project: "Client A".to_string(),
//!         description: "Build API".to_string(),
//!     })
//!     .await?;
//! println!("{task}");
//! # Ok(())
//! # }
//! ```

pub mod autosave;
pub mod budget;
pub mod db;
pub mod display;
pub mod error;
pub mod invoice;
pub mod models;
pub mod operations;
pub mod params;
pub mod reports;
pub mod tracker;

pub use autosave::{AutoSaver, PendingEdit};
pub use budget::{BudgetStatus, ChecklistItem, NotesDocument};
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Holidays, OperationStatus, Projects, Tasks, TimeEntries,
    UpdateResult,
};
pub use error::{Result, TallyError};
pub use invoice::{BillingSettings, Invoice, Issuer};
pub use models::{Project, Task, TaskFilter, TaskKey, TimeEntry};
pub use reports::{MonthlyStatement, PeriodSummary};
pub use tracker::{Tracker, TrackerBuilder};
