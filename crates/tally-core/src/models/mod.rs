//! Data models for tasks, time entries and projects.
//!
//! Tasks are identified by the pair of project name and description, stored
//! as a single `project|description` id. A [`TaskRecord`] is what the
//! database holds; a [`Task`] adds the hours billed against it and the
//! derived remaining hours and checklist completion. Display implementations
//! live in [`crate::display::models`].
//!
//! ```rust
//! use tally_core::models::TaskKey;
//!
//! let key = TaskKey::new(" Client A ", "Build API").unwrap();
//! assert_eq!(key.id(), "Client A|Build API");
//! ```

pub mod entry;
pub mod filters;
pub mod project;
pub mod requests;
pub mod task;


pub use entry::TimeEntry;
pub use filters::{BudgetFilter, ClosedFilter, DateRange, TaskFilter};
pub use project::{Project, DEFAULT_PROJECT_COLOR};
pub use requests::{EntryChanges, ProjectChanges};
pub use task::{validate_project_name, Task, TaskKey, TaskRecord, TASK_ID_SEPARATOR};
