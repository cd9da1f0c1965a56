//! Markdown rendering of tasks, time entries, projects and reports.
//!
//! Domain models implement `Display` directly (see [`models`]). Lists go
//! through the newtype wrappers in [`collections`], and the outcome of a
//! create, update or delete goes through the wrappers in [`results`]. Both
//! the CLI and the MCP server print these verbatim, so every terminal and
//! tool response shares one format.
//!
//! ```rust
//! use tally_core::display::{Hours, OperationStatus};
//!
//! assert_eq!(Hours(7.5).to_string(), "7.5h");
//! assert_eq!(
//!     OperationStatus::success("Holiday 2024-12-25 added").to_string(),
//!     "Success: Holiday 2024-12-25 added\n"
//! );
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Holidays, Projects, Tasks, TimeEntries};
pub use datetime::{DayLabel, Hours, LocalDateTime, LongDate};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
