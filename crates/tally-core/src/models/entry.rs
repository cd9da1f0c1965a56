//! Time entry model.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// Hours logged against a project and task description on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeEntry {
    /// Unique identifier for the entry
    pub id: u64,
    /// Day the work was done
    pub date: Date,
    /// Project name
    pub project: String,
    /// Task description; together with the project it names the task
    pub description: String,
    /// Hours worked
    pub hours: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
