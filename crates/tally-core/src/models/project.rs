//! Project model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Color assigned to projects created without one.
pub const DEFAULT_PROJECT_COLOR: &str = "#3b82f6";

/// A client or internal project that time is logged against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: u64,
    /// Unique project name, referenced by time entries and tasks
    pub name: String,
    pub description: String,
    /// Inactive projects are hidden from pickers but keep their history
    pub is_active: bool,
    /// Hex color used when rendering the project
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
