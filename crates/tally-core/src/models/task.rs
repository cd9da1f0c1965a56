//! Task identity, stored task rows and the aggregated task view.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};

/// Separator between project and description in a task id.
pub const TASK_ID_SEPARATOR: char = '|';

/// Trims a project name, rejecting blank names and names containing
/// [`TASK_ID_SEPARATOR`].
pub fn validate_project_name(field: &str, name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TallyError::invalid_input(field).with_reason("Project cannot be empty"));
    }
    if name.contains(TASK_ID_SEPARATOR) {
        return Err(TallyError::invalid_input(field).with_reason(format!(
            "Project name cannot contain '{TASK_ID_SEPARATOR}'"
        )));
    }
    Ok(name.to_string())
}

/// Composite identity of a task: the project it belongs to and its
/// description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskKey {
    pub project: String,
    pub description: String,
}

impl TaskKey {
    /// Builds a key, trimming both parts and rejecting blank ones.
    ///
    /// The project may not contain [`TASK_ID_SEPARATOR`]; the description
    /// may, since everything after the first separator in an id belongs to
    /// it.
    pub fn new(project: impl AsRef<str>, description: impl AsRef<str>) -> Result<Self> {
        let project = validate_project_name("project", project.as_ref())?;
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(TallyError::invalid_input("description")
                .with_reason("Description cannot be empty"));
        }
        Ok(Self {
            project,
            description: description.to_string(),
        })
    }

    /// Materialized id, `project|description`.
    pub fn id(&self) -> String {
        format!("{}{TASK_ID_SEPARATOR}{}", self.project, self.description)
    }

    /// Same project, different description.
    pub fn with_description(&self, description: impl AsRef<str>) -> Result<Self> {
        Self::new(&self.project, description)
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A task row as persisted, without derived fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRecord {
    pub project_name: String,
    pub description: String,
    pub budgeted_hours: f64,
    pub notes: String,
    pub is_closed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TaskRecord {
    /// Identity key of this row.
    pub fn key(&self) -> TaskKey {
        TaskKey {
            project: self.project_name.clone(),
            description: self.description.clone(),
        }
    }
}

/// A task with its billing aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// `project|description`
    pub id: String,
    pub project_name: String,
    pub description: String,
    pub budgeted_hours: f64,
    pub notes: String,
    pub is_closed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Sum of time entry hours logged against this task
    pub hours_billed: f64,
    /// Budget minus billed hours; negative when over budget
    pub hours_remaining: f64,
    /// Checklist completion, absent when the checklist has no hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_percentage: Option<f64>,
}

impl Task {
    /// Identity key of this task.
    pub fn key(&self) -> TaskKey {
        TaskKey {
            project: self.project_name.clone(),
            description: self.description.clone(),
        }
    }
}
