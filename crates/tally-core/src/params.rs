//! Parameter structures for tally operations.
//!
//! These structures are shared by every interface (CLI, MCP) and carry only
//! plain values: dates travel as `YYYY-MM-DD` strings and filters as their
//! textual names, and are validated into typed values by
//! [`crate::operations`] before reaching storage. Interface layers wrap them
//! with their own derives (`clap::Args`, a transparent MCP wrapper) and
//! convert with `From`.
//!
//! Enable the `schema` feature to derive `schemars::JsonSchema` for MCP tool
//! schemas.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the record to operate on
    pub id: u64,
}

/// Identifies a task by its project and description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskRef {
    /// Project name
    pub project: String,
    /// Task description
    pub description: String,
}

/// Parameters for updating a task's budget, notes or description.
///
/// A changed `new_description` renames the task and moves its time entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTask {
    /// Project name
    pub project: String,
    /// Current task description
    pub description: String,
    /// New description for the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_description: Option<String>,
    /// Budgeted hours, non-negative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgeted_hours: Option<f64>,
    /// Full notes text, replacing the current notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// An in-progress edit of a task's budget or notes, saved after a quiet
/// period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DraftTask {
    /// Project name
    pub project: String,
    /// Task description
    pub description: String,
    /// Budgeted hours, non-negative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgeted_hours: Option<f64>,
    /// Full notes text, replacing the current notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Parameters for listing tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTasks {
    /// Only tasks of this project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Case-insensitive text the description must contain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Closed filter: open (default), closed or all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Budget filter: has_budget, no_budget or budget_left
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

/// Parameters for appending a checklist item to a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddItem {
    pub project: String,
    pub description: String,
    /// Item text
    pub text: String,
    /// Estimated hours, defaults to 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
}

/// Identifies a checklist item by its zero-based index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ItemRef {
    pub project: String,
    pub description: String,
    /// Zero-based position of the item in the checklist
    pub index: usize,
}

/// Parameters for editing a checklist item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EditItem {
    pub project: String,
    pub description: String,
    /// Zero-based position of the item in the checklist
    pub index: usize,
    /// New item text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New estimated hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
}

/// Parameters for logging time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateEntry {
    /// Day worked, `YYYY-MM-DD`
    pub date: String,
    /// Project name
    pub project: String,
    /// Task description
    pub description: String,
    /// Hours worked
    pub hours: f64,
}

/// Parameters for updating a time entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateEntry {
    /// ID of the entry to update
    pub id: u64,
    /// New date, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
}

/// Parameters for listing time entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListEntries {
    /// First day, `YYYY-MM-DD`; defaults to the start of the current week
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Last day, `YYYY-MM-DD`; defaults to the end of the `from` week
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Only entries of this project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// Parameters for creating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateProject {
    /// Unique project name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hex color, defaults to `#3b82f6`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Parameters for updating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateProject {
    pub id: u64,
    /// New name; entries and tasks follow the rename
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Parameters for listing projects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListProjects {
    /// Only active projects
    #[serde(default)]
    pub active_only: bool,
}

/// A single holiday.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct HolidayDate {
    /// Holiday, `YYYY-MM-DD`
    pub date: String,
}

/// Parameters for listing holidays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListHolidays {
    /// First day, `YYYY-MM-DD`; defaults to January 1 of the current year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Last day, `YYYY-MM-DD`; defaults to December 31 of the `from` year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// Parameters for a weekly summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WeekReport {
    /// Any day of the week, `YYYY-MM-DD`; defaults to today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Parameters for monthly reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MonthReport {
    /// Month, `YYYY-MM`; defaults to the current month
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// Hourly rate for earnings; defaults to the configured rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

/// A signed amount added to an invoice: positive for fees, negative for
/// discounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Adjustment {
    pub description: String,
    pub amount: f64,
}

/// Parameters for generating an invoice for a month.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateInvoice {
    /// Month to bill, `YYYY-MM`
    pub month: String,
    /// Invoice number, `INV-<digits>`
    pub invoice_number: String,
    /// Name of the billed customer
    pub customer: String,
    /// Issue date, `YYYY-MM-DD`; defaults to today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    /// Hourly rate; defaults to the configured rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    /// Days until payment is due; defaults to the configured terms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_days: Option<u32>,
    /// Currency code; defaults to the configured currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Fees and discounts
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
}

fn change(field: &str, value: impl std::fmt::Display) -> String {
    format!("{field}: {value}")
}

impl UpdateTask {
    /// Human-readable list of the fields this update sets.
    pub fn describe_changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(description) = &self.new_description {
            changes.push(change("Description", description));
        }
        if let Some(hours) = self.budgeted_hours {
            changes.push(change("Budget", format!("{hours}h")));
        }
        if self.notes.is_some() {
            changes.push("Notes replaced".to_string());
        }
        changes
    }
}

impl UpdateEntry {
    /// Human-readable list of the fields this update sets.
    pub fn describe_changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(date) = &self.date {
            changes.push(change("Date", date));
        }
        if let Some(project) = &self.project {
            changes.push(change("Project", project));
        }
        if let Some(description) = &self.description {
            changes.push(change("Description", description));
        }
        if let Some(hours) = self.hours {
            changes.push(change("Hours", format!("{hours}h")));
        }
        changes
    }
}

impl UpdateProject {
    /// Human-readable list of the fields this update sets.
    pub fn describe_changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(name) = &self.name {
            changes.push(change("Name", name));
        }
        if let Some(description) = &self.description {
            changes.push(change("Description", description));
        }
        if let Some(color) = &self.color {
            changes.push(change("Color", color));
        }
        if let Some(active) = self.is_active {
            changes.push(change("Status", if active { "active" } else { "inactive" }));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_task_changes() {
        let params = UpdateTask {
            project: "Client A".to_string(),
            description: "API".to_string(),
            new_description: Some("REST API".to_string()),
            budgeted_hours: Some(12.5),
            notes: None,
        };
        assert_eq!(
            params.describe_changes(),
            vec!["Description: REST API", "Budget: 12.5h"]
        );
        assert!(UpdateTask::default().describe_changes().is_empty());
    }

    #[test]
    fn test_describe_project_changes() {
        let params = UpdateProject {
            id: 1,
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(params.describe_changes(), vec!["Status: inactive"]);
    }
}
