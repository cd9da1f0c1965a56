//! Typed change sets passed to storage updates.

use jiff::civil::Date;

/// Fields to change on a time entry; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryChanges {
    pub date: Option<Date>,
    pub project: Option<String>,
    pub description: Option<String>,
    pub hours: Option<f64>,
}

impl EntryChanges {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.project.is_none()
            && self.description.is_none()
            && self.hours.is_none()
    }
}

/// Fields to change on a project; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}
