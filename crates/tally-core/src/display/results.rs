//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Project, Task, TimeEntry};

/// Wrapper type for displaying the result of create operations.
///
/// ```rust
/// use jiff::{civil::date, Timestamp};
/// use tally_core::{display::CreateResult, models::TimeEntry};
///
/// let entry = TimeEntry {
///     id: 3,
///     date: date(2024, 3, 5),
///     project: "Client A".to_string(),
///     description: "Build API".to_string(),
///     hours: 2.5,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
/// let output = CreateResult::new(entry).to_string();
/// assert!(output.starts_with("Logged 2.5h with ID: 3"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<TimeEntry> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Logged {} with ID: {}",
            super::Hours(self.resource.hours),
            self.resource.id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Project> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created project with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, optionally
/// listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for UpdateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task {}", self.resource.id)?;
        writeln!(f)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<TimeEntry> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated time entry with ID: {}", self.resource.id)?;
        writeln!(f)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<Project> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated project with ID: {}", self.resource.id)?;
        writeln!(f)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted task {}", self.resource.id)?;
        if self.resource.hours_billed > 0.0 {
            writeln!(
                f,
                "\n{} of logged time was kept.",
                super::Hours(self.resource.hours_billed)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for DeleteResult<TimeEntry> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted time entry with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for DeleteResult<Project> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted project {} (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::TaskRecord;

    fn task(billed: f64) -> Task {
        Task::from_record(
            TaskRecord {
                project_name: "Client A".to_string(),
                description: "Build API".to_string(),
                budgeted_hours: 8.0,
                notes: String::new(),
                is_closed: false,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            billed,
        )
    }

    #[test]
    fn test_update_result_lists_changes() {
        let result = UpdateResult::with_changes(
            task(2.0),
            vec!["Budget set to 8h".to_string()],
        );
        let output = result.to_string();

        assert!(output.starts_with("Updated task Client A|Build API\n"));
        assert!(output.contains("Changes made:\n- Budget set to 8h"));
        assert!(output.contains("# Client A | Build API"));

        let plain = UpdateResult::new(task(2.0)).to_string();
        assert!(!plain.contains("Changes made:"));
    }

    #[test]
    fn test_delete_result_mentions_kept_time() {
        assert_eq!(
            DeleteResult::new(task(0.0)).to_string(),
            "Deleted task Client A|Build API\n"
        );
        assert!(DeleteResult::new(task(3.0))
            .to_string()
            .contains("3h of logged time was kept."));
    }
}
