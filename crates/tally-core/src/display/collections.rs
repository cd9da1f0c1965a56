//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper owns its items, exposes slice-like accessors and prints a
//! short message instead of an empty body when there is nothing to show.

use std::{fmt, ops::Index};

use jiff::civil::Date;

use super::datetime::DayLabel;
use crate::models::{Project, Task, TimeEntry};

macro_rules! collection {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        pub struct $name(pub Vec<$item>);

        impl $name {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Reference to the item at `index`.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

collection!(
    /// Newtype wrapper for displaying task lists in their compact form.
    ///
    /// ```rust
    /// use jiff::Timestamp;
    /// use tally_core::{display::Tasks, models::{Task, TaskRecord}};
    ///
    /// let record = TaskRecord {
    ///     project_name: "Client A".to_string(),
    ///     description: "Build API".to_string(),
    ///     budgeted_hours: 10.0,
    ///     notes: String::new(),
    ///     is_closed: false,
    ///     created_at: Timestamp::now(),
    ///     updated_at: Timestamp::now(),
    /// };
    /// let tasks = Tasks(vec![Task::from_record(record, 4.0)]);
    ///
    /// let output = tasks.to_string();
    /// assert!(output.contains("### Client A | Build API (● On track)"));
    /// assert!(output.contains("Billed 4h of 10h, 6h remaining"));
    /// ```
    Tasks,
    Task
);

collection!(
    /// Newtype wrapper for displaying time entries.
    TimeEntries,
    TimeEntry
);

collection!(
    /// Newtype wrapper for displaying projects.
    Projects,
    Project
);

collection!(
    /// Newtype wrapper for displaying holiday dates.
    Holidays,
    Date
);

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.0 {
            task.fmt_summary(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for TimeEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No time entries found.");
        }
        for entry in &self.0 {
            write!(f, "{entry}")?;
        }
        let total: f64 = self.0.iter().map(|e| e.hours).sum();
        writeln!(f, "**Total: {}**", super::Hours(total))
    }
}

impl fmt::Display for Projects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No projects found.");
        }
        for project in &self.0 {
            write!(f, "{project}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Holidays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No holidays found.");
        }
        for date in &self.0 {
            writeln!(f, "- {}", DayLabel(date))?;
        }
        Ok(())
    }
}
