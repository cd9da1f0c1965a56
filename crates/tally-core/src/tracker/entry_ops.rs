//! Time entry operations for the Tracker.

use super::Tracker;
use crate::{
    budget::validate_hours,
    error::{Result, TallyError},
    models::{validate_project_name, DateRange, EntryChanges, TimeEntry},
    operations::{parse_date, required_text, today},
    params::{CreateEntry, Id, ListEntries, UpdateEntry},
    reports::week_bounds,
};

impl Tracker {
    /// Logs hours against a project and task description.
    pub async fn create_entry(&self, params: &CreateEntry) -> Result<TimeEntry> {
        let date = parse_date("date", &params.date)?;
        let project = validate_project_name("project", &params.project)?;
        let description = required_text("description", &params.description)?;
        let hours = validate_hours("hours", params.hours)?;

        self.with_database(move |db| db.create_entry(date, &project, &description, hours))
            .await
    }

    /// Retrieves a time entry by its ID.
    pub async fn get_entry(&self, params: &Id) -> Result<Option<TimeEntry>> {
        let id = params.id;
        self.with_database(move |db| db.get_entry(id)).await
    }

    /// Updates the date, project, description or hours of an entry.
    pub async fn update_entry(&self, params: &UpdateEntry) -> Result<TimeEntry> {
        let id = params.id;
        let changes = EntryChanges {
            date: params
                .date
                .as_deref()
                .map(|date| parse_date("date", date))
                .transpose()?,
            project: params
                .project
                .as_deref()
                .map(|project| validate_project_name("project", project))
                .transpose()?,
            description: params
                .description
                .as_deref()
                .map(|description| required_text("description", description))
                .transpose()?,
            hours: params
                .hours
                .map(|hours| validate_hours("hours", hours))
                .transpose()?,
        };

        self.with_database(move |db| db.update_entry(id, &changes))
            .await
    }

    /// Deletes an entry, returning it.
    pub async fn delete_entry(&self, params: &Id) -> Result<TimeEntry> {
        let id = params.id;
        self.with_database(move |db| db.delete_entry(id)).await
    }

    /// Lists entries in a date range. Without `from` the current week is
    /// listed; without `to` the range ends on the Sunday of the `from` week.
    pub async fn list_entries(&self, params: &ListEntries) -> Result<Vec<TimeEntry>> {
        let range = entry_range(params)?;
        let project = params.project.clone();

        self.with_database(move |db| db.list_entries(&range, project.as_deref()))
            .await
    }
}

fn entry_range(params: &ListEntries) -> Result<DateRange> {
    let start = match params.from.as_deref() {
        Some(from) => parse_date("from", from)?,
        None => week_bounds(today())?.start,
    };
    let end = match params.to.as_deref() {
        Some(to) => parse_date("to", to)?,
        None => week_bounds(start)?.end,
    };
    if end < start {
        return Err(TallyError::invalid_input("to")
            .with_reason(format!("End date {end} is before start date {start}")));
    }
    Ok(DateRange::new(start, end))
}
