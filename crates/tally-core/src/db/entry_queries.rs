//! Time entry CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::{task_queries::sum_hours_in, utils::entry_from_row};
use crate::{
    error::{DatabaseResultExt, Result, TallyError},
    models::{DateRange, EntryChanges, TimeEntry},
};

const INSERT_ENTRY_SQL: &str = "INSERT INTO time_entries (date, project, description, hours, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)";
const SELECT_ENTRY_SQL: &str = "SELECT id, date, project, description, hours, created_at, updated_at FROM time_entries WHERE id = ?1";
const UPDATE_ENTRY_SQL: &str = "UPDATE time_entries SET date = ?1, project = ?2, description = ?3, hours = ?4, updated_at = ?5 WHERE id = ?6";
const DELETE_ENTRY_SQL: &str = "DELETE FROM time_entries WHERE id = ?1";
const LIST_ENTRIES_SQL: &str = "SELECT id, date, project, description, hours, created_at, updated_at FROM time_entries WHERE date >= ?1 AND date <= ?2 AND (?3 IS NULL OR project = ?3) ORDER BY date ASC, created_at ASC, id ASC";
const RENAME_ENTRIES_SQL: &str = "UPDATE time_entries SET description = ?3, updated_at = ?4 WHERE project = ?1 AND description = ?2";

/// Moves every entry of `(project, old)` to `(project, new)`.
pub(crate) fn rename_entries_in(
    conn: &Connection,
    project: &str,
    old: &str,
    new: &str,
) -> Result<usize> {
    conn.execute(
        RENAME_ENTRIES_SQL,
        params![project, old, new, Timestamp::now().to_string()],
    )
    .db_context("Failed to rename time entries")
}

fn select_entry(conn: &Connection, id: u64) -> Result<Option<TimeEntry>> {
    conn.query_row(SELECT_ENTRY_SQL, params![id as i64], entry_from_row)
        .optional()
        .db_context("Failed to query time entry")
}

impl super::Database {
    /// Total hours logged against a project and description.
    pub fn sum_hours(&self, project: &str, description: &str) -> Result<f64> {
        sum_hours_in(&self.connection, project, description)
    }

    /// Moves all entries of a task to a new description, returning how many
    /// entries changed.
    pub fn rename_entries_description(
        &mut self,
        project: &str,
        old: &str,
        new: &str,
    ) -> Result<usize> {
        rename_entries_in(&self.connection, project, old, new)
    }

    /// Logs a new time entry. Inputs must already be validated.
    pub fn create_entry(
        &mut self,
        date: Date,
        project: &str,
        description: &str,
        hours: f64,
    ) -> Result<TimeEntry> {
        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_ENTRY_SQL,
                params![date.to_string(), project, description, hours, now.to_string()],
            )
            .db_context("Failed to insert time entry")?;
        let id = self.connection.last_insert_rowid() as u64;
        debug!("Created time entry {id} for {project}|{description} on {date}");

        Ok(TimeEntry {
            id,
            date,
            project: project.to_string(),
            description: description.to_string(),
            hours,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a time entry by its ID.
    pub fn get_entry(&self, id: u64) -> Result<Option<TimeEntry>> {
        select_entry(&self.connection, id)
    }

    /// Applies `changes` to an entry and returns the updated entry.
    pub fn update_entry(&mut self, id: u64, changes: &EntryChanges) -> Result<TimeEntry> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = select_entry(&tx, id)?.ok_or(TallyError::EntryNotFound { id })?;
        if changes.is_empty() {
            return Ok(current);
        }

        let updated = TimeEntry {
            date: changes.date.unwrap_or(current.date),
            project: changes.project.clone().unwrap_or(current.project),
            description: changes.description.clone().unwrap_or(current.description),
            hours: changes.hours.unwrap_or(current.hours),
            updated_at: Timestamp::now(),
            ..current
        };
        tx.execute(
            UPDATE_ENTRY_SQL,
            params![
                updated.date.to_string(),
                updated.project,
                updated.description,
                updated.hours,
                updated.updated_at.to_string(),
                id as i64,
            ],
        )
        .db_context("Failed to update time entry")?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Updated time entry {id}");
        Ok(updated)
    }

    /// Deletes an entry, returning what was removed.
    pub fn delete_entry(&mut self, id: u64) -> Result<TimeEntry> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let entry = select_entry(&tx, id)?.ok_or(TallyError::EntryNotFound { id })?;
        tx.execute(DELETE_ENTRY_SQL, params![id as i64])
            .db_context("Failed to delete time entry")?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Deleted time entry {id}");
        Ok(entry)
    }

    /// Entries within an inclusive date range, optionally for one project,
    /// ordered by date and then creation.
    pub fn list_entries(&self, range: &DateRange, project: Option<&str>) -> Result<Vec<TimeEntry>> {
        let mut stmt = self
            .connection
            .prepare(LIST_ENTRIES_SQL)
            .db_context("Failed to prepare query")?;

        let entries = stmt
            .query_map(
                params![range.start.to_string(), range.end.to_string(), project],
                entry_from_row,
            )
            .db_context("Failed to query time entries")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read time entry rows")?;

        Ok(entries)
    }
}
