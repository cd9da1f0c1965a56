//! Row conversion helpers shared by the query modules.

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};

use crate::models::{Project, TaskRecord, TimeEntry};

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a `YYYY-MM-DD` date column.
pub(crate) fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Columns: project_name, description, budgeted_hours, notes, is_closed,
/// created_at, updated_at.
pub(crate) fn task_record_from_row(row: &Row<'_>) -> rusqlite::Result<TaskRecord> {
    Ok(TaskRecord {
        project_name: row.get(0)?,
        description: row.get(1)?,
        budgeted_hours: row.get(2)?,
        notes: row.get(3)?,
        is_closed: row.get(4)?,
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}

/// Columns: id, date, project, description, hours, created_at, updated_at.
pub(crate) fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<TimeEntry> {
    Ok(TimeEntry {
        id: row.get::<_, i64>(0)? as u64,
        date: date_column(row, 1)?,
        project: row.get(2)?,
        description: row.get(3)?,
        hours: row.get(4)?,
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}

/// Columns: id, name, description, is_active, color, created_at, updated_at.
pub(crate) fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get::<_, i64>(0)? as u64,
        name: row.get(1)?,
        description: row.get(2)?,
        is_active: row.get(3)?,
        color: row.get(4)?,
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}
