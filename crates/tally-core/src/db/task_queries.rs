//! Task storage: upserts, the rename protocol and notes read-modify-write.

use jiff::Timestamp;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::{entry_queries::rename_entries_in, utils::task_record_from_row};
use crate::{
    budget::NotesDocument,
    error::{DatabaseResultExt, Result, TallyError},
    models::{ClosedFilter, Task, TaskFilter, TaskKey, TaskRecord},
};

const TASK_COLUMNS: &str =
    "project_name, description, budgeted_hours, notes, is_closed, created_at, updated_at";
const SELECT_TASK_SQL: &str = "SELECT project_name, description, budgeted_hours, notes, is_closed, created_at, updated_at FROM tasks WHERE id = ?1";
const SELECT_TASK_SUMMARY_SQL: &str = "SELECT project_name, description, budgeted_hours, notes, is_closed, created_at, updated_at, hours_billed FROM task_summaries WHERE project_name = ?1 AND description = ?2";
const CHECK_TASK_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)";
const UPSERT_TASK_SQL: &str = "
    INSERT INTO tasks (id, project_name, description, budgeted_hours, notes, is_closed, created_at, updated_at)
    VALUES (?1, ?2, ?3, COALESCE(?4, 0), COALESCE(?5, ''), 0, ?6, ?6)
    ON CONFLICT(id) DO UPDATE SET
        budgeted_hours = COALESCE(?4, budgeted_hours),
        notes = COALESCE(?5, notes),
        updated_at = ?6";
const INSERT_TASK_IF_MISSING_SQL: &str = "
    INSERT OR IGNORE INTO tasks (id, project_name, description, budgeted_hours, notes, is_closed, created_at, updated_at)
    VALUES (?1, ?2, ?3, 0, '', 0, ?4, ?4)";
const INSERT_TASK_SQL: &str = "
    INSERT INTO tasks (id, project_name, description, budgeted_hours, notes, is_closed, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPDATE_TASK_FIELDS_SQL: &str =
    "UPDATE tasks SET budgeted_hours = ?1, notes = ?2, updated_at = ?3 WHERE id = ?4";
const UPDATE_TASK_NOTES_SQL: &str = "UPDATE tasks SET notes = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_TASK_CLOSED_SQL: &str =
    "UPDATE tasks SET is_closed = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";
const SUM_TASK_HOURS_SQL: &str =
    "SELECT COALESCE(SUM(hours), 0) FROM time_entries WHERE project = ?1 AND description = ?2";

/// Loads the stored row for `key`, if any.
pub(crate) fn select_task_record(conn: &Connection, key: &TaskKey) -> Result<Option<TaskRecord>> {
    conn.query_row(SELECT_TASK_SQL, params![key.id()], task_record_from_row)
        .optional()
        .db_context("Failed to query task")
}

/// Sum of entry hours logged against `key`.
pub(crate) fn sum_hours_in(conn: &Connection, project: &str, description: &str) -> Result<f64> {
    conn.query_row(SUM_TASK_HOURS_SQL, params![project, description], |row| {
        row.get(0)
    })
    .db_context("Failed to sum task hours")
}

fn task_exists(conn: &Connection, id: &str) -> Result<bool> {
    conn.query_row(CHECK_TASK_EXISTS_SQL, params![id], |row| row.get(0))
        .db_context("Failed to check task existence")
}

fn insert_if_missing(conn: &Connection, key: &TaskKey, now: &str) -> Result<bool> {
    let inserted = conn
        .execute(
            INSERT_TASK_IF_MISSING_SQL,
            params![key.id(), key.project, key.description, now],
        )
        .db_context("Failed to create task")?;
    Ok(inserted > 0)
}

fn aggregate(conn: &Connection, record: TaskRecord) -> Result<Task> {
    let billed = sum_hours_in(conn, &record.project_name, &record.description)?;
    Ok(Task::from_record(record, billed))
}

impl super::Database {
    /// Retrieves a task with its billed hours.
    pub fn get_task(&self, key: &TaskKey) -> Result<Option<Task>> {
        self.connection
            .query_row(
                SELECT_TASK_SUMMARY_SQL,
                params![key.project, key.description],
                |row| Ok((task_record_from_row(row)?, row.get::<_, f64>(7)?)),
            )
            .optional()
            .db_context("Failed to query task")
            .map(|found| found.map(|(record, billed)| Task::from_record(record, billed)))
    }

    /// Creates or updates a task. Fields passed as `None` keep their stored
    /// value, or default to no budget and empty notes on creation.
    pub fn upsert_task(
        &mut self,
        key: &TaskKey,
        budgeted_hours: Option<f64>,
        notes: Option<&str>,
    ) -> Result<Task> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        tx.execute(
            UPSERT_TASK_SQL,
            params![key.id(), key.project, key.description, budgeted_hours, notes, now],
        )
        .db_context("Failed to upsert task")?;

        let record = select_task_record(&tx, key)?.ok_or_else(|| TallyError::TaskNotFound {
            id: key.id(),
        })?;
        let task = aggregate(&tx, record)?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Upserted task {}", task.id);
        Ok(task)
    }

    /// Returns the task for `key`, creating an empty one first if missing.
    pub fn get_or_create_task(&mut self, key: &TaskKey) -> Result<Task> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        if insert_if_missing(&tx, key, &Timestamp::now().to_string())? {
            debug!("Created task {key}");
        }
        let record = select_task_record(&tx, key)?.ok_or_else(|| TallyError::TaskNotFound {
            id: key.id(),
        })?;
        let task = aggregate(&tx, record)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(task)
    }

    /// Deletes the task row. Time entries logged against it are kept.
    pub fn delete_task(&mut self, key: &TaskKey) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let record = select_task_record(&tx, key)?.ok_or_else(|| TallyError::TaskNotFound {
            id: key.id(),
        })?;
        let task = aggregate(&tx, record)?;
        tx.execute(DELETE_TASK_SQL, params![key.id()])
            .db_context("Failed to delete task")?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Deleted task {}", task.id);
        Ok(task)
    }

    /// Renames a task's description, moving its time entries along.
    ///
    /// Budget, notes, close flag and creation time carry over to the new
    /// identity. See [`Self::rename_and_update_task`].
    pub fn rename_task(&mut self, key: &TaskKey, new_description: &str) -> Result<Task> {
        self.rename_and_update_task(key, new_description, None, None)
    }

    /// Renames a task and applies a budget or notes change to it.
    ///
    /// Runs in a single `IMMEDIATE` transaction: the conflict check, the
    /// entry update, the removal of the old row and the insertion of the new
    /// one with its updated fields either all happen or none do. Fields
    /// passed as `None` carry over unchanged.
    ///
    /// Returns the task under its new identity. Fails with
    /// [`TallyError::TaskNotFound`] when the task does not exist and with
    /// [`TallyError::TaskConflict`] when another task already owns the new
    /// identity.
    pub fn rename_and_update_task(
        &mut self,
        key: &TaskKey,
        new_description: &str,
        budgeted_hours: Option<f64>,
        notes: Option<&str>,
    ) -> Result<Task> {
        let new_key = key.with_description(new_description)?;

        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin rename transaction")?;

        let record = select_task_record(&tx, key)?.ok_or_else(|| TallyError::TaskNotFound {
            id: key.id(),
        })?;
        if budgeted_hours.is_none() && notes.is_none() && new_key == *key {
            return aggregate(&tx, record);
        }

        let budgeted_hours = budgeted_hours.unwrap_or(record.budgeted_hours);
        let notes = notes.map_or_else(|| record.notes.clone(), str::to_string);
        let updated = TaskRecord {
            description: new_key.description.clone(),
            budgeted_hours,
            notes,
            updated_at: Timestamp::now(),
            ..record
        };

        let new_id = new_key.id();
        if new_key == *key {
            tx.execute(
                UPDATE_TASK_FIELDS_SQL,
                params![
                    updated.budgeted_hours,
                    updated.notes,
                    updated.updated_at.to_string(),
                    new_id,
                ],
            )
            .db_context("Failed to update task")?;

            let task = aggregate(&tx, updated)?;
            tx.commit().db_context("Failed to commit transaction")?;
            debug!("Updated task {new_id}");
            return Ok(task);
        }

        if task_exists(&tx, &new_id)? {
            warn!("Rejected rename of {key} to {new_id}: identity already taken");
            return Err(TallyError::TaskConflict { id: new_id });
        }

        let moved = rename_entries_in(&tx, &key.project, &key.description, &new_key.description)?;

        tx.execute(DELETE_TASK_SQL, params![key.id()])
            .db_context("Failed to remove renamed task")?;

        tx.execute(
            INSERT_TASK_SQL,
            params![
                new_id,
                updated.project_name,
                updated.description,
                updated.budgeted_hours,
                updated.notes,
                updated.is_closed,
                updated.created_at.to_string(),
                updated.updated_at.to_string(),
            ],
        )
        .db_context("Failed to insert renamed task")?;

        let task = aggregate(&tx, updated)?;
        tx.commit().db_context("Failed to commit rename")?;

        debug!("Renamed task {key} to {new_id}, moved {moved} time entries");
        Ok(task)
    }

    /// Sets or clears the closed flag of an existing task.
    pub fn set_task_closed(&mut self, key: &TaskKey, closed: bool) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let updated = tx
            .execute(
                UPDATE_TASK_CLOSED_SQL,
                params![closed, Timestamp::now().to_string(), key.id()],
            )
            .db_context("Failed to update task")?;
        if updated == 0 {
            return Err(TallyError::TaskNotFound { id: key.id() });
        }
        let record = select_task_record(&tx, key)?.ok_or_else(|| TallyError::TaskNotFound {
            id: key.id(),
        })?;
        let task = aggregate(&tx, record)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(task)
    }

    /// Lists tasks matching `filter`, ordered by project then description.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut query = format!("SELECT {TASK_COLUMNS}, hours_billed FROM task_summaries");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref project) = filter.project {
            conditions.push("project_name = ?");
            params_vec.push(Box::new(project.clone()));
        }
        match filter.closed {
            ClosedFilter::Open => conditions.push("is_closed = 0"),
            ClosedFilter::Closed => conditions.push("is_closed = 1"),
            ClosedFilter::All => {}
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY project_name ASC, description ASC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let tasks = stmt
            .query_map(&params_refs[..], |row| {
                Ok(Task::from_record(task_record_from_row(row)?, row.get(7)?))
            })
            .db_context("Failed to query tasks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read task rows")?;

        Ok(tasks.into_iter().filter(|task| filter.matches(task)).collect())
    }

    /// Read-modify-write of a task's notes.
    ///
    /// Creates the task if missing, parses its notes, hands the document and
    /// the task budget to `edit`, and stores the re-serialized notes, all in
    /// one `IMMEDIATE` transaction. Nothing is written when `edit` fails.
    pub fn modify_notes<T, F>(&mut self, key: &TaskKey, edit: F) -> Result<(Task, T)>
    where
        F: FnOnce(&mut NotesDocument, f64) -> Result<T>,
    {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        insert_if_missing(&tx, key, &now.to_string())?;
        let record = select_task_record(&tx, key)?.ok_or_else(|| TallyError::TaskNotFound {
            id: key.id(),
        })?;

        let mut document = NotesDocument::parse(&record.notes);
        let outcome = edit(&mut document, record.budgeted_hours)?;
        let notes = document.serialize();

        tx.execute(
            UPDATE_TASK_NOTES_SQL,
            params![notes, now.to_string(), key.id()],
        )
        .db_context("Failed to update task notes")?;

        let task = aggregate(
            &tx,
            TaskRecord {
                notes,
                updated_at: now,
                ..record
            },
        )?;
        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Updated notes of task {}", task.id);
        Ok((task, outcome))
    }
}
