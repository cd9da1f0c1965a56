//! Project CRUD operations, including the cascading project rename.

use jiff::Timestamp;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::utils::project_from_row;
use crate::{
    error::{DatabaseResultExt, Result, TallyError},
    models::{Project, ProjectChanges, DEFAULT_PROJECT_COLOR, TASK_ID_SEPARATOR},
};

const INSERT_PROJECT_SQL: &str = "INSERT INTO projects (name, description, is_active, color, created_at, updated_at) VALUES (?1, ?2, 1, ?3, ?4, ?4)";
const SELECT_PROJECT_SQL: &str = "SELECT id, name, description, is_active, color, created_at, updated_at FROM projects WHERE id = ?1";
const SELECT_PROJECT_BY_NAME_SQL: &str = "SELECT id, name, description, is_active, color, created_at, updated_at FROM projects WHERE name = ?1";
const LIST_PROJECTS_SQL: &str = "SELECT id, name, description, is_active, color, created_at, updated_at FROM projects WHERE (?1 = 0 OR is_active = 1) ORDER BY name ASC";
const CHECK_PROJECT_NAME_SQL: &str = "SELECT EXISTS(SELECT 1 FROM projects WHERE name = ?1 AND id != ?2)";
const UPDATE_PROJECT_SQL: &str = "UPDATE projects SET name = ?1, description = ?2, color = ?3, is_active = ?4, updated_at = ?5 WHERE id = ?6";
const DELETE_PROJECT_SQL: &str = "DELETE FROM projects WHERE id = ?1";
const COUNT_PROJECT_ENTRIES_SQL: &str = "SELECT COUNT(*) FROM time_entries WHERE project = ?1";
const RENAME_PROJECT_ENTRIES_SQL: &str =
    "UPDATE time_entries SET project = ?2, updated_at = ?3 WHERE project = ?1";
// ?4 is `TASK_ID_SEPARATOR`, so rewritten ids match `TaskKey::id`.
const RENAME_PROJECT_TASKS_SQL: &str = "UPDATE tasks SET project_name = ?2, id = ?2 || ?4 || description, updated_at = ?3 WHERE project_name = ?1";
const FIND_TASK_COLLISION_SQL: &str = "SELECT b.id FROM tasks a JOIN tasks b ON b.project_name = ?2 AND b.description = a.description WHERE a.project_name = ?1 LIMIT 1";

fn select_project(conn: &Connection, id: u64) -> Result<Option<Project>> {
    conn.query_row(SELECT_PROJECT_SQL, params![id as i64], project_from_row)
        .optional()
        .db_context("Failed to query project")
}

fn name_taken(conn: &Connection, name: &str, except_id: u64) -> Result<bool> {
    conn.query_row(
        CHECK_PROJECT_NAME_SQL,
        params![name, except_id as i64],
        |row| row.get(0),
    )
    .db_context("Failed to check project name")
}

fn duplicate_name(name: &str) -> TallyError {
    TallyError::invalid_input("name").with_reason(format!("A project named '{name}' already exists"))
}

impl super::Database {
    /// Creates an active project. Name, description and color must already
    /// be validated.
    pub fn create_project(
        &mut self,
        name: &str,
        description: &str,
        color: Option<&str>,
    ) -> Result<Project> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        if name_taken(&tx, name, 0)? {
            return Err(duplicate_name(name));
        }

        let now = Timestamp::now();
        let color = color.unwrap_or(DEFAULT_PROJECT_COLOR);
        tx.execute(
            INSERT_PROJECT_SQL,
            params![name, description, color, now.to_string()],
        )
        .db_context("Failed to insert project")?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Created project {id} '{name}'");

        Ok(Project {
            id,
            name: name.to_string(),
            description: description.to_string(),
            is_active: true,
            color: color.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a project by its ID.
    pub fn get_project(&self, id: u64) -> Result<Option<Project>> {
        select_project(&self.connection, id)
    }

    /// Retrieves a project by its unique name.
    pub fn get_project_by_name(&self, name: &str) -> Result<Option<Project>> {
        self.connection
            .query_row(SELECT_PROJECT_BY_NAME_SQL, params![name], project_from_row)
            .optional()
            .db_context("Failed to query project")
    }

    /// Lists projects ordered by name.
    pub fn list_projects(&self, active_only: bool) -> Result<Vec<Project>> {
        let mut stmt = self
            .connection
            .prepare(LIST_PROJECTS_SQL)
            .db_context("Failed to prepare query")?;

        let projects = stmt
            .query_map(params![active_only], project_from_row)
            .db_context("Failed to query projects")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read project rows")?;

        Ok(projects)
    }

    /// Applies `changes` to a project.
    ///
    /// A new name is carried over to every time entry and task of the
    /// project in the same transaction. The rename is rejected when another
    /// project has the name, or when a task with the same description already
    /// exists under the new name.
    pub fn update_project(&mut self, id: u64, changes: &ProjectChanges) -> Result<Project> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let current = select_project(&tx, id)?.ok_or(TallyError::ProjectNotFound { id })?;
        let now = Timestamp::now();
        let now_str = now.to_string();

        let name = changes.name.clone().unwrap_or_else(|| current.name.clone());
        if name != current.name {
            if name_taken(&tx, &name, id)? {
                return Err(duplicate_name(&name));
            }
            let collision: Option<String> = tx
                .query_row(
                    FIND_TASK_COLLISION_SQL,
                    params![current.name, name],
                    |row| row.get(0),
                )
                .optional()
                .db_context("Failed to check task identities")?;
            if let Some(task_id) = collision {
                warn!("Rejected rename of project '{}' to '{name}'", current.name);
                return Err(TallyError::TaskConflict { id: task_id });
            }

            let entries = tx
                .execute(RENAME_PROJECT_ENTRIES_SQL, params![current.name, name, now_str])
                .db_context("Failed to rename project time entries")?;
            let tasks = tx
                .execute(
                    RENAME_PROJECT_TASKS_SQL,
                    params![current.name, name, now_str, TASK_ID_SEPARATOR.to_string()],
                )
                .db_context("Failed to rename project tasks")?;
            debug!(
                "Renamed project '{}' to '{name}': {entries} entries, {tasks} tasks",
                current.name
            );
        }

        let updated = Project {
            name,
            description: changes
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            color: changes.color.clone().unwrap_or_else(|| current.color.clone()),
            is_active: changes.is_active.unwrap_or(current.is_active),
            updated_at: now,
            ..current
        };
        tx.execute(
            UPDATE_PROJECT_SQL,
            params![
                updated.name,
                updated.description,
                updated.color,
                updated.is_active,
                now_str,
                id as i64,
            ],
        )
        .db_context("Failed to update project")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(updated)
    }

    /// Deletes a project that no time entry refers to.
    pub fn delete_project(&mut self, id: u64) -> Result<Project> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let project = select_project(&tx, id)?.ok_or(TallyError::ProjectNotFound { id })?;
        let entries: i64 = tx
            .query_row(COUNT_PROJECT_ENTRIES_SQL, params![project.name], |row| {
                row.get(0)
            })
            .db_context("Failed to count project time entries")?;
        if entries > 0 {
            return Err(TallyError::ProjectInUse {
                name: project.name,
                entries: entries as u64,
            });
        }

        tx.execute(DELETE_PROJECT_SQL, params![id as i64])
            .db_context("Failed to delete project")?;
        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Deleted project {id} '{}'", project.name);
        Ok(project)
    }
}
