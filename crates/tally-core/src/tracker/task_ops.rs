//! Task operations for the Tracker.

use log::debug;

use super::Tracker;
use crate::{
    budget::validate_hours,
    error::{Result, TallyError},
    models::{Task, TaskFilter, TaskKey},
    params::{ListTasks, TaskRef, UpdateTask},
};

impl Tracker {
    /// Retrieves a task with its billed hours.
    pub async fn get_task(&self, params: &TaskRef) -> Result<Option<Task>> {
        let key = TaskKey::try_from(params)?;
        self.with_database(move |db| db.get_task(&key)).await
    }

    /// Retrieves a task, failing with `TaskNotFound` when it does not exist.
    pub async fn show_task(&self, params: &TaskRef) -> Result<Task> {
        let key = TaskKey::try_from(params)?;
        self.with_database(move |db| {
            db.get_task(&key)?
                .ok_or_else(|| TallyError::TaskNotFound { id: key.id() })
        })
        .await
    }

    /// Returns the task, creating it with no budget and empty notes if
    /// missing.
    pub async fn get_or_create_task(&self, params: &TaskRef) -> Result<Task> {
        let key = TaskKey::try_from(params)?;
        self.with_database(move |db| db.get_or_create_task(&key))
            .await
    }

    /// Updates a task's budget and notes and optionally renames it.
    ///
    /// A rename requires the task to exist and is stored together with the
    /// budget and notes in one transaction. Without a rename, budget and
    /// notes create the task if it is missing.
    pub async fn update_task(&self, params: &UpdateTask) -> Result<Task> {
        let key = TaskKey::new(&params.project, &params.description)?;
        let budgeted_hours = params
            .budgeted_hours
            .map(|hours| validate_hours("budgeted_hours", hours))
            .transpose()?;
        let notes = params.notes.clone();
        let new_key = match params.new_description.as_deref() {
            Some(description) => Some(key.with_description(description)?),
            None => None,
        }
        .filter(|new_key| *new_key != key);

        self.with_database(move |db| match new_key {
            Some(new_key) => db.rename_and_update_task(
                &key,
                &new_key.description,
                budgeted_hours,
                notes.as_deref(),
            ),
            None if budgeted_hours.is_none() && notes.is_none() => {
                debug!("Nothing to update on task {key}");
                db.get_or_create_task(&key)
            }
            None => db.upsert_task(&key, budgeted_hours, notes.as_deref()),
        })
        .await
    }

    /// Renames a task, moving its time entries to the new description.
    pub async fn rename_task(&self, params: &TaskRef, new_description: &str) -> Result<Task> {
        let key = TaskKey::try_from(params)?;
        let new_description = new_description.to_string();
        self.with_database(move |db| db.rename_task(&key, &new_description))
            .await
    }

    /// Deletes a task row. Its time entries are kept.
    pub async fn delete_task(&self, params: &TaskRef) -> Result<Task> {
        let key = TaskKey::try_from(params)?;
        self.with_database(move |db| db.delete_task(&key)).await
    }

    /// Marks a task closed.
    pub async fn close_task(&self, params: &TaskRef) -> Result<Task> {
        let key = TaskKey::try_from(params)?;
        self.with_database(move |db| db.set_task_closed(&key, true))
            .await
    }

    /// Reopens a closed task.
    pub async fn reopen_task(&self, params: &TaskRef) -> Result<Task> {
        let key = TaskKey::try_from(params)?;
        self.with_database(move |db| db.set_task_closed(&key, false))
            .await
    }

    /// Lists tasks ordered by project, then description.
    pub async fn list_tasks(&self, params: &ListTasks) -> Result<Vec<Task>> {
        let filter = TaskFilter::try_from(params)?;
        self.with_database(move |db| db.list_tasks(&filter)).await
    }

    /// Hours logged against a task.
    pub async fn task_hours(&self, params: &TaskRef) -> Result<f64> {
        let key = TaskKey::try_from(params)?;
        self.with_database(move |db| db.sum_hours(&key.project, &key.description))
            .await
    }
}
