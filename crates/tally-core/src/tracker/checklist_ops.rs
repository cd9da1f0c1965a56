//! Checklist edits for the Tracker.
//!
//! Each edit is a read-modify-write of the task's notes inside one
//! transaction; a task that does not exist yet is created first.

use super::Tracker;
use crate::{
    budget::{validate_hours, ChecklistItem},
    error::Result,
    models::{Task, TaskKey},
    params::{AddItem, EditItem, ItemRef, TaskRef},
};

impl Tracker {
    /// Appends an unchecked item to the task's checklist.
    pub async fn add_item(&self, params: &AddItem) -> Result<(Task, ChecklistItem)> {
        let key = TaskKey::new(&params.project, &params.description)?;
        let text = params.text.clone();
        let hours = validate_hours("hours", params.hours.unwrap_or(0.0))?;

        self.with_database(move |db| {
            db.modify_notes(&key, |doc, _| doc.add_item(&text, hours).cloned())
        })
        .await
    }

    /// Flips the checked flag of an item, returning the updated item.
    pub async fn toggle_item(&self, params: &ItemRef) -> Result<(Task, ChecklistItem)> {
        let key = TaskKey::new(&params.project, &params.description)?;
        let index = params.index;

        self.with_database(move |db| {
            db.modify_notes(&key, |doc, _| {
                doc.toggle_item(index)?;
                Ok(doc.checklist[index].clone())
            })
        })
        .await
    }

    /// Changes the text and/or hours of an item, returning the updated item.
    pub async fn edit_item(&self, params: &EditItem) -> Result<(Task, ChecklistItem)> {
        let key = TaskKey::new(&params.project, &params.description)?;
        let index = params.index;
        let text = params.text.clone();
        let hours = params.hours;

        self.with_database(move |db| {
            db.modify_notes(&key, |doc, _| {
                doc.edit_item(index, text.as_deref(), hours)?;
                Ok(doc.checklist[index].clone())
            })
        })
        .await
    }

    /// Removes an item, returning it.
    pub async fn remove_item(&self, params: &ItemRef) -> Result<(Task, ChecklistItem)> {
        let key = TaskKey::new(&params.project, &params.description)?;
        let index = params.index;

        self.with_database(move |db| db.modify_notes(&key, |doc, _| doc.remove_item(index)))
            .await
    }

    /// Spreads the task budget evenly over its checklist in half-hour units.
    ///
    /// The returned flag is `false` when there was nothing to split: no
    /// budget or no items. Item hours are left unchanged in that case.
    pub async fn auto_split(&self, params: &TaskRef) -> Result<(Task, bool)> {
        let key = TaskKey::try_from(params)?;

        self.with_database(move |db| {
            db.modify_notes(&key, |doc, budget| Ok(doc.auto_split(budget)))
        })
        .await
    }
}
