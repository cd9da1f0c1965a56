//! Debounced saving of task budget and notes edits.
//!
//! Interactive front ends call [`AutoSaver::schedule`] on every keystroke-level
//! edit. Edits are coalesced per task: each task has a single pending slot
//! that newer edits overwrite field by field, and a worker that writes the
//! slot once no edit has arrived for the debounce window. A task never has
//! more than one write in flight; edits made during a write are saved by the
//! same worker afterwards.
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use tally_core::{autosave::{AutoSaver, PendingEdit}, models::TaskKey, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new().build().await?;
//! let saver = AutoSaver::new(tracker).with_debounce(Duration::from_millis(500));
//!
//! let key = TaskKey::new("Client A", "Build API")?;
//! saver.schedule(key.clone(), PendingEdit::notes("- [ ] Draft")).await;
//! saver.schedule(key, PendingEdit::notes("- [ ] Draft schema (2h)")).await;
//! saver.flush().await;
//! # Ok(())
//! # }
//! ```

use std::{collections::HashMap, sync::Arc, time::Duration};

use log::{debug, warn};
use tokio::{
    sync::{Mutex, Notify},
    time::{sleep, Instant},
};

use crate::{
    budget::validate_hours,
    error::{Result, TallyError},
    models::TaskKey,
    params::{DraftTask, UpdateTask},
    tracker::Tracker,
};

/// Quiet period after the last edit before a task is written.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// Unsaved changes to a task. `None` fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingEdit {
    pub budgeted_hours: Option<f64>,
    pub notes: Option<String>,
}

impl PendingEdit {
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Default::default()
        }
    }

    pub fn budget(hours: f64) -> Self {
        Self {
            budgeted_hours: Some(hours),
            ..Default::default()
        }
    }

    /// Folds a newer edit into this one; newer fields win.
    fn merge(&mut self, newer: PendingEdit) {
        if newer.budgeted_hours.is_some() {
            self.budgeted_hours = newer.budgeted_hours;
        }
        if newer.notes.is_some() {
            self.notes = newer.notes;
        }
    }
}

/// State of one task. A slot exists exactly while its worker runs.
#[derive(Debug)]
struct Slot {
    pending: Option<PendingEdit>,
    last_edit: Instant,
    /// Skip the debounce wait, set by [`AutoSaver::flush`]
    urgent: bool,
}

#[derive(Debug, Default)]
struct Shared {
    slots: Mutex<HashMap<TaskKey, Slot>>,
    /// Wakes workers waiting out the debounce window
    wake: Notify,
    /// Signals that a worker finished and removed its slot
    drained: Notify,
    last_error: Mutex<Option<(TaskKey, String)>>,
}

/// Per-task debounced writer over a [`Tracker`].
#[derive(Debug, Clone)]
pub struct AutoSaver {
    tracker: Tracker,
    debounce: Duration,
    shared: Arc<Shared>,
}

impl AutoSaver {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker,
            debounce: DEFAULT_DEBOUNCE,
            shared: Arc::new(Shared::default()),
        }
    }

    /// Sets the quiet period that must pass before an edit is written.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Queues an edit for `key`, replacing the pending fields it sets.
    pub async fn schedule(&self, key: TaskKey, edit: PendingEdit) {
        let mut slots = self.shared.slots.lock().await;
        if let Some(slot) = slots.get_mut(&key) {
            match slot.pending.as_mut() {
                Some(pending) => pending.merge(edit),
                None => slot.pending = Some(edit),
            }
            slot.last_edit = Instant::now();
            return;
        }

        slots.insert(
            key.clone(),
            Slot {
                pending: Some(edit),
                last_edit: Instant::now(),
                urgent: false,
            },
        );
        debug!("Starting auto-save worker for {key}");
        let saver = self.clone();
        tokio::spawn(async move { saver.run_worker(key).await });
    }

    /// Validates a draft and queues it, returning the task it applies to.
    pub async fn schedule_draft(&self, params: &DraftTask) -> Result<TaskKey> {
        let key = TaskKey::new(&params.project, &params.description)?;
        let budgeted_hours = params
            .budgeted_hours
            .map(|hours| validate_hours("budgeted_hours", hours))
            .transpose()?;
        let edit = PendingEdit {
            budgeted_hours,
            notes: params.notes.clone(),
        };
        if edit == PendingEdit::default() {
            return Err(TallyError::invalid_input("draft")
                .with_reason("A draft needs budgeted_hours or notes"));
        }

        self.schedule(key.clone(), edit).await;
        Ok(key)
    }

    /// Number of tasks with unsaved edits or a write in flight.
    pub async fn pending_count(&self) -> usize {
        self.shared.slots.lock().await.len()
    }

    /// The most recent failed write, if any.
    pub async fn last_error(&self) -> Option<(TaskKey, String)> {
        self.shared.last_error.lock().await.clone()
    }

    /// Writes every pending edit without waiting for the debounce window and
    /// waits until all workers have finished.
    pub async fn flush(&self) {
        loop {
            let drained = self.shared.drained.notified();
            tokio::pin!(drained);
            drained.as_mut().enable();

            {
                let mut slots = self.shared.slots.lock().await;
                if slots.is_empty() {
                    return;
                }
                for slot in slots.values_mut() {
                    slot.urgent = true;
                }
            }
            self.shared.wake.notify_waiters();
            drained.await;
        }
    }

    async fn run_worker(self, key: TaskKey) {
        loop {
            self.wait_for_quiet(&key).await;

            let edit = {
                let mut slots = self.shared.slots.lock().await;
                let Some(slot) = slots.get_mut(&key) else {
                    return;
                };
                match slot.pending.take() {
                    Some(edit) => edit,
                    None => {
                        slots.remove(&key);
                        self.shared.drained.notify_waiters();
                        return;
                    }
                }
            };

            if let Err(e) = self.write(&key, edit).await {
                warn!("Auto-save of {key} failed: {e}");
                *self.shared.last_error.lock().await = Some((key.clone(), e.to_string()));
            }
        }
    }

    async fn wait_for_quiet(&self, key: &TaskKey) {
        loop {
            let wake = self.shared.wake.notified();
            tokio::pin!(wake);
            wake.as_mut().enable();

            let remaining = {
                let slots = self.shared.slots.lock().await;
                match slots.get(key) {
                    Some(slot) if !slot.urgent => {
                        self.debounce.saturating_sub(slot.last_edit.elapsed())
                    }
                    _ => Duration::ZERO,
                }
            };
            if remaining.is_zero() {
                return;
            }

            tokio::select! {
                () = sleep(remaining) => {}
                () = &mut wake => {}
            }
        }
    }

    async fn write(&self, key: &TaskKey, edit: PendingEdit) -> Result<()> {
        let params = UpdateTask {
            project: key.project.clone(),
            description: key.description.clone(),
            new_description: None,
            budgeted_hours: edit.budgeted_hours,
            notes: edit.notes,
        };
        self.tracker.update_task(&params).await?;
        debug!("Auto-saved {key}");
        Ok(())
    }
}
