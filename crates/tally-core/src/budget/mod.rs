//! Task budget engine.
//!
//! Pure, synchronous logic behind task budgets: the checklist grammar stored
//! in a task's notes ([`notes`]), the completion metric ([`completion`]), the
//! half-hour budget splitter ([`split`]) and the aggregation of stored task
//! fields with billed hours ([`aggregate`]). Nothing here touches storage.

pub mod aggregate;
pub mod completion;
pub mod notes;
pub mod split;

pub use aggregate::BudgetStatus;
pub use completion::completion_percentage;
pub use notes::{ChecklistItem, NotesDocument};
pub use split::distribute;

use crate::error::{Result, TallyError};

/// Rejects negative and non-finite hour values.
pub fn validate_hours(field: &str, hours: f64) -> Result<f64> {
    if !hours.is_finite() {
        return Err(TallyError::invalid_input(field).with_reason("Hours must be a finite number"));
    }
    if hours < 0.0 {
        return Err(TallyError::invalid_input(field).with_reason(format!(
            "Hours must not be negative (got {hours})"
        )));
    }
    Ok(hours)
}
