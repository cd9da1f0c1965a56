//! Checklist grammar for the task notes field.
//!
//! A task's notes are stored as a single newline-joined string. Lines of the
//! form `- [ ] text (2h)` or `- [x] text (1.5h)` are checklist items; every
//! other non-blank line is free text. The grammar is a persisted format, so
//! existing notes must keep parsing the same way.
//!
//! ```rust
//! use tally_core::budget::NotesDocument;
//!
//! let doc = NotesDocument::parse("- [x] Design mockups (2h)\n- [ ] Build API (3.5h)\nmisc note");
//! assert_eq!(doc.checklist.len(), 2);
//! assert_eq!(doc.free_text, vec!["misc note".to_string()]);
//! assert_eq!(
//!     doc.serialize(),
//!     "- [x] Design mockups (2h)\n- [ ] Build API (3.5h)\nmisc note"
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{completion_percentage, distribute, validate_hours};
use crate::error::{Result, TallyError};

/// One line of structured work inside a task's notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    /// Item text, never blank
    pub text: String,
    /// Whether the item is done
    pub checked: bool,
    /// Estimated hours for the item
    pub hours: f64,
    /// Zero-based position within the checklist
    pub position: usize,
}

/// Parsed form of a task's notes: checklist items plus free-text lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NotesDocument {
    pub checklist: Vec<ChecklistItem>,
    pub free_text: Vec<String>,
}

impl NotesDocument {
    /// Parses a notes string. Never fails: anything that is not a well-formed
    /// checklist line is kept as free text.
    pub fn parse(notes: &str) -> Self {
        let mut doc = Self::default();
        for line in notes.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_item(line) {
                Some((text, checked, hours)) => {
                    let position = doc.checklist.len();
                    doc.checklist.push(ChecklistItem {
                        text,
                        checked,
                        hours,
                        position,
                    });
                }
                None => doc.free_text.push(line.to_string()),
            }
        }
        doc
    }

    /// Serializes checklist items first, each with an explicit hours suffix,
    /// followed by the free-text lines in order.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Sum of all item hours.
    pub fn total_hours(&self) -> f64 {
        self.checklist.iter().map(|item| item.hours).sum()
    }

    /// Sum of checked item hours.
    pub fn completed_hours(&self) -> f64 {
        self.checklist
            .iter()
            .filter(|item| item.checked)
            .map(|item| item.hours)
            .sum()
    }

    /// Completion percentage of the checklist, `None` when there are no hours.
    pub fn completion_percentage(&self) -> Option<f64> {
        completion_percentage(&self.checklist)
    }

    /// Appends an unchecked item.
    pub fn add_item(&mut self, text: &str, hours: f64) -> Result<&ChecklistItem> {
        let text = validate_item_text(text)?;
        validate_hours("hours", hours)?;
        let position = self.checklist.len();
        self.checklist.push(ChecklistItem {
            text,
            checked: false,
            hours,
            position,
        });
        Ok(&self.checklist[position])
    }

    /// Flips the checked flag of the item at `index`, returning the new value.
    pub fn toggle_item(&mut self, index: usize) -> Result<bool> {
        let item = self.item_mut(index)?;
        item.checked = !item.checked;
        Ok(item.checked)
    }

    /// Replaces the text and/or hours of the item at `index`.
    pub fn edit_item(&mut self, index: usize, text: Option<&str>, hours: Option<f64>) -> Result<()> {
        let text = text.map(validate_item_text).transpose()?;
        if let Some(hours) = hours {
            validate_hours("hours", hours)?;
        }
        let item = self.item_mut(index)?;
        if let Some(text) = text {
            item.text = text;
        }
        if let Some(hours) = hours {
            item.hours = hours;
        }
        Ok(())
    }

    /// Removes the item at `index` and renumbers the remaining items.
    pub fn remove_item(&mut self, index: usize) -> Result<ChecklistItem> {
        self.item_mut(index)?;
        let removed = self.checklist.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Splits `budget` evenly across the checklist in half-hour units.
    ///
    /// Returns `false` and leaves the items untouched when there is nothing
    /// to split (no items or no budget).
    pub fn auto_split(&mut self, budget: f64) -> bool {
        match distribute(budget, self.checklist.len()) {
            Some(hours) => {
                for (item, share) in self.checklist.iter_mut().zip(hours) {
                    item.hours = share;
                }
                true
            }
            None => false,
        }
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut ChecklistItem> {
        let len = self.checklist.len();
        self.checklist.get_mut(index).ok_or_else(|| {
            TallyError::invalid_input("index").with_reason(format!(
                "No checklist item at index {index} (checklist has {len} items)"
            ))
        })
    }

    fn renumber(&mut self) {
        for (position, item) in self.checklist.iter_mut().enumerate() {
            item.position = position;
        }
    }
}

impl fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.checked { "x" } else { " " };
        write!(f, "- [{mark}] {} ({}h)", self.text, self.hours)
    }
}

impl fmt::Display for NotesDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .checklist
            .iter()
            .map(ToString::to_string)
            .chain(self.free_text.iter().cloned());
        for (i, line) in lines.enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

fn validate_item_text(text: &str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TallyError::invalid_input("text").with_reason("Checklist item text cannot be empty"));
    }
    if text.contains('\n') {
        return Err(TallyError::invalid_input("text").with_reason("Checklist item text must be a single line"));
    }
    Ok(text.to_string())
}

/// Recognizes `- [ ] body` / `- [x] body`, returning (text, checked, hours).
fn parse_item(line: &str) -> Option<(String, bool, f64)> {
    let rest = line.strip_prefix("- [")?;
    let checked = match rest.chars().next()? {
        ' ' => false,
        'x' | 'X' => true,
        _ => return None,
    };
    let body = rest[1..].strip_prefix("] ")?;
    let (text, hours) = split_hours_suffix(body);
    let text = text.trim_end();
    if text.trim().is_empty() {
        return None;
    }
    Some((text.to_string(), checked, hours))
}

/// Splits a trailing `(<N>h)` annotation off an item body. Bodies without a
/// well-formed annotation keep their full text and zero hours.
fn split_hours_suffix(body: &str) -> (&str, f64) {
    let Some(inner) = body.strip_suffix("h)") else {
        return (body, 0.0);
    };
    let Some(open) = inner.rfind('(') else {
        return (body, 0.0);
    };
    let number = &inner[open + 1..];
    let text = inner[..open].trim_end();
    let well_formed =
        !number.is_empty() && number.chars().all(|c| c.is_ascii_digit() || c == '.');
    match number.parse::<f64>() {
        Ok(hours) if well_formed && !text.trim().is_empty() => (text, hours),
        _ => (body, 0.0),
    }
}
