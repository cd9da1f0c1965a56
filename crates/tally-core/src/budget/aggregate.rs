//! Combines stored task rows with billed hours.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::NotesDocument;
use crate::models::{Task, TaskRecord};

/// Fraction of the budget under which a task counts as at risk.
pub const AT_RISK_FRACTION: f64 = 0.2;

/// Where a task stands against its budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// No hours were budgeted
    NoBudget,
    /// More than a fifth of the budget remains
    OnTrack,
    /// A fifth of the budget or less remains
    AtRisk,
    /// The budget is used up or exceeded
    OverBudget,
}

impl BudgetStatus {
    /// Classifies a budget and the hours left on it.
    pub fn classify(budgeted_hours: f64, hours_remaining: f64) -> Self {
        if budgeted_hours <= 0.0 {
            BudgetStatus::NoBudget
        } else if hours_remaining <= 0.0 {
            BudgetStatus::OverBudget
        } else if hours_remaining <= budgeted_hours * AT_RISK_FRACTION {
            BudgetStatus::AtRisk
        } else {
            BudgetStatus::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::NoBudget => "no_budget",
            BudgetStatus::OnTrack => "on_track",
            BudgetStatus::AtRisk => "at_risk",
            BudgetStatus::OverBudget => "over_budget",
        }
    }

    /// Status with an icon for terminal output.
    pub fn with_icon(&self) -> &'static str {
        match self {
            BudgetStatus::NoBudget => "· No budget",
            BudgetStatus::OnTrack => "● On track",
            BudgetStatus::AtRisk => "▲ At risk",
            BudgetStatus::OverBudget => "✗ Over budget",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BudgetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "no_budget" | "none" => Ok(BudgetStatus::NoBudget),
            "on_track" | "ok" => Ok(BudgetStatus::OnTrack),
            "at_risk" | "risk" => Ok(BudgetStatus::AtRisk),
            "over_budget" | "over" => Ok(BudgetStatus::OverBudget),
            _ => Err(format!("Invalid budget status: {s}")),
        }
    }
}

impl Task {
    /// Builds the aggregated view of a stored task.
    pub fn from_record(record: TaskRecord, hours_billed: f64) -> Self {
        let completion_percentage = NotesDocument::parse(&record.notes).completion_percentage();
        Self {
            id: record.key().id(),
            hours_remaining: record.budgeted_hours - hours_billed,
            hours_billed,
            completion_percentage,
            project_name: record.project_name,
            description: record.description,
            budgeted_hours: record.budgeted_hours,
            notes: record.notes,
            is_closed: record.is_closed,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Parsed notes of this task.
    pub fn notes_document(&self) -> NotesDocument {
        NotesDocument::parse(&self.notes)
    }

    pub fn budget_status(&self) -> BudgetStatus {
        BudgetStatus::classify(self.budgeted_hours, self.hours_remaining)
    }

    /// Billed hours as a share of the budget, capped at 100. `None` without a
    /// budget.
    pub fn burn_percentage(&self) -> Option<f64> {
        if self.budgeted_hours <= 0.0 {
            return None;
        }
        Some((self.hours_billed / self.budgeted_hours * 100.0).min(100.0))
    }
}
