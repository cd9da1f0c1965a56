//! Filter types for querying tasks and time entries.

use std::str::FromStr;

use jiff::{civil::Date, ToSpan};
use serde::{Deserialize, Serialize};

use super::Task;

/// Which tasks to include by their closed flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClosedFilter {
    /// Only tasks still open
    #[default]
    Open,
    /// Only closed tasks
    Closed,
    /// Every task
    All,
}

impl FromStr for ClosedFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(ClosedFilter::Open),
            "closed" => Ok(ClosedFilter::Closed),
            "all" => Ok(ClosedFilter::All),
            _ => Err(format!("Invalid closed filter: {s}")),
        }
    }
}

impl ClosedFilter {
    pub fn matches(&self, is_closed: bool) -> bool {
        match self {
            ClosedFilter::Open => !is_closed,
            ClosedFilter::Closed => is_closed,
            ClosedFilter::All => true,
        }
    }
}

/// Filter on a task's budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetFilter {
    /// Tasks with hours budgeted
    HasBudget,
    /// Tasks without a budget
    NoBudget,
    /// Tasks with hours still remaining
    BudgetLeft,
}

impl FromStr for BudgetFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "has_budget" | "budgeted" => Ok(BudgetFilter::HasBudget),
            "no_budget" | "unbudgeted" => Ok(BudgetFilter::NoBudget),
            "budget_left" | "left" => Ok(BudgetFilter::BudgetLeft),
            _ => Err(format!("Invalid budget filter: {s}")),
        }
    }
}

impl BudgetFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            BudgetFilter::HasBudget => task.budgeted_hours > 0.0,
            BudgetFilter::NoBudget => task.budgeted_hours <= 0.0,
            BudgetFilter::BudgetLeft => task.hours_remaining > 0.0,
        }
    }
}

/// Filter options for listing tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Exact project name
    pub project: Option<String>,

    /// Case-insensitive substring of the description
    pub description_contains: Option<String>,

    /// Open, closed or all tasks
    pub closed: ClosedFilter,

    pub budget: Option<BudgetFilter>,
}

impl TaskFilter {
    /// Open tasks of one project.
    pub fn for_project(project: impl Into<String>) -> Self {
        Self {
            project: Some(project.into()),
            ..Default::default()
        }
    }

    /// Whether an aggregated task passes every criterion.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(project) = &self.project {
            if &task.project_name != project {
                return false;
            }
        }
        if let Some(needle) = &self.description_contains {
            if !task
                .description
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if !self.closed.matches(task.is_closed) {
            return false;
        }
        match self.budget {
            Some(budget) => budget.matches(task),
            None => true,
        }
    }
}

/// Inclusive date range for entry and holiday queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end;
        self.start.series(1.day()).take_while(move |day| *day <= end)
    }
}
