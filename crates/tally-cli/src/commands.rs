//! Subcommand argument definitions using clap.
//!
//! Each argument struct mirrors a core parameter type from
//! [`tally_core::params`] and converts into it with `From`, so clap
//! attributes never leak into the core crate:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```

use clap::{Args, Subcommand, ValueEnum};
use tally_core::params::*;

/// Identifies a task by project and description.
#[derive(Args)]
pub struct TaskArgs {
    /// Project name
    pub project: String,
    /// Task description
    pub description: String,
}

impl From<TaskArgs> for TaskRef {
    fn from(val: TaskArgs) -> Self {
        TaskRef {
            project: val.project,
            description: val.description,
        }
    }
}

/// Which tasks to list by their closed flag
#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Open,
    Closed,
    All,
}

impl StatusArg {
    fn as_str(self) -> &'static str {
        match self {
            StatusArg::Open => "open",
            StatusArg::Closed => "closed",
            StatusArg::All => "all",
        }
    }
}

/// Which tasks to list by their budget
#[derive(Clone, Copy, ValueEnum)]
pub enum BudgetArg {
    /// Tasks with a budget
    HasBudget,
    /// Tasks without a budget
    NoBudget,
    /// Tasks with hours left on their budget
    BudgetLeft,
}

impl BudgetArg {
    fn as_str(self) -> &'static str {
        match self {
            BudgetArg::HasBudget => "has_budget",
            BudgetArg::NoBudget => "no_budget",
            BudgetArg::BudgetLeft => "budget_left",
        }
    }
}

/// List tasks with their budget status
#[derive(Args)]
pub struct ListTasksArgs {
    /// Only tasks of this project
    #[arg(short, long)]
    pub project: Option<String>,
    /// Only tasks whose description contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
    /// Open (default), closed or all tasks
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    /// Filter by budget
    #[arg(long, value_enum)]
    pub budget: Option<BudgetArg>,
}

impl From<ListTasksArgs> for ListTasks {
    fn from(val: ListTasksArgs) -> Self {
        ListTasks {
            project: val.project,
            search: val.search,
            status: val.status.map(|s| s.as_str().to_string()),
            budget: val.budget.map(|b| b.as_str().to_string()),
        }
    }
}

/// Set a task's budget, replace its notes or rename it
///
/// The task is created when it does not exist yet, unless it is being
/// renamed. Renaming moves the task's time entries to the new description.
#[derive(Args)]
pub struct UpdateTaskArgs {
    /// Project name
    pub project: String,
    /// Current task description
    pub description: String,
    /// Budgeted hours
    #[arg(short, long)]
    pub budget: Option<f64>,
    /// Full notes text, replacing the current notes
    #[arg(short, long)]
    pub notes: Option<String>,
    /// New description for the task
    #[arg(short, long)]
    pub rename: Option<String>,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            project: val.project,
            description: val.description,
            new_description: val.rename,
            budgeted_hours: val.budget,
            notes: val.notes,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Show a task with its budget, checklist and notes
    #[command(alias = "s")]
    Show(TaskArgs),
    /// List tasks
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Set budget or notes, or rename a task
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Mark a task closed
    Close(TaskArgs),
    /// Reopen a closed task
    Reopen(TaskArgs),
    /// Delete a task; its time entries are kept
    #[command(aliases = ["d", "rm"])]
    Delete(TaskArgs),
    /// Total hours logged against a task
    Hours(TaskArgs),
}

/// Add a checklist item
#[derive(Args)]
pub struct AddItemArgs {
    /// Project name
    pub project: String,
    /// Task description
    pub description: String,
    /// Item text
    pub text: String,
    /// Hours estimated for the item
    #[arg(long)]
    pub hours: Option<f64>,
}

impl From<AddItemArgs> for AddItem {
    fn from(val: AddItemArgs) -> Self {
        AddItem {
            project: val.project,
            description: val.description,
            text: val.text,
            hours: val.hours,
        }
    }
}

/// Refer to a checklist item by its 0-based index
#[derive(Args)]
pub struct ItemRefArgs {
    /// Project name
    pub project: String,
    /// Task description
    pub description: String,
    /// 0-based index of the item, as shown by `task show`
    pub index: usize,
}

impl From<ItemRefArgs> for ItemRef {
    fn from(val: ItemRefArgs) -> Self {
        ItemRef {
            project: val.project,
            description: val.description,
            index: val.index,
        }
    }
}

/// Change the text or hours of a checklist item
#[derive(Args)]
pub struct EditItemArgs {
    /// Project name
    pub project: String,
    /// Task description
    pub description: String,
    /// 0-based index of the item
    pub index: usize,
    /// New item text
    #[arg(short, long)]
    pub text: Option<String>,
    /// New hours for the item
    #[arg(long)]
    pub hours: Option<f64>,
}

impl From<EditItemArgs> for EditItem {
    fn from(val: EditItemArgs) -> Self {
        EditItem {
            project: val.project,
            description: val.description,
            index: val.index,
            text: val.text,
            hours: val.hours,
        }
    }
}

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add an unchecked item
    #[command(alias = "a")]
    Add(AddItemArgs),
    /// Check or uncheck an item
    #[command(alias = "t")]
    Toggle(ItemRefArgs),
    /// Change an item's text or hours
    #[command(alias = "e")]
    Edit(EditItemArgs),
    /// Remove an item
    #[command(aliases = ["d", "rm"])]
    Remove(ItemRefArgs),
    /// Spread the task budget evenly over its items in half hours
    Split(TaskArgs),
}

/// Log hours worked
#[derive(Args)]
pub struct CreateEntryArgs {
    /// Day worked, YYYY-MM-DD
    pub date: String,
    /// Project name
    pub project: String,
    /// Task description
    pub description: String,
    /// Hours worked
    pub hours: f64,
}

impl From<CreateEntryArgs> for CreateEntry {
    fn from(val: CreateEntryArgs) -> Self {
        CreateEntry {
            date: val.date,
            project: val.project,
            description: val.description,
            hours: val.hours,
        }
    }
}

/// Refer to a record by ID
#[derive(Args)]
pub struct IdArgs {
    /// ID of the record
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Change a time entry
#[derive(Args)]
pub struct UpdateEntryArgs {
    /// ID of the entry
    pub id: u64,
    /// New date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// New project name
    #[arg(short, long)]
    pub project: Option<String>,
    /// New task description
    #[arg(short, long)]
    pub description: Option<String>,
    /// New hours
    #[arg(long)]
    pub hours: Option<f64>,
}

impl From<UpdateEntryArgs> for UpdateEntry {
    fn from(val: UpdateEntryArgs) -> Self {
        UpdateEntry {
            id: val.id,
            date: val.date,
            project: val.project,
            description: val.description,
            hours: val.hours,
        }
    }
}

/// List time entries in a date range
#[derive(Args)]
pub struct ListEntriesArgs {
    /// First day, YYYY-MM-DD; defaults to Monday of the current week
    #[arg(long)]
    pub from: Option<String>,
    /// Last day, YYYY-MM-DD; defaults to the Sunday of the `from` week
    #[arg(long)]
    pub to: Option<String>,
    /// Only entries of this project
    #[arg(short, long)]
    pub project: Option<String>,
}

impl From<ListEntriesArgs> for ListEntries {
    fn from(val: ListEntriesArgs) -> Self {
        ListEntries {
            from: val.from,
            to: val.to,
            project: val.project,
        }
    }
}

#[derive(Subcommand)]
pub enum EntryCommands {
    /// Log hours against a task
    #[command(alias = "a")]
    Add(CreateEntryArgs),
    /// Show a time entry
    #[command(alias = "s")]
    Show(IdArgs),
    /// Change a time entry
    #[command(alias = "u")]
    Update(UpdateEntryArgs),
    /// Delete a time entry
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
    /// List time entries
    #[command(aliases = ["l", "ls"])]
    List(ListEntriesArgs),
}

/// Create a project
#[derive(Args)]
pub struct CreateProjectArgs {
    /// Unique project name
    pub name: String,
    /// Free-form description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Display color, #rrggbb
    #[arg(short, long)]
    pub color: Option<String>,
}

impl From<CreateProjectArgs> for CreateProject {
    fn from(val: CreateProjectArgs) -> Self {
        CreateProject {
            name: val.name,
            description: val.description,
            color: val.color,
        }
    }
}

/// Change a project; a new name carries over to its entries and tasks
#[derive(Args)]
pub struct UpdateProjectArgs {
    /// ID of the project
    pub id: u64,
    /// New name
    #[arg(short, long)]
    pub name: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// New display color, #rrggbb
    #[arg(short, long)]
    pub color: Option<String>,
    /// Mark the project active
    #[arg(long, conflicts_with = "deactivate")]
    pub activate: bool,
    /// Mark the project inactive
    #[arg(long)]
    pub deactivate: bool,
}

impl From<UpdateProjectArgs> for UpdateProject {
    fn from(val: UpdateProjectArgs) -> Self {
        let is_active = match (val.activate, val.deactivate) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        UpdateProject {
            id: val.id,
            name: val.name,
            description: val.description,
            color: val.color,
            is_active,
        }
    }
}

/// List projects
#[derive(Args)]
pub struct ListProjectsArgs {
    /// Hide inactive projects
    #[arg(long)]
    pub active_only: bool,
}

impl From<ListProjectsArgs> for ListProjects {
    fn from(val: ListProjectsArgs) -> Self {
        ListProjects {
            active_only: val.active_only,
        }
    }
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a project
    #[command(alias = "c")]
    Create(CreateProjectArgs),
    /// Show a project
    #[command(alias = "s")]
    Show(IdArgs),
    /// List projects
    #[command(aliases = ["l", "ls"])]
    List(ListProjectsArgs),
    /// Change a project
    #[command(alias = "u")]
    Update(UpdateProjectArgs),
    /// Delete a project without time entries
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

/// A single day
#[derive(Args)]
pub struct HolidayArgs {
    /// Day, YYYY-MM-DD
    pub date: String,
}

impl From<HolidayArgs> for HolidayDate {
    fn from(val: HolidayArgs) -> Self {
        HolidayDate { date: val.date }
    }
}

/// List holidays in a date range
#[derive(Args)]
pub struct ListHolidaysArgs {
    /// First day, YYYY-MM-DD; defaults to January 1 of the current year
    #[arg(long)]
    pub from: Option<String>,
    /// Last day, YYYY-MM-DD; defaults to December 31 of the `from` year
    #[arg(long)]
    pub to: Option<String>,
}

impl From<ListHolidaysArgs> for ListHolidays {
    fn from(val: ListHolidaysArgs) -> Self {
        ListHolidays {
            from: val.from,
            to: val.to,
        }
    }
}

#[derive(Subcommand)]
pub enum HolidayCommands {
    /// Mark a day as a holiday
    #[command(alias = "a")]
    Add(HolidayArgs),
    /// Remove a holiday
    #[command(aliases = ["d", "rm"])]
    Remove(HolidayArgs),
    /// List holidays
    #[command(aliases = ["l", "ls"])]
    List(ListHolidaysArgs),
}

/// Summarize a week
#[derive(Args)]
pub struct WeekReportArgs {
    /// Any day of the week, YYYY-MM-DD; defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

impl From<WeekReportArgs> for WeekReport {
    fn from(val: WeekReportArgs) -> Self {
        WeekReport { date: val.date }
    }
}

/// Summarize a month
#[derive(Args)]
pub struct MonthReportArgs {
    /// Month, YYYY-MM; defaults to the current month
    #[arg(long)]
    pub month: Option<String>,
}

impl From<MonthReportArgs> for MonthReport {
    fn from(val: MonthReportArgs) -> Self {
        MonthReport {
            month: val.month,
            rate: None,
        }
    }
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Hours per project and day for a Monday to Sunday week
    #[command(alias = "w")]
    Week(WeekReportArgs),
    /// Hours per project and day for a month
    #[command(alias = "m")]
    Month(MonthReportArgs),
    /// Every entry of a month with earnings at the hourly rate
    #[command(alias = "s")]
    Statement(MonthReportArgs),
}

/// Generate an invoice from a month of time entries
#[derive(Args)]
pub struct InvoiceArgs {
    /// Month to bill, YYYY-MM
    pub month: String,
    /// Invoice number, INV-<digits>
    pub invoice_number: String,
    /// Name of the billed customer
    #[arg(short, long)]
    pub customer: String,
    /// Issue date, YYYY-MM-DD; defaults to today
    #[arg(long)]
    pub issue_date: Option<String>,
    /// Days until payment is due
    #[arg(long)]
    pub due_days: Option<u32>,
    /// Fee or discount as DESCRIPTION=AMOUNT, e.g. "Discount=-50"; repeatable
    #[arg(short, long = "adjustment", value_parser = parse_adjustment)]
    pub adjustments: Vec<Adjustment>,
}

// Rate and currency come from the global flags through the billing settings
impl From<InvoiceArgs> for CreateInvoice {
    fn from(val: InvoiceArgs) -> Self {
        CreateInvoice {
            month: val.month,
            invoice_number: val.invoice_number,
            customer: val.customer,
            issue_date: val.issue_date,
            rate: None,
            due_days: val.due_days,
            currency: None,
            adjustments: val.adjustments,
        }
    }
}

fn parse_adjustment(value: &str) -> Result<Adjustment, String> {
    let (description, amount) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected DESCRIPTION=AMOUNT, got '{value}'"))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid amount '{amount}': {e}"))?;
    Ok(Adjustment {
        description: description.trim().to_string(),
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_adjustment() {
        let fee = parse_adjustment("Hosting = 50").unwrap();
        assert_eq!(fee.description, "Hosting");
        assert_eq!(fee.amount, 50.0);

        let discount = parse_adjustment("Discount=-20.5").unwrap();
        assert_eq!(discount.amount, -20.5);

        assert!(parse_adjustment("Discount").is_err());
        assert!(parse_adjustment("Discount=lots").is_err());
    }

    #[test]
    fn test_project_activation_flags() {
        let args = UpdateProjectArgs {
            id: 1,
            name: None,
            description: None,
            color: None,
            activate: false,
            deactivate: true,
        };
        assert_eq!(UpdateProject::from(args).is_active, Some(false));
    }
}
