//! Command handlers for the tally CLI
//!
//! Each handler converts clap arguments into core parameters, calls the
//! [`Tracker`] and prints the result either as rendered markdown or, with
//! `--json`, as pretty-printed JSON.

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::Serialize;
use tally_core::{
    display::{CreateResult, DeleteResult, Hours, OperationStatus, UpdateResult},
    params::{Id, ListTasks, TaskRef, UpdateEntry, UpdateProject, UpdateTask},
    Holidays, Projects, Task, Tasks, TimeEntries, Tracker,
};

use crate::{
    commands::{
        EntryCommands, HolidayCommands, InvoiceArgs, ItemCommands, ProjectCommands,
        ReportCommands, TaskCommands,
    },
    renderer::TerminalRenderer,
};

/// Runs CLI commands against a tracker
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
    json: bool,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer, json: bool) -> Self {
        Self {
            tracker,
            renderer,
            json,
        }
    }

    /// Prints `value` as JSON or `markdown` through the renderer.
    fn emit<T: Serialize>(&self, value: &T, markdown: &str) -> Result<()> {
        if self.json {
            let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
            println!("{json}");
            Ok(())
        } else {
            self.renderer.render(markdown)
        }
    }

    /// Lists open tasks, the default when no command is given.
    pub async fn list_open_tasks(&self) -> Result<()> {
        let tasks = self
            .tracker
            .list_tasks(&ListTasks::default())
            .await
            .context("Failed to list tasks")?;
        self.emit(&tasks, &Tasks(tasks.clone()).to_string())
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Show(args) => {
                let task = self
                    .tracker
                    .show_task(&args.into())
                    .await
                    .context("Failed to show task")?;
                self.emit(&task, &task.to_string())
            }
            TaskCommands::List(args) => {
                let params: ListTasks = args.into();
                debug!("Listing tasks with {params:?}");
                let tasks = self
                    .tracker
                    .list_tasks(&params)
                    .await
                    .context("Failed to list tasks")?;
                self.emit(&tasks, &Tasks(tasks.clone()).to_string())
            }
            TaskCommands::Update(args) => {
                let params: UpdateTask = args.into();
                let changes = params.describe_changes();
                let task = self
                    .tracker
                    .update_task(&params)
                    .await
                    .context("Failed to update task")?;
                let markdown = UpdateResult::with_changes(task.clone(), changes).to_string();
                self.emit(&task, &markdown)
            }
            TaskCommands::Close(args) => {
                let task = self
                    .tracker
                    .close_task(&args.into())
                    .await
                    .context("Failed to close task")?;
                let status = OperationStatus::success(format!("Closed task {}", task.id));
                self.emit(&task, &status.to_string())
            }
            TaskCommands::Reopen(args) => {
                let task = self
                    .tracker
                    .reopen_task(&args.into())
                    .await
                    .context("Failed to reopen task")?;
                let status = OperationStatus::success(format!("Reopened task {}", task.id));
                self.emit(&task, &status.to_string())
            }
            TaskCommands::Delete(args) => {
                let task = self
                    .tracker
                    .delete_task(&args.into())
                    .await
                    .context("Failed to delete task")?;
                self.emit(&task, &DeleteResult::new(task.clone()).to_string())
            }
            TaskCommands::Hours(args) => {
                let params: TaskRef = args.into();
                let hours = self
                    .tracker
                    .task_hours(&params)
                    .await
                    .context("Failed to sum task hours")?;
                let markdown = format!(
                    "{} logged on {} | {}\n",
                    Hours(hours),
                    params.project,
                    params.description
                );
                self.emit(&hours, &markdown)
            }
        }
    }

    pub async fn handle_item_command(&self, command: ItemCommands) -> Result<()> {
        let (task, message) = match command {
            ItemCommands::Add(args) => {
                let (task, item) = self
                    .tracker
                    .add_item(&args.into())
                    .await
                    .context("Failed to add checklist item")?;
                (task, format!("Added item {}: {}", item.position, item.text))
            }
            ItemCommands::Toggle(args) => {
                let (task, item) = self
                    .tracker
                    .toggle_item(&args.into())
                    .await
                    .context("Failed to toggle checklist item")?;
                let state = if item.checked { "Checked" } else { "Unchecked" };
                (task, format!("{state} item {}: {}", item.position, item.text))
            }
            ItemCommands::Edit(args) => {
                let (task, item) = self
                    .tracker
                    .edit_item(&args.into())
                    .await
                    .context("Failed to edit checklist item")?;
                (task, format!("Updated item {}: {item}", item.position))
            }
            ItemCommands::Remove(args) => {
                let (task, item) = self
                    .tracker
                    .remove_item(&args.into())
                    .await
                    .context("Failed to remove checklist item")?;
                (task, format!("Removed item: {}", item.text))
            }
            ItemCommands::Split(args) => {
                let (task, split) = self
                    .tracker
                    .auto_split(&args.into())
                    .await
                    .context("Failed to split budget")?;
                if !split {
                    let status = OperationStatus::failure(
                        "Nothing to split: the task needs a budget and checklist items",
                    );
                    return self.emit(&task, &status.to_string());
                }
                let message = format!("Split {} over the checklist", Hours(task.budgeted_hours));
                (task, message)
            }
        };
        self.emit_task_change(&task, &message)
    }

    fn emit_task_change(&self, task: &Task, message: &str) -> Result<()> {
        let markdown = format!("{}\n{task}", OperationStatus::success(message));
        self.emit(task, &markdown)
    }

    pub async fn handle_entry_command(&self, command: EntryCommands) -> Result<()> {
        match command {
            EntryCommands::Add(args) => {
                let entry = self
                    .tracker
                    .create_entry(&args.into())
                    .await
                    .context("Failed to log time")?;
                self.emit(&entry, &CreateResult::new(entry.clone()).to_string())
            }
            EntryCommands::Show(args) => {
                let params: Id = args.into();
                let entry = self
                    .tracker
                    .get_entry(&params)
                    .await
                    .context("Failed to show time entry")?
                    .ok_or_else(|| anyhow!("Time entry with ID {} not found", params.id))?;
                self.emit(&entry, &entry.to_string())
            }
            EntryCommands::Update(args) => {
                let params: UpdateEntry = args.into();
                let changes = params.describe_changes();
                let entry = self
                    .tracker
                    .update_entry(&params)
                    .await
                    .context("Failed to update time entry")?;
                let markdown = UpdateResult::with_changes(entry.clone(), changes).to_string();
                self.emit(&entry, &markdown)
            }
            EntryCommands::Delete(args) => {
                let entry = self
                    .tracker
                    .delete_entry(&args.into())
                    .await
                    .context("Failed to delete time entry")?;
                self.emit(&entry, &DeleteResult::new(entry.clone()).to_string())
            }
            EntryCommands::List(args) => {
                let entries = self
                    .tracker
                    .list_entries(&args.into())
                    .await
                    .context("Failed to list time entries")?;
                self.emit(&entries, &TimeEntries(entries.clone()).to_string())
            }
        }
    }

    pub async fn handle_project_command(&self, command: ProjectCommands) -> Result<()> {
        match command {
            ProjectCommands::Create(args) => {
                let project = self
                    .tracker
                    .create_project(&args.into())
                    .await
                    .context("Failed to create project")?;
                self.emit(&project, &CreateResult::new(project.clone()).to_string())
            }
            ProjectCommands::Show(args) => {
                let params: Id = args.into();
                let project = self
                    .tracker
                    .get_project(&params)
                    .await
                    .context("Failed to show project")?
                    .ok_or_else(|| anyhow!("Project with ID {} not found", params.id))?;
                self.emit(&project, &project.to_string())
            }
            ProjectCommands::List(args) => {
                let projects = self
                    .tracker
                    .list_projects(&args.into())
                    .await
                    .context("Failed to list projects")?;
                self.emit(&projects, &Projects(projects.clone()).to_string())
            }
            ProjectCommands::Update(args) => {
                let params: UpdateProject = args.into();
                let changes = params.describe_changes();
                let project = self
                    .tracker
                    .update_project(&params)
                    .await
                    .context("Failed to update project")?;
                let markdown = UpdateResult::with_changes(project.clone(), changes).to_string();
                self.emit(&project, &markdown)
            }
            ProjectCommands::Delete(args) => {
                let project = self
                    .tracker
                    .delete_project(&args.into())
                    .await
                    .context("Failed to delete project")?;
                self.emit(&project, &DeleteResult::new(project.clone()).to_string())
            }
        }
    }

    pub async fn handle_holiday_command(&self, command: HolidayCommands) -> Result<()> {
        match command {
            HolidayCommands::Add(args) => {
                let date = args.date.clone();
                let added = self
                    .tracker
                    .add_holiday(&args.into())
                    .await
                    .context("Failed to add holiday")?;
                let status = if added {
                    OperationStatus::success(format!("Added holiday {date}"))
                } else {
                    OperationStatus::failure(format!("{date} already is a holiday"))
                };
                self.emit(&added, &status.to_string())
            }
            HolidayCommands::Remove(args) => {
                let date = args.date.clone();
                let removed = self
                    .tracker
                    .remove_holiday(&args.into())
                    .await
                    .context("Failed to remove holiday")?;
                let status = if removed {
                    OperationStatus::success(format!("Removed holiday {date}"))
                } else {
                    OperationStatus::failure(format!("{date} is not a holiday"))
                };
                self.emit(&removed, &status.to_string())
            }
            HolidayCommands::List(args) => {
                let holidays = self
                    .tracker
                    .list_holidays(&args.into())
                    .await
                    .context("Failed to list holidays")?;
                self.emit(&holidays, &Holidays(holidays.clone()).to_string())
            }
        }
    }

    pub async fn handle_report_command(&self, command: ReportCommands) -> Result<()> {
        match command {
            ReportCommands::Week(args) => {
                let summary = self
                    .tracker
                    .week_summary(&args.into())
                    .await
                    .context("Failed to build weekly summary")?;
                self.emit(&summary, &summary.to_string())
            }
            ReportCommands::Month(args) => {
                let summary = self
                    .tracker
                    .month_summary(&args.into())
                    .await
                    .context("Failed to build monthly summary")?;
                self.emit(&summary, &summary.to_string())
            }
            ReportCommands::Statement(args) => {
                let statement = self
                    .tracker
                    .monthly_statement(&args.into())
                    .await
                    .context("Failed to build monthly statement")?;
                self.emit(&statement, &statement.to_string())
            }
        }
    }

    pub async fn handle_invoice(&self, args: InvoiceArgs) -> Result<()> {
        let invoice = self
            .tracker
            .create_invoice(&args.into())
            .await
            .context("Failed to create invoice")?;
        self.emit(&invoice, &invoice.to_string())
    }
}
