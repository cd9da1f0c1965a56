//! MCP server implementation for Tally
//!
//! Exposes task budgets, checklists, time entries and reports to AI
//! assistants over the Model Context Protocol.

use std::future::Future;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tally_core::{AutoSaver, Tracker};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddItem, CreateEntry, CreateInvoice, CreateProject, DraftTask, EditItem, HolidayDate, Id,
    ItemRef, ListEntries, ListHolidays, ListProjects, ListTasks, McpResult, MonthReport,
    TaskRef, UpdateEntry, UpdateTask, WeekReport,
};

/// MCP server for Tally
#[derive(Clone)]
pub struct TallyMcpServer {
    tracker: Tracker,
    saver: AutoSaver,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TallyMcpServer {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            saver: AutoSaver::new(tracker.clone()),
            tracker,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.tracker.clone(), self.saver.clone())
    }

    #[tool(
        name = "show_task",
        description = "Show one task with its budget, hours billed and remaining, budget status, checklist completion, checklist items with their 0-based index, and free-text notes. Identify the task by project and description."
    )]
    async fn show_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "list_tasks",
        description = "List tasks with their budget status and checklist completion. Filters: project, search (case-insensitive text in the description), status ('open' by default, 'closed' or 'all') and budget ('has_budget', 'no_budget' or 'budget_left')."
    )]
    async fn list_tasks(&self, params: Parameters<ListTasks>) -> McpResult {
        self.handlers().list_tasks(params).await
    }

    #[tool(
        name = "update_task",
        description = "Set a task's budgeted_hours, replace its notes, or rename it with new_description. Budget and notes create the task if it does not exist. Renaming requires the task to exist, fails if the new description is taken, and moves all its time entries."
    )]
    async fn update_task(&self, params: Parameters<UpdateTask>) -> McpResult {
        self.handlers().update_task(params).await
    }

    #[tool(
        name = "draft_task",
        description = "Queue an in-progress edit of a task's budgeted_hours or notes. Repeated drafts for the same task are merged and written once edits pause for a second. Use update_task when the change must be saved immediately."
    )]
    async fn draft_task(&self, params: Parameters<DraftTask>) -> McpResult {
        self.handlers().draft_task(params).await
    }

    #[tool(
        name = "close_task",
        description = "Mark a task closed. Closed tasks are hidden from list_tasks unless status is 'closed' or 'all'. Time entries are unaffected."
    )]
    async fn close_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().close_task(params).await
    }

    #[tool(name = "reopen_task", description = "Reopen a closed task.")]
    async fn reopen_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().reopen_task(params).await
    }

    #[tool(
        name = "delete_task",
        description = "Delete a task's budget and notes. Time entries logged against it are kept and the task reappears with no budget if more time is logged."
    )]
    async fn delete_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().delete_task(params).await
    }

    #[tool(
        name = "task_hours",
        description = "Total hours logged against a task across all dates."
    )]
    async fn task_hours(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().task_hours(params).await
    }

    #[tool(
        name = "add_item",
        description = "Append an unchecked checklist item to a task's notes, with optional estimated hours. Free-text lines in the notes are kept."
    )]
    async fn add_item(&self, params: Parameters<AddItem>) -> McpResult {
        self.handlers().add_item(params).await
    }

    #[tool(
        name = "toggle_item",
        description = "Check or uncheck the checklist item at a 0-based index. Checklist completion is the share of item hours that are checked."
    )]
    async fn toggle_item(&self, params: Parameters<ItemRef>) -> McpResult {
        self.handlers().toggle_item(params).await
    }

    #[tool(
        name = "edit_item",
        description = "Change the text or estimated hours of the checklist item at a 0-based index."
    )]
    async fn edit_item(&self, params: Parameters<EditItem>) -> McpResult {
        self.handlers().edit_item(params).await
    }

    #[tool(
        name = "remove_item",
        description = "Remove the checklist item at a 0-based index. Later items move up by one."
    )]
    async fn remove_item(&self, params: Parameters<ItemRef>) -> McpResult {
        self.handlers().remove_item(params).await
    }

    #[tool(
        name = "auto_split",
        description = "Spread the task's budget evenly over its checklist items in half-hour units, at least half an hour per item. Does nothing if the task has no budget or no items."
    )]
    async fn auto_split(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().auto_split(params).await
    }

    #[tool(
        name = "log_time",
        description = "Log hours worked on a task for a date (YYYY-MM-DD). Hours must not be negative. Logged hours count against the task's budget."
    )]
    async fn log_time(&self, params: Parameters<CreateEntry>) -> McpResult {
        self.handlers().log_time(params).await
    }

    #[tool(
        name = "update_entry",
        description = "Change the date, project, description or hours of a time entry by ID."
    )]
    async fn update_entry(&self, params: Parameters<UpdateEntry>) -> McpResult {
        self.handlers().update_entry(params).await
    }

    #[tool(name = "delete_entry", description = "Delete a time entry by ID.")]
    async fn delete_entry(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_entry(params).await
    }

    #[tool(
        name = "list_entries",
        description = "List time entries between from and to (YYYY-MM-DD, inclusive), optionally for one project. Defaults to the current Monday to Sunday week."
    )]
    async fn list_entries(&self, params: Parameters<ListEntries>) -> McpResult {
        self.handlers().list_entries(params).await
    }

    #[tool(
        name = "create_project",
        description = "Create a project with a unique name, optional description and hex color."
    )]
    async fn create_project(&self, params: Parameters<CreateProject>) -> McpResult {
        self.handlers().create_project(params).await
    }

    #[tool(
        name = "list_projects",
        description = "List projects. Set active_only to hide inactive ones."
    )]
    async fn list_projects(&self, params: Parameters<ListProjects>) -> McpResult {
        self.handlers().list_projects(params).await
    }

    #[tool(
        name = "add_holiday",
        description = "Mark a date (YYYY-MM-DD) as a holiday so it does not count as a working day in reports."
    )]
    async fn add_holiday(&self, params: Parameters<HolidayDate>) -> McpResult {
        self.handlers().add_holiday(params).await
    }

    #[tool(
        name = "list_holidays",
        description = "List holidays between from and to (YYYY-MM-DD). Defaults to the current year."
    )]
    async fn list_holidays(&self, params: Parameters<ListHolidays>) -> McpResult {
        self.handlers().list_holidays(params).await
    }

    #[tool(
        name = "week_report",
        description = "Summarize the Monday to Sunday week containing date (YYYY-MM-DD, default today): hours per project and per day, working days and average hours per working day."
    )]
    async fn week_report(&self, params: Parameters<WeekReport>) -> McpResult {
        self.handlers().week_report(params).await
    }

    #[tool(
        name = "month_report",
        description = "Summarize a month (YYYY-MM, default current month): hours per project and per day, working days excluding weekends and holidays."
    )]
    async fn month_report(&self, params: Parameters<MonthReport>) -> McpResult {
        self.handlers().month_report(params).await
    }

    #[tool(
        name = "monthly_statement",
        description = "List every time entry of a month with hours and earnings per project at the hourly rate."
    )]
    async fn monthly_statement(&self, params: Parameters<MonthReport>) -> McpResult {
        self.handlers().monthly_statement(params).await
    }

    #[tool(
        name = "create_invoice",
        description = "Generate an invoice for a month: one line per task at the hourly rate, plus adjustments (positive fees, negative discounts). Requires invoice_number (INV-<digits>) and customer."
    )]
    async fn create_invoice(&self, params: Parameters<CreateInvoice>) -> McpResult {
        self.handlers().create_invoice(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TallyMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tally".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(r#"Tally tracks time worked against project tasks and how much of each task's budget is used.

## Core Concepts
- **Tasks**: identified by project and description, with budgeted hours and markdown notes
- **Checklist**: lines like `- [ ] Write schema (2h)` in a task's notes; other lines are free text
- **Time entries**: hours logged on a date for a project and task description
- **Budget status**: on track, at risk when a fifth of the budget or less is left, over budget when it is used up

## Workflow Examples

### Planning a Task
1. Set a budget with `update_task` (budgeted_hours)
2. Add checklist items with `add_item`
3. Spread the budget over the items with `auto_split`

### Tracking Work
1. Log time with `log_time`
2. Check items off with `toggle_item`
3. Review progress with `show_task` or `list_tasks` (budget='budget_left')

### Reporting
- `week_report` and `month_report` summarize hours per project and day
- `monthly_statement` adds earnings, `create_invoice` produces an invoice

## Tool Categories
- **Tasks**: show_task, list_tasks, update_task, draft_task, close_task, reopen_task, delete_task, task_hours
- **Checklist**: add_item, toggle_item, edit_item, remove_item, auto_split
- **Time entries**: log_time, update_entry, delete_entry, list_entries
- **Projects and holidays**: create_project, list_projects, add_holiday, list_holidays
- **Reports**: week_report, month_report, monthly_statement, create_invoice"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: TallyMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Tally MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let saver = server.saver.clone();
    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    // Drafts still waiting out the debounce window
    saver.flush().await;
    if let Some((key, reason)) = saver.last_error().await {
        error!("Unsaved draft for {key}: {reason}");
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tally_core::TrackerBuilder;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_server_registers_tools() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = TrackerBuilder::new()
            .with_database_path(temp_dir.path().join("test.db"))
            .build()
            .await
            .unwrap();
        let server = TallyMcpServer::new(tracker);

        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        for expected in ["show_task", "log_time", "auto_split", "create_invoice"] {
            assert!(names.iter().any(|name| name == expected), "{expected}");
        }

        let info = server.get_info();
        assert_eq!(info.server_info.name, "tally");
        assert!(info.capabilities.tools.is_some());
    }
}
