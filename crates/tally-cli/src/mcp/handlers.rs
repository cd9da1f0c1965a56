//! MCP tool handlers implementation

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tally_core::{
    display::{CreateResult, DeleteResult, Hours, OperationStatus, UpdateResult},
    params as core, AutoSaver, Holidays, Projects, Tasks, TimeEntries, Tracker,
};

use super::errors::to_mcp_error;

/// Transparent serde wrapper giving any core parameter type the
/// `Deserialize` and `JsonSchema` impls MCP tools need.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type TaskRef = McpParams<core::TaskRef>;
pub type UpdateTask = McpParams<core::UpdateTask>;
pub type DraftTask = McpParams<core::DraftTask>;
pub type ListTasks = McpParams<core::ListTasks>;
pub type AddItem = McpParams<core::AddItem>;
pub type ItemRef = McpParams<core::ItemRef>;
pub type EditItem = McpParams<core::EditItem>;
pub type CreateEntry = McpParams<core::CreateEntry>;
pub type UpdateEntry = McpParams<core::UpdateEntry>;
pub type ListEntries = McpParams<core::ListEntries>;
pub type CreateProject = McpParams<core::CreateProject>;
pub type ListProjects = McpParams<core::ListProjects>;
pub type HolidayDate = McpParams<core::HolidayDate>;
pub type ListHolidays = McpParams<core::ListHolidays>;
pub type WeekReport = McpParams<core::WeekReport>;
pub type MonthReport = McpParams<core::MonthReport>;
pub type CreateInvoice = McpParams<core::CreateInvoice>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        output.to_string(),
    )]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    tracker: Tracker,
    saver: AutoSaver,
}

impl McpHandlers {
    pub fn new(tracker: Tracker, saver: AutoSaver) -> Self {
        Self { tracker, saver }
    }

    pub async fn show_task(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("show_task: {params:?}");

        let task = self
            .tracker
            .show_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to show task", &e))?;
        text(task)
    }

    pub async fn list_tasks(&self, Parameters(params): Parameters<ListTasks>) -> McpResult {
        debug!("list_tasks: {params:?}");

        let tasks = self
            .tracker
            .list_tasks(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list tasks", &e))?;
        text(Tasks(tasks))
    }

    pub async fn update_task(&self, Parameters(params): Parameters<UpdateTask>) -> McpResult {
        debug!("update_task: {params:?}");

        let inner_params = params.as_ref();
        let task = self
            .tracker
            .update_task(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to update task", &e))?;
        text(UpdateResult::with_changes(
            task,
            inner_params.describe_changes(),
        ))
    }

    pub async fn draft_task(&self, Parameters(params): Parameters<DraftTask>) -> McpResult {
        debug!("draft_task: {params:?}");

        let key = self
            .saver
            .schedule_draft(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to queue draft", &e))?;

        let mut output = OperationStatus::success(format!(
            "Draft for {key} queued; it is saved once edits pause."
        ))
        .to_string();
        if let Some((failed, reason)) = self.saver.last_error().await {
            output.push_str(&format!("\nLast failed save was {failed}: {reason}\n"));
        }
        text(output)
    }

    pub async fn close_task(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("close_task: {params:?}");

        let task = self
            .tracker
            .close_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to close task", &e))?;
        text(OperationStatus::success(format!(
            "Closed task {}. Use 'reopen_task' to reopen it.",
            task.id
        )))
    }

    pub async fn reopen_task(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("reopen_task: {params:?}");

        let task = self
            .tracker
            .reopen_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to reopen task", &e))?;
        text(OperationStatus::success(format!("Reopened task {}", task.id)))
    }

    pub async fn delete_task(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("delete_task: {params:?}");

        let task = self
            .tracker
            .delete_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete task", &e))?;
        text(DeleteResult::new(task))
    }

    pub async fn task_hours(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("task_hours: {params:?}");

        let inner_params = params.as_ref();
        let hours = self
            .tracker
            .task_hours(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to sum task hours", &e))?;
        text(format!(
            "{} logged on {} | {}",
            Hours(hours),
            inner_params.project,
            inner_params.description
        ))
    }

    pub async fn add_item(&self, Parameters(params): Parameters<AddItem>) -> McpResult {
        debug!("add_item: {params:?}");

        let (task, item) = self
            .tracker
            .add_item(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add checklist item", &e))?;
        text(format!(
            "{}\n{task}",
            OperationStatus::success(format!("Added item {}: {}", item.position, item.text))
        ))
    }

    pub async fn toggle_item(&self, Parameters(params): Parameters<ItemRef>) -> McpResult {
        debug!("toggle_item: {params:?}");

        let (task, item) = self
            .tracker
            .toggle_item(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to toggle checklist item", &e))?;
        let state = if item.checked { "Checked" } else { "Unchecked" };
        text(format!(
            "{}\n{task}",
            OperationStatus::success(format!("{state} item {}: {}", item.position, item.text))
        ))
    }

    pub async fn edit_item(&self, Parameters(params): Parameters<EditItem>) -> McpResult {
        debug!("edit_item: {params:?}");

        let (task, item) = self
            .tracker
            .edit_item(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to edit checklist item", &e))?;
        text(format!(
            "{}\n{task}",
            OperationStatus::success(format!("Updated item {}: {item}", item.position))
        ))
    }

    pub async fn remove_item(&self, Parameters(params): Parameters<ItemRef>) -> McpResult {
        debug!("remove_item: {params:?}");

        let (task, item) = self
            .tracker
            .remove_item(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove checklist item", &e))?;
        text(format!(
            "{}\n{task}",
            OperationStatus::success(format!("Removed item: {}", item.text))
        ))
    }

    pub async fn auto_split(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("auto_split: {params:?}");

        let (task, split) = self
            .tracker
            .auto_split(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to split budget", &e))?;
        let status = if split {
            OperationStatus::success(format!(
                "Split {} over {} checklist items",
                Hours(task.budgeted_hours),
                task.notes_document().checklist.len()
            ))
        } else {
            OperationStatus::failure(
                "Nothing to split: the task needs a budget and checklist items",
            )
        };
        text(format!("{status}\n{task}"))
    }

    pub async fn log_time(&self, Parameters(params): Parameters<CreateEntry>) -> McpResult {
        debug!("log_time: {params:?}");

        let entry = self
            .tracker
            .create_entry(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to log time", &e))?;
        text(CreateResult::new(entry))
    }

    pub async fn update_entry(&self, Parameters(params): Parameters<UpdateEntry>) -> McpResult {
        debug!("update_entry: {params:?}");

        let inner_params = params.as_ref();
        let entry = self
            .tracker
            .update_entry(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to update time entry", &e))?;
        text(UpdateResult::with_changes(
            entry,
            inner_params.describe_changes(),
        ))
    }

    pub async fn delete_entry(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_entry: {params:?}");

        let entry = self
            .tracker
            .delete_entry(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete time entry", &e))?;
        text(DeleteResult::new(entry))
    }

    pub async fn list_entries(&self, Parameters(params): Parameters<ListEntries>) -> McpResult {
        debug!("list_entries: {params:?}");

        let entries = self
            .tracker
            .list_entries(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list time entries", &e))?;
        text(TimeEntries(entries))
    }

    pub async fn create_project(
        &self,
        Parameters(params): Parameters<CreateProject>,
    ) -> McpResult {
        debug!("create_project: {params:?}");

        let project = self
            .tracker
            .create_project(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create project", &e))?;
        text(CreateResult::new(project))
    }

    pub async fn list_projects(&self, Parameters(params): Parameters<ListProjects>) -> McpResult {
        debug!("list_projects: {params:?}");

        let projects = self
            .tracker
            .list_projects(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list projects", &e))?;
        text(Projects(projects))
    }

    pub async fn add_holiday(&self, Parameters(params): Parameters<HolidayDate>) -> McpResult {
        debug!("add_holiday: {params:?}");

        let inner_params = params.as_ref();
        let added = self
            .tracker
            .add_holiday(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to add holiday", &e))?;
        let status = if added {
            OperationStatus::success(format!("Added holiday {}", inner_params.date))
        } else {
            OperationStatus::failure(format!("{} already is a holiday", inner_params.date))
        };
        text(status)
    }

    pub async fn list_holidays(&self, Parameters(params): Parameters<ListHolidays>) -> McpResult {
        debug!("list_holidays: {params:?}");

        let holidays = self
            .tracker
            .list_holidays(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list holidays", &e))?;
        text(Holidays(holidays))
    }

    pub async fn week_report(&self, Parameters(params): Parameters<WeekReport>) -> McpResult {
        debug!("week_report: {params:?}");

        let summary = self
            .tracker
            .week_summary(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to build weekly summary", &e))?;
        text(summary)
    }

    pub async fn month_report(&self, Parameters(params): Parameters<MonthReport>) -> McpResult {
        debug!("month_report: {params:?}");

        let summary = self
            .tracker
            .month_summary(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to build monthly summary", &e))?;
        text(summary)
    }

    pub async fn monthly_statement(
        &self,
        Parameters(params): Parameters<MonthReport>,
    ) -> McpResult {
        debug!("monthly_statement: {params:?}");

        let statement = self
            .tracker
            .monthly_statement(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to build monthly statement", &e))?;
        text(statement)
    }

    pub async fn create_invoice(&self, Parameters(params): Parameters<CreateInvoice>) -> McpResult {
        debug!("create_invoice: {params:?}");

        let invoice = self
            .tracker
            .create_invoice(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create invoice", &e))?;
        text(invoice)
    }
}
