//! Project and holiday operations for the Tracker.

use jiff::civil::Date;

use super::Tracker;
use crate::{
    error::{Result, TallyError},
    models::{validate_project_name, DateRange, Project, ProjectChanges},
    operations::{parse_date, today, validate_color},
    params::{CreateProject, HolidayDate, Id, ListHolidays, ListProjects, UpdateProject},
};

impl Tracker {
    /// Creates an active project with a unique name.
    pub async fn create_project(&self, params: &CreateProject) -> Result<Project> {
        let name = validate_project_name("name", &params.name)?;
        let description = params
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let color = params.color.as_deref().map(validate_color).transpose()?;

        self.with_database(move |db| db.create_project(&name, &description, color.as_deref()))
            .await
    }

    /// Retrieves a project by its ID.
    pub async fn get_project(&self, params: &Id) -> Result<Option<Project>> {
        let id = params.id;
        self.with_database(move |db| db.get_project(id)).await
    }

    /// Lists projects by name.
    pub async fn list_projects(&self, params: &ListProjects) -> Result<Vec<Project>> {
        let active_only = params.active_only;
        self.with_database(move |db| db.list_projects(active_only))
            .await
    }

    /// Updates a project. Renaming carries over to its entries and tasks.
    pub async fn update_project(&self, params: &UpdateProject) -> Result<Project> {
        let id = params.id;
        let changes = ProjectChanges {
            name: params
                .name
                .as_deref()
                .map(|name| validate_project_name("name", name))
                .transpose()?,
            description: params.description.as_deref().map(|d| d.trim().to_string()),
            color: params.color.as_deref().map(validate_color).transpose()?,
            is_active: params.is_active,
        };

        self.with_database(move |db| db.update_project(id, &changes))
            .await
    }

    /// Deletes a project no time entry refers to.
    pub async fn delete_project(&self, params: &Id) -> Result<Project> {
        let id = params.id;
        self.with_database(move |db| db.delete_project(id)).await
    }

    /// Marks a day as a holiday. Returns `false` if it already was one.
    pub async fn add_holiday(&self, params: &HolidayDate) -> Result<bool> {
        let date = parse_date("date", &params.date)?;
        self.with_database(move |db| db.add_holiday(date)).await
    }

    /// Removes a holiday. Returns `false` if the day was not one.
    pub async fn remove_holiday(&self, params: &HolidayDate) -> Result<bool> {
        let date = parse_date("date", &params.date)?;
        self.with_database(move |db| db.remove_holiday(date)).await
    }

    /// Lists holidays, by default those of the current year.
    pub async fn list_holidays(&self, params: &ListHolidays) -> Result<Vec<Date>> {
        let start = match params.from.as_deref() {
            Some(from) => parse_date("from", from)?,
            None => today().first_of_year(),
        };
        let end = match params.to.as_deref() {
            Some(to) => parse_date("to", to)?,
            None => start.last_of_year(),
        };
        if end < start {
            return Err(TallyError::invalid_input("to")
                .with_reason(format!("End date {end} is before start date {start}")));
        }
        let range = DateRange::new(start, end);

        self.with_database(move |db| db.list_holidays(&range)).await
    }
}
