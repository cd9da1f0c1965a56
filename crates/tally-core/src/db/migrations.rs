//! Database schema initialization and migrations.

use log::info;

use crate::error::{DatabaseResultExt, Result};

/// Per-task billed hours, joined from the time entry history.
const CREATE_TASK_SUMMARIES_VIEW_SQL: &str = "
    CREATE VIEW IF NOT EXISTS task_summaries AS
    SELECT
        t.project_name,
        t.description,
        t.budgeted_hours,
        t.notes,
        t.is_closed,
        t.created_at,
        t.updated_at,
        COALESCE(e.hours_billed, 0) AS hours_billed
    FROM tasks t
    LEFT JOIN (
        SELECT project, description, SUM(hours) AS hours_billed
        FROM time_entries
        GROUP BY project, description
    ) e ON e.project = t.project_name AND e.description = t.description";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        self.connection
            .execute_batch(CREATE_TASK_SUMMARIES_VIEW_SQL)
            .db_context("Failed to create task summaries view")?;

        Ok(())
    }

    /// Brings databases created before the close flag up to date.
    fn apply_migrations(&self) -> Result<()> {
        let has_closed_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('tasks') WHERE name = 'is_closed'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect tasks table")?;

        if !has_closed_column {
            info!("Adding is_closed column to tasks table");
            self.connection
                .execute(
                    "ALTER TABLE tasks ADD COLUMN is_closed INTEGER NOT NULL DEFAULT 0",
                    [],
                )
                .db_context("Failed to add is_closed column to tasks table")?;
        }

        Ok(())
    }
}
