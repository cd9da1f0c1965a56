//! Holiday calendar queries.

use jiff::{civil::Date, Timestamp};
use log::debug;
use rusqlite::params;

use super::utils::date_column;
use crate::{
    error::{DatabaseResultExt, Result},
    models::DateRange,
};

const INSERT_HOLIDAY_SQL: &str =
    "INSERT INTO holidays (date, created_at) VALUES (?1, ?2) ON CONFLICT(date) DO NOTHING";
const DELETE_HOLIDAY_SQL: &str = "DELETE FROM holidays WHERE date = ?1";
const LIST_HOLIDAYS_SQL: &str =
    "SELECT date FROM holidays WHERE date >= ?1 AND date <= ?2 ORDER BY date ASC";

impl super::Database {
    /// Marks a day as a holiday. Returns `false` when it already was one.
    pub fn add_holiday(&mut self, date: Date) -> Result<bool> {
        let inserted = self
            .connection
            .execute(
                INSERT_HOLIDAY_SQL,
                params![date.to_string(), Timestamp::now().to_string()],
            )
            .db_context("Failed to insert holiday")?;
        debug!("Holiday {date}: inserted={}", inserted > 0);
        Ok(inserted > 0)
    }

    /// Unmarks a holiday. Returns `false` when the day was not one.
    pub fn remove_holiday(&mut self, date: Date) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_HOLIDAY_SQL, params![date.to_string()])
            .db_context("Failed to delete holiday")?;
        Ok(removed > 0)
    }

    /// Holidays within an inclusive range, in date order.
    pub fn list_holidays(&self, range: &DateRange) -> Result<Vec<Date>> {
        let mut stmt = self
            .connection
            .prepare(LIST_HOLIDAYS_SQL)
            .db_context("Failed to prepare query")?;

        let holidays = stmt
            .query_map(
                params![range.start.to_string(), range.end.to_string()],
                |row| date_column(row, 0),
            )
            .db_context("Failed to query holidays")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read holiday rows")?;

        Ok(holidays)
    }
}
