//! Validation and conversion shared by the CLI and MCP interfaces.
//!
//! Parameters arrive as plain strings and numbers; the helpers here turn them
//! into typed values or an [`TallyError::InvalidInput`] naming the field.

use jiff::{civil::Date, Zoned};

use crate::{
    models::{BudgetFilter, ClosedFilter, TaskFilter, TaskKey},
    params::{ListTasks, TaskRef},
    Result, TallyError,
};

/// Today's date in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// ```rust
/// # use tally_core::operations::parse_date;
/// assert!(parse_date("date", "2024-02-29").is_ok());
/// assert!(parse_date("date", "2023-02-29").is_err());
/// assert!(parse_date("date", "2024-2-1").is_err());
/// ```
pub fn parse_date(field: &str, value: &str) -> Result<Date> {
    let value = value.trim();
    let shaped = value.len() == 10
        && value.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !shaped {
        return Err(TallyError::invalid_input(field)
            .with_reason(format!("Invalid date '{value}', expected YYYY-MM-DD")));
    }
    value.parse::<Date>().map_err(|e| {
        TallyError::invalid_input(field).with_reason(format!("Invalid date '{value}': {e}"))
    })
}

/// Parses an optional date, falling back to `default`.
pub fn parse_date_or(field: &str, value: Option<&str>, default: Date) -> Result<Date> {
    value.map_or(Ok(default), |value| parse_date(field, value))
}

/// Parses a `YYYY-MM` month into the first day of that month.
pub fn parse_month(value: &str) -> Result<Date> {
    let value = value.trim();
    let invalid = || {
        TallyError::invalid_input("month")
            .with_reason(format!("Invalid month '{value}', expected YYYY-MM"))
    };
    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month.len() != 2 {
        return Err(invalid());
    }
    let year = year.parse::<i16>().map_err(|_| invalid())?;
    let month = month.parse::<i8>().map_err(|_| invalid())?;
    Date::new(year, month, 1).map_err(|_| invalid())
}

/// Trims a required text field, rejecting blank values.
pub fn required_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TallyError::invalid_input(field).with_reason(format!("{field} cannot be empty")));
    }
    Ok(value.to_string())
}

/// Validates a `#rrggbb` color.
pub fn validate_color(value: &str) -> Result<String> {
    let value = value.trim();
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(TallyError::invalid_input("color")
            .with_reason(format!("Invalid color '{value}', expected #rrggbb")));
    }
    Ok(value.to_lowercase())
}

/// Validates an `INV-<digits>` invoice number.
pub fn validate_invoice_number(value: &str) -> Result<String> {
    let value = value.trim().to_uppercase();
    let valid = value
        .strip_prefix("INV-")
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
    if !valid {
        return Err(TallyError::invalid_input("invoice_number").with_reason(
            "Invoice number must be in the format INV-xxx (e.g., INV-002)",
        ));
    }
    Ok(value)
}

impl TryFrom<&TaskRef> for TaskKey {
    type Error = TallyError;

    fn try_from(params: &TaskRef) -> Result<Self> {
        TaskKey::new(&params.project, &params.description)
    }
}

impl TryFrom<&ListTasks> for TaskFilter {
    type Error = TallyError;

    /// Converts list parameters into a filter, rejecting unknown filter names.
    fn try_from(params: &ListTasks) -> Result<Self> {
        let closed = match params.status.as_deref() {
            Some(status) => status
                .parse::<ClosedFilter>()
                .map_err(|e| TallyError::invalid_input("status").with_reason(e))?,
            None => ClosedFilter::default(),
        };
        let budget = params
            .budget
            .as_deref()
            .map(|budget| {
                budget
                    .parse::<BudgetFilter>()
                    .map_err(|e| TallyError::invalid_input("budget").with_reason(e))
            })
            .transpose()?;

        Ok(TaskFilter {
            project: params
                .project
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from),
            description_contains: params
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            closed,
            budget,
        })
    }
}
