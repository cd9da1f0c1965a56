//! Weekly and monthly time reports.
//!
//! Reports are computed from already loaded entries and holidays, so they are
//! pure and can be built for any period. Weeks run Monday to Sunday.

use std::collections::BTreeMap;

use jiff::{
    civil::{Date, Weekday},
    ToSpan,
};
use serde::{Deserialize, Serialize};

use crate::{
    models::{DateRange, TimeEntry},
    Result,
};

/// Monday to Sunday week containing `date`.
pub fn week_bounds(date: Date) -> Result<DateRange> {
    let offset = i64::from(date.weekday().to_monday_zero_offset());
    let start = date.checked_sub(offset.days())?;
    let end = start.checked_add(6.days())?;
    Ok(DateRange::new(start, end))
}

/// First to last day of the month containing `date`.
pub fn month_bounds(date: Date) -> DateRange {
    DateRange::new(date.first_of_month(), date.last_of_month())
}

/// Monday to Friday days of `range` that are not holidays.
pub fn working_days(range: &DateRange, holidays: &[Date]) -> usize {
    range
        .days()
        .filter(|day| !matches!(day.weekday(), Weekday::Saturday | Weekday::Sunday))
        .filter(|day| !holidays.contains(day))
        .count()
}

/// Hours logged on one project during a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectHours {
    pub project: String,
    pub hours: f64,
    /// Share of the period total, 0 to 100
    pub percentage: f64,
}

/// Hours logged on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayHours {
    pub date: Date,
    pub hours: f64,
    pub is_holiday: bool,
}

/// Totals and breakdowns for a week or a month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodSummary {
    pub range: DateRange,
    pub total_hours: f64,
    /// Projects by hours, largest first
    pub projects: Vec<ProjectHours>,
    /// Every day of the period in order
    pub days: Vec<DayHours>,
    /// Weekdays in the period minus holidays
    pub working_days: usize,
    /// `None` when the period has no working days
    pub average_per_working_day: Option<f64>,
}

impl PeriodSummary {
    /// Summarizes the entries falling inside `range`; others are ignored.
    pub fn build(range: DateRange, entries: &[TimeEntry], holidays: &[Date]) -> Self {
        let mut by_project: BTreeMap<&str, f64> = BTreeMap::new();
        let mut by_day: BTreeMap<Date, f64> = BTreeMap::new();
        for entry in entries.iter().filter(|e| range.contains(e.date)) {
            *by_project.entry(entry.project.as_str()).or_default() += entry.hours;
            *by_day.entry(entry.date).or_default() += entry.hours;
        }
        let total_hours: f64 = by_day.values().sum();

        let mut projects: Vec<ProjectHours> = by_project
            .into_iter()
            .map(|(project, hours)| ProjectHours {
                project: project.to_string(),
                hours,
                percentage: if total_hours > 0.0 {
                    hours / total_hours * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        projects.sort_by(|a, b| b.hours.total_cmp(&a.hours).then(a.project.cmp(&b.project)));

        let days = range
            .days()
            .map(|date| DayHours {
                date,
                hours: by_day.get(&date).copied().unwrap_or(0.0),
                is_holiday: holidays.contains(&date),
            })
            .collect();

        let working_days = working_days(&range, holidays);
        let average_per_working_day =
            (working_days > 0).then(|| total_hours / working_days as f64);

        Self {
            range,
            total_hours,
            projects,
            days,
            working_days,
            average_per_working_day,
        }
    }
}

/// Hours and earnings of one project in a statement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectEarnings {
    pub project: String,
    pub hours: f64,
    pub earnings: f64,
}

/// Billable view of a month: every entry plus per-project earnings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyStatement {
    pub range: DateRange,
    pub hourly_rate: f64,
    /// Entries sorted by date, then project
    pub entries: Vec<TimeEntry>,
    /// Projects in name order
    pub projects: Vec<ProjectEarnings>,
    pub total_hours: f64,
    pub total_earnings: f64,
}

impl MonthlyStatement {
    /// Builds the statement for the month containing `month`.
    pub fn build(month: Date, entries: &[TimeEntry], hourly_rate: f64) -> Self {
        let range = month_bounds(month);
        let mut entries: Vec<TimeEntry> = entries
            .iter()
            .filter(|e| range.contains(e.date))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.project.cmp(&b.project)));

        let mut by_project: BTreeMap<&str, f64> = BTreeMap::new();
        for entry in &entries {
            *by_project.entry(entry.project.as_str()).or_default() += entry.hours;
        }
        let projects: Vec<ProjectEarnings> = by_project
            .into_iter()
            .map(|(project, hours)| ProjectEarnings {
                project: project.to_string(),
                hours,
                earnings: hours * hourly_rate,
            })
            .collect();

        let total_hours: f64 = entries.iter().map(|e| e.hours).sum();
        Self {
            range,
            hourly_rate,
            total_earnings: total_hours * hourly_rate,
            total_hours,
            projects,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;

    fn entry(id: u64, day: Date, project: &str, description: &str, hours: f64) -> TimeEntry {
        TimeEntry {
            id,
            date: day,
            project: project.to_string(),
            description: description.to_string(),
            hours,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_week_bounds() {
        // 2024-03-13 is a Wednesday
        let week = week_bounds(date(2024, 3, 13)).unwrap();
        assert_eq!(week.start, date(2024, 3, 11));
        assert_eq!(week.end, date(2024, 3, 17));

        let sunday = week_bounds(date(2024, 3, 17)).unwrap();
        assert_eq!(sunday.start, date(2024, 3, 11));

        let across_years = week_bounds(date(2025, 1, 1)).unwrap();
        assert_eq!(across_years.start, date(2024, 12, 30));
        assert_eq!(across_years.end, date(2025, 1, 5));
    }

    #[test]
    fn test_month_bounds() {
        let feb = month_bounds(date(2024, 2, 10));
        assert_eq!(feb.start, date(2024, 2, 1));
        assert_eq!(feb.end, date(2024, 2, 29));
    }

    #[test]
    fn test_working_days_exclude_weekends_and_holidays() {
        let week = week_bounds(date(2024, 3, 13)).unwrap();
        assert_eq!(working_days(&week, &[]), 5);
        // Saturday holidays do not count twice
        assert_eq!(working_days(&week, &[date(2024, 3, 11), date(2024, 3, 16)]), 4);
    }

    #[test]
    fn test_period_summary() {
        let week = week_bounds(date(2024, 3, 13)).unwrap();
        let entries = vec![
            entry(1, date(2024, 3, 11), "Client A", "Build API", 3.0),
            entry(2, date(2024, 3, 11), "Client B", "Support", 1.0),
            entry(3, date(2024, 3, 12), "Client A", "Build API", 4.0),
            entry(4, date(2024, 3, 18), "Client A", "Next week", 8.0),
        ];
        let summary = PeriodSummary::build(week, &entries, &[date(2024, 3, 15)]);

        assert_eq!(summary.total_hours, 8.0);
        assert_eq!(summary.projects[0].project, "Client A");
        assert_eq!(summary.projects[0].hours, 7.0);
        assert_eq!(summary.projects[0].percentage, 87.5);
        assert_eq!(summary.days.len(), 7);
        assert_eq!(summary.days[0].hours, 4.0);
        assert!(summary.days[4].is_holiday);
        assert_eq!(summary.working_days, 4);
        assert_eq!(summary.average_per_working_day, Some(2.0));
    }

    #[test]
    fn test_monthly_statement_sorting_and_earnings() {
        let entries = vec![
            entry(1, date(2024, 3, 20), "Client B", "Support", 2.0),
            entry(2, date(2024, 3, 5), "Client B", "Support", 1.5),
            entry(3, date(2024, 3, 5), "Client A", "Build API", 4.0),
            entry(4, date(2024, 4, 1), "Client A", "Build API", 9.0),
        ];
        let statement = MonthlyStatement::build(date(2024, 3, 1), &entries, 115.0);

        let order: Vec<u64> = statement.entries.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![3, 2, 1]);
        assert_eq!(statement.total_hours, 7.5);
        assert_eq!(statement.total_earnings, 862.5);
        assert_eq!(statement.projects[0].project, "Client A");
        assert_eq!(statement.projects[0].earnings, 460.0);
        assert_eq!(statement.projects[1].hours, 3.5);
    }
}
