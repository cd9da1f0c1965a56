//! Display implementations for domain models and reports.
//!
//! Everything renders as markdown so the CLI can pass it through termimad and
//! the MCP server can return it verbatim.

use std::fmt;

use super::datetime::{DayLabel, Hours, LocalDateTime, LongDate};
use crate::{
    invoice::Invoice,
    models::{Project, Task, TimeEntry},
    reports::{MonthlyStatement, PeriodSummary},
};

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} | {}", self.project_name, self.description)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", if self.is_closed { "closed" } else { "open" })?;
        if self.budgeted_hours > 0.0 {
            writeln!(f, "- Budget: {}", Hours(self.budgeted_hours))?;
        }
        writeln!(f, "- Billed: {}", Hours(self.hours_billed))?;
        if self.budgeted_hours > 0.0 {
            writeln!(f, "- Remaining: {}", Hours(self.hours_remaining))?;
        }
        match self.burn_percentage() {
            Some(burn) => writeln!(
                f,
                "- Budget status: {} ({burn:.0}% used)",
                self.budget_status().with_icon()
            )?,
            None => writeln!(f, "- Budget status: {}", self.budget_status().with_icon())?,
        }
        if let Some(completion) = self.completion_percentage {
            writeln!(f, "- Checklist: {completion:.0}% complete")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        let notes = self.notes_document();
        if !notes.checklist.is_empty() {
            writeln!(f, "\n## Checklist")?;
            writeln!(f)?;
            for (index, item) in notes.checklist.iter().enumerate() {
                writeln!(f, "{index}. {item}")?;
            }
        }
        let free_text = notes.free_text.join("\n");
        if !free_text.trim().is_empty() {
            writeln!(f, "\n## Notes")?;
            writeln!(f)?;
            writeln!(f, "{}", free_text.trim_end())?;
        }

        Ok(())
    }
}

impl Task {
    /// Compact form used in task lists.
    pub(crate) fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "### {} | {} ({})",
            self.project_name,
            self.description,
            self.budget_status().with_icon()
        )?;
        if self.is_closed {
            write!(f, " [closed]")?;
        }
        writeln!(f)?;
        writeln!(f)?;

        if self.budgeted_hours > 0.0 {
            write!(
                f,
                "Billed {} of {}, {} remaining",
                Hours(self.hours_billed),
                Hours(self.budgeted_hours),
                Hours(self.hours_remaining)
            )?;
        } else {
            write!(f, "Billed {}", Hours(self.hours_billed))?;
        }
        if let Some(completion) = self.completion_percentage {
            write!(f, ", checklist {completion:.0}% complete")?;
        }
        writeln!(f)?;
        writeln!(f)
    }
}

impl fmt::Display for TimeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} {} | {} ({})",
            self.id,
            DayLabel(&self.date),
            self.project,
            self.description,
            Hours(self.hours)
        )?;
        writeln!(f)?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_active { "active" } else { "inactive" };
        writeln!(f, "### {}. {} ({state})", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- Color: {}", self.color)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for PeriodSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} to {}", self.range.start, self.range.end)?;
        writeln!(f)?;
        writeln!(f, "- Total: {}", Hours(self.total_hours))?;
        writeln!(f, "- Working days: {}", self.working_days)?;
        if let Some(average) = self.average_per_working_day {
            writeln!(f, "- Average per working day: {}", Hours(average))?;
        }

        writeln!(f, "\n## Projects")?;
        writeln!(f)?;
        if self.projects.is_empty() {
            writeln!(f, "No time logged.")?;
        } else {
            writeln!(f, "| Project | Hours | Share |")?;
            writeln!(f, "|:-|-:|-:|")?;
            for project in &self.projects {
                writeln!(
                    f,
                    "| {} | {} | {:.0}% |",
                    project.project,
                    Hours(project.hours),
                    project.percentage
                )?;
            }
        }

        writeln!(f, "\n## Days")?;
        writeln!(f)?;
        for day in &self.days {
            write!(f, "- {}: {}", DayLabel(&day.date), Hours(day.hours))?;
            if day.is_holiday {
                write!(f, " (holiday)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for MonthlyStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Statement for {}", self.range.start.strftime("%B %Y"))?;
        writeln!(f)?;
        writeln!(f, "- Hourly rate: {:.2}", self.hourly_rate)?;
        writeln!(f, "- Total hours: {}", Hours(self.total_hours))?;
        writeln!(f, "- Total earnings: {:.2}", self.total_earnings)?;

        if self.is_empty() {
            writeln!(f, "\nNo time logged this month.")?;
            return Ok(());
        }

        writeln!(f, "\n## Projects")?;
        writeln!(f)?;
        writeln!(f, "| Project | Hours | Earnings |")?;
        writeln!(f, "|:-|-:|-:|")?;
        for project in &self.projects {
            writeln!(
                f,
                "| {} | {} | {:.2} |",
                project.project,
                Hours(project.hours),
                project.earnings
            )?;
        }

        writeln!(f, "\n## Entries")?;
        writeln!(f)?;
        writeln!(f, "| Date | Project | Description | Hours |")?;
        writeln!(f, "|:-|:-|:-|-:|")?;
        for entry in &self.entries {
            writeln!(
                f,
                "| {} | {} | {} | {} |",
                entry.date,
                entry.project,
                entry.description,
                Hours(entry.hours)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Invoice {}", self.number)?;
        writeln!(f)?;
        writeln!(f, "- Date of issue: {}", LongDate(&self.issue_date))?;
        writeln!(f, "- Date due: {}", LongDate(&self.due_date))?;
        writeln!(f, "- Billed to: {}", self.customer)?;
        if !self.issuer.name.is_empty() {
            writeln!(f, "- Issued by: {}", self.issuer.name)?;
            for line in &self.issuer.address {
                writeln!(f, "  {line}")?;
            }
        }
        writeln!(f)?;
        writeln!(
            f,
            "**{} {} due by {}**",
            self.money(self.amount_due),
            self.currency,
            LongDate(&self.due_date)
        )?;

        writeln!(f, "\n## Items")?;
        writeln!(f)?;
        if self.lines.is_empty() {
            writeln!(f, "No billable time.")?;
        } else {
            writeln!(f, "| Project | Description | Qty | Unit price | Amount |")?;
            writeln!(f, "|:-|:-|-:|-:|-:|")?;
            for line in &self.lines {
                writeln!(
                    f,
                    "| {} | {} | {} | {} | {} |",
                    line.project,
                    line.description,
                    line.quantity,
                    self.money(line.unit_price),
                    self.money(line.total)
                )?;
            }
        }

        if !self.adjustments.is_empty() {
            writeln!(f, "\n## Adjustments")?;
            writeln!(f)?;
            for adjustment in &self.adjustments {
                writeln!(
                    f,
                    "- {}: {}",
                    adjustment.description,
                    self.money(adjustment.amount)
                )?;
            }
        }

        writeln!(f, "\n## Totals")?;
        writeln!(f)?;
        writeln!(f, "- Subtotal: {}", self.money(self.subtotal))?;
        if !self.adjustments.is_empty() {
            writeln!(f, "- Adjustments: {}", self.money(self.adjustments_total))?;
        }
        writeln!(
            f,
            "- Total excluding tax: {}",
            self.money(self.total_excluding_tax)
        )?;
        writeln!(f, "- Tax: {}", self.money(self.tax))?;
        writeln!(f, "- Amount due: {}", self.money(self.amount_due))
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::{
        invoice::{BillingSettings, InvoiceRequest},
        models::TaskRecord,
        params::Adjustment,
        reports::week_bounds,
    };

    fn task(budget: f64, notes: &str, billed: f64) -> Task {
        Task::from_record(
            TaskRecord {
                project_name: "Client A".to_string(),
                description: "Build API".to_string(),
                budgeted_hours: budget,
                notes: notes.to_string(),
                is_closed: false,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            billed,
        )
    }

    fn entry(day: jiff::civil::Date, project: &str, hours: f64) -> TimeEntry {
        TimeEntry {
            id: 7,
            date: day,
            project: project.to_string(),
            description: "Build API".to_string(),
            hours,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_task_display() {
        let task = task(
            10.0,
            "- [x] Draft schema (2h)\n- [ ] Endpoints (6h)\nAsk about auth",
            9.0,
        );
        let output = task.to_string();

        assert!(output.starts_with("# Client A | Build API\n"));
        assert!(output.contains("- Budget: 10h"));
        assert!(output.contains("- Remaining: 1h"));
        assert!(output.contains("▲ At risk (90% used)"));
        assert!(output.contains("- Checklist: 25% complete"));
        assert!(output.contains("0. - [x] Draft schema (2h)"));
        assert!(output.contains("## Notes\n\nAsk about auth"));
    }

    #[test]
    fn test_task_without_budget_display() {
        let output = task(0.0, "", 3.0).to_string();

        assert!(output.contains("- Billed: 3h"));
        assert!(!output.contains("- Remaining:"));
        assert!(output.contains("· No budget"));
        assert!(!output.contains("## Checklist"));
    }

    #[test]
    fn test_period_summary_display() {
        let range = week_bounds(date(2024, 3, 13)).unwrap();
        let entries = vec![
            entry(date(2024, 3, 11), "Client A", 6.0),
            entry(date(2024, 3, 12), "Client B", 2.0),
        ];
        let summary = PeriodSummary::build(range, &entries, &[date(2024, 3, 15)]);
        let output = summary.to_string();

        assert!(output.starts_with("# 2024-03-11 to 2024-03-17"));
        assert!(output.contains("| Client A | 6h | 75% |"));
        assert!(output.contains("- Fri 2024-03-15: 0h (holiday)"));
        assert!(output.contains("- Working days: 4"));
    }

    #[test]
    fn test_invoice_display() {
        let entries = [entry(date(2024, 3, 5), "Client A", 10.0)];
        let statement = MonthlyStatement::build(date(2024, 3, 1), &entries, 115.0);
        let invoice = Invoice::from_statement(
            &statement,
            InvoiceRequest {
                number: "INV-002".to_string(),
                customer: "Acme Corp".to_string(),
                issue_date: date(2024, 4, 1),
                adjustments: vec![Adjustment {
                    description: "Discount".to_string(),
                    amount: -50.0,
                }],
            },
            &BillingSettings::default(),
        )
        .unwrap();
        let output = invoice.to_string();

        assert!(output.starts_with("# Invoice INV-002"));
        assert!(output.contains("**$1,100.00 CAD due by May 1, 2024**"));
        assert!(output.contains("| Client A | Build API | 10 | $115.00 | $1,150.00 |"));
        assert!(output.contains("- Discount: -$50.00"));
        assert!(output.contains("- Amount due: $1,100.00"));
        assert!(!output.contains("Issued by"));
    }
}
