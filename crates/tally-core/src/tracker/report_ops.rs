//! Report and invoice operations for the Tracker.

use super::Tracker;
use crate::{
    error::{Result, TallyError},
    invoice::{BillingSettings, Invoice, InvoiceRequest},
    operations::{parse_date, parse_month, required_text, today, validate_invoice_number},
    params::{CreateInvoice, MonthReport, WeekReport},
    reports::{month_bounds, week_bounds, MonthlyStatement, PeriodSummary},
};

impl Tracker {
    /// Totals for the Monday to Sunday week containing the given day.
    pub async fn week_summary(&self, params: &WeekReport) -> Result<PeriodSummary> {
        let day = match params.date.as_deref() {
            Some(date) => parse_date("date", date)?,
            None => today(),
        };
        let range = week_bounds(day)?;

        self.with_database(move |db| {
            let entries = db.list_entries(&range, None)?;
            let holidays = db.list_holidays(&range)?;
            Ok(PeriodSummary::build(range, &entries, &holidays))
        })
        .await
    }

    /// Totals for a calendar month.
    pub async fn month_summary(&self, params: &MonthReport) -> Result<PeriodSummary> {
        let range = month_bounds(month_or_current(params.month.as_deref())?);

        self.with_database(move |db| {
            let entries = db.list_entries(&range, None)?;
            let holidays = db.list_holidays(&range)?;
            Ok(PeriodSummary::build(range, &entries, &holidays))
        })
        .await
    }

    /// Every entry of a month with per-project earnings.
    pub async fn monthly_statement(&self, params: &MonthReport) -> Result<MonthlyStatement> {
        let month = month_or_current(params.month.as_deref())?;
        let rate = params.rate.unwrap_or(self.billing.hourly_rate);
        if !rate.is_finite() || rate <= 0.0 {
            return Err(TallyError::invalid_input("rate")
                .with_reason(format!("Hourly rate must be positive, got {rate}")));
        }
        let range = month_bounds(month);

        self.with_database(move |db| {
            let entries = db.list_entries(&range, None)?;
            Ok(MonthlyStatement::build(month, &entries, rate))
        })
        .await
    }

    /// Bills a month of time entries.
    pub async fn create_invoice(&self, params: &CreateInvoice) -> Result<Invoice> {
        let number = validate_invoice_number(&params.invoice_number)?;
        let customer = required_text("customer", &params.customer)?;
        let issue_date = match params.issue_date.as_deref() {
            Some(date) => parse_date("issue_date", date)?,
            None => today(),
        };
        let settings = BillingSettings {
            currency: params
                .currency
                .clone()
                .unwrap_or_else(|| self.billing.currency.clone()),
            payment_terms_days: params.due_days.unwrap_or(self.billing.payment_terms_days),
            ..self.billing.clone()
        };

        let statement = self
            .monthly_statement(&MonthReport {
                month: Some(params.month.clone()),
                rate: params.rate,
            })
            .await?;
        if statement.is_empty() {
            return Err(TallyError::invalid_input("month")
                .with_reason(format!("No time entries in {}", params.month)));
        }

        Invoice::from_statement(
            &statement,
            InvoiceRequest {
                number,
                customer,
                issue_date,
                adjustments: params.adjustments.clone(),
            },
            &settings,
        )
    }
}

fn month_or_current(month: Option<&str>) -> Result<jiff::civil::Date> {
    match month {
        Some(month) => parse_month(month),
        None => Ok(today().first_of_month()),
    }
}
