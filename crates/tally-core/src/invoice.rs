//! Invoice generation from a month of billed time.

use std::collections::BTreeMap;

use jiff::{civil::Date, ToSpan};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TallyError},
    params::Adjustment,
    reports::MonthlyStatement,
};

/// Hourly rate used when none is configured.
pub const DEFAULT_HOURLY_RATE: f64 = 115.0;
/// Currency used when none is configured.
pub const DEFAULT_CURRENCY: &str = "CAD";
/// Days between issue and due date when none are configured.
pub const DEFAULT_PAYMENT_TERMS_DAYS: u32 = 30;

/// Who issues invoices.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Issuer {
    pub name: String,
    /// Address lines, printed in order
    pub address: Vec<String>,
}

/// Billing defaults applied to reports and invoices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingSettings {
    pub hourly_rate: f64,
    pub currency: String,
    pub payment_terms_days: u32,
    pub issuer: Issuer,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            hourly_rate: DEFAULT_HOURLY_RATE,
            currency: DEFAULT_CURRENCY.to_string(),
            payment_terms_days: DEFAULT_PAYMENT_TERMS_DAYS,
            issuer: Issuer::default(),
        }
    }
}

impl BillingSettings {
    /// Checks the rate and currency code.
    pub fn validate(&self) -> Result<()> {
        validate_rate(self.hourly_rate)?;
        validate_currency(&self.currency)?;
        Ok(())
    }
}

/// One billed task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceLine {
    pub project: String,
    /// Task description, printed as the product or service
    pub description: String,
    /// Hours billed
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

/// Everything needed to issue an invoice besides the billed time.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRequest {
    pub number: String,
    pub customer: String,
    pub issue_date: Date,
    pub adjustments: Vec<Adjustment>,
}

/// A complete invoice with computed totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub number: String,
    pub customer: String,
    pub issuer: Issuer,
    pub issue_date: Date,
    pub due_date: Date,
    pub currency: String,
    pub hourly_rate: f64,
    /// Lines sorted by project, then description
    pub lines: Vec<InvoiceLine>,
    pub adjustments: Vec<Adjustment>,
    pub subtotal: f64,
    pub adjustments_total: f64,
    pub total_excluding_tax: f64,
    pub tax: f64,
    pub amount_due: f64,
}

impl Invoice {
    /// Bills a monthly statement: one line per project and description at the
    /// statement's hourly rate, plus the signed adjustments.
    pub fn from_statement(
        statement: &MonthlyStatement,
        request: InvoiceRequest,
        settings: &BillingSettings,
    ) -> Result<Self> {
        validate_rate(statement.hourly_rate)?;
        validate_currency(&settings.currency)?;
        let customer = request.customer.trim();
        if customer.is_empty() {
            return Err(
                TallyError::invalid_input("customer").with_reason("Customer name cannot be empty")
            );
        }
        for adjustment in &request.adjustments {
            if adjustment.description.trim().is_empty() || !adjustment.amount.is_finite() {
                return Err(TallyError::invalid_input("adjustments")
                    .with_reason("Adjustments need a description and a finite amount"));
            }
        }

        let mut grouped: BTreeMap<(&str, &str), f64> = BTreeMap::new();
        for entry in &statement.entries {
            *grouped
                .entry((entry.project.as_str(), entry.description.as_str()))
                .or_default() += entry.hours;
        }
        let rate = statement.hourly_rate;
        let lines: Vec<InvoiceLine> = grouped
            .into_iter()
            .map(|((project, description), hours)| InvoiceLine {
                project: project.to_string(),
                description: description.to_string(),
                quantity: hours,
                unit_price: rate,
                total: hours * rate,
            })
            .collect();

        let subtotal: f64 = lines.iter().map(|line| line.total).sum();
        let adjustments_total: f64 = request.adjustments.iter().map(|a| a.amount).sum();
        let total_excluding_tax = subtotal + adjustments_total;
        let tax = 0.0;
        let due_date = request
            .issue_date
            .checked_add(i64::from(settings.payment_terms_days).days())?;

        Ok(Self {
            number: request.number,
            customer: customer.to_string(),
            issuer: settings.issuer.clone(),
            issue_date: request.issue_date,
            due_date,
            currency: settings.currency.to_uppercase(),
            hourly_rate: rate,
            lines,
            adjustments: request.adjustments,
            subtotal,
            adjustments_total,
            total_excluding_tax,
            tax,
            amount_due: total_excluding_tax + tax,
        })
    }

    /// Formats an amount in this invoice's currency.
    pub fn money(&self, amount: f64) -> String {
        format_money(amount, &self.currency)
    }
}

fn validate_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(TallyError::invalid_input("rate")
            .with_reason(format!("Hourly rate must be positive, got {rate}")));
    }
    Ok(())
}

fn validate_currency(currency: &str) -> Result<()> {
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(TallyError::invalid_input("currency")
            .with_reason(format!("Invalid currency code '{currency}'")));
    }
    Ok(())
}

/// Formats an amount with two decimals, thousands separators and the
/// currency's symbol, e.g. `$1,234.50` or `-€20.00`. Currencies without a
/// known symbol are suffixed with their code.
pub fn format_money(amount: f64, currency: &str) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;

    let symbol = match currency.to_uppercase().as_str() {
        "CAD" | "USD" | "AUD" | "NZD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    };
    match symbol {
        Some(symbol) => format!("{sign}{symbol}{whole}.{fraction:02}"),
        None => format!("{sign}{whole}.{fraction:02} {}", currency.to_uppercase()),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
