use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    EntryCommands, HolidayCommands, InvoiceArgs, ItemCommands, ProjectCommands, ReportCommands,
    TaskCommands,
};

/// Timesheet tracker with task budgets and checklists
///
/// Log hours against project tasks, give tasks a budget and a checklist in
/// their notes, and see at a glance how much of each budget is left. Reports
/// and invoices are built from the logged time. `tally serve` exposes the
/// same operations to AI assistants over MCP.
#[derive(Parser)]
#[command(version, about, name = "tally")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tally/tally.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    /// Hourly rate used by statements and invoices
    #[arg(long, global = true)]
    pub rate: Option<f64>,

    /// Currency code used by invoices, e.g. CAD or EUR
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Name printed as the issuer on invoices
    #[arg(long, global = true)]
    pub issuer_name: Option<String>,

    /// Issuer address line on invoices; repeat for several lines
    #[arg(long = "issuer-address", global = true)]
    pub issuer_address: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the tally CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage tasks, their budgets and notes
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Edit the checklist in a task's notes
    #[command(alias = "i")]
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
    /// Log and manage time entries
    #[command(alias = "e")]
    Entry {
        #[command(subcommand)]
        command: EntryCommands,
    },
    /// Manage projects
    #[command(alias = "p")]
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage holidays excluded from working days
    Holiday {
        #[command(subcommand)]
        command: HolidayCommands,
    },
    /// Weekly and monthly reports
    #[command(alias = "r")]
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Generate an invoice for a month
    Invoice(InvoiceArgs),
    /// Start the MCP server
    Serve,
}
