//! Tally CLI Application
//!
//! Command-line interface and MCP server for the tally timesheet tracker.

mod args;
mod cli;
mod commands;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, TallyMcpServer};
use renderer::TerminalRenderer;
use tally_core::{BillingSettings, Issuer, TrackerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        json,
        rate,
        currency,
        issuer_name,
        issuer_address,
        command,
    } = Args::parse();

    let mut billing = BillingSettings::default();
    if let Some(rate) = rate {
        billing.hourly_rate = rate;
    }
    if let Some(currency) = currency {
        billing.currency = currency;
    }
    billing.issuer = Issuer {
        name: issuer_name.unwrap_or_default(),
        address: issuer_address,
    };

    let mut builder = TrackerBuilder::new().with_billing(billing);
    if let Some(path) = database_file {
        builder = builder.with_database_path(path);
    }
    let tracker = builder
        .build()
        .await
        .context("Failed to initialize tracker")?;

    info!("Tally started with database {}", tracker.database_path().display());

    let cli = || Cli::new(tracker.clone(), TerminalRenderer::new(!no_color), json);

    match command {
        Some(Task { command }) => cli().handle_task_command(command).await,
        Some(Item { command }) => cli().handle_item_command(command).await,
        Some(Entry { command }) => cli().handle_entry_command(command).await,
        Some(Project { command }) => cli().handle_project_command(command).await,
        Some(Holiday { command }) => cli().handle_holiday_command(command).await,
        Some(Report { command }) => cli().handle_report_command(command).await,
        Some(Invoice(args)) => cli().handle_invoice(args).await,
        Some(Serve) => {
            info!("Starting Tally MCP server");
            run_stdio_server(TallyMcpServer::new(tracker.clone()))
                .await
                .context("MCP server failed")
        }
        None => cli().list_open_tasks().await,
    }
}
