use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::export::ExportFormat;

/// Interactive dashboard over a Brazilian e-commerce order dataset.
#[derive(Debug, Parser)]
#[command(name = "ecommerce-dashboard", version, about)]
pub struct Cli {
    /// Order-line CSV to load
    #[arg(long, env = "DASHBOARD_DATA", default_value = "all_data.csv", global = true)]
    pub data: PathBuf,

    /// TOML configuration file (defaults apply when absent)
    #[arg(long, env = "DASHBOARD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the dashboard for an approval-date range
    Show {
        /// First approval date (YYYY-MM-DD), defaults to the earliest one
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last approval date (YYYY-MM-DD), inclusive, defaults to the latest one
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Write the dashboard to an Excel workbook or a JSON file
    Export {
        #[arg(long, short)]
        output: PathBuf,
        /// Guessed from the output extension when omitted
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Pick ranges interactively and re-render after each one
    Explore,
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
