pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod parser;
pub mod render;
pub mod state;

use std::io::Write;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, OutputFormat};
use commands::export::ExportFormat;
use error::AppError;
use state::AppState;

pub fn run() -> Result<(), AppError> {
    // Logs go to stderr so stdout only carries the dashboard itself.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref())
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    let state = AppState::new(config);

    let command = cli.command.unwrap_or(Command::Show {
        start: None,
        end: None,
        format: OutputFormat::Text,
    });

    if let Command::Config = command {
        println!("{}", commands::config::get_config(&state)?);
        return Ok(());
    }

    commands::import::import_dataset(&state, &cli.data)
        .inspect_err(|e| error!("Failed to load {}: {}", cli.data.display(), e))?;

    match command {
        Command::Show { start, end, format } => {
            let report = commands::dashboard::get_dashboard(&state, start, end)?;
            let rendered = match format {
                OutputFormat::Text => render::render_dashboard(&report, &state.config),
                OutputFormat::Json => render::render_json(&report)?,
            };
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}")?;
        }
        Command::Export {
            output,
            format,
            start,
            end,
        } => {
            let format = format.unwrap_or_else(|| ExportFormat::from_path(&output));
            let result =
                commands::export::export_dashboard(&state, &output, format, start, end)?;
            info!("Wrote {} ({} bytes)", result.path, result.size_bytes);
        }
        Command::Explore => {
            let stdin = std::io::stdin().lock();
            let stdout = std::io::stdout().lock();
            commands::explore::run_explore(&state, stdin, stdout)?;
        }
        Command::Config => {}
    }

    Ok(())
}

// ─── E2E Integration Tests ──────────────────────────────────────────────────
