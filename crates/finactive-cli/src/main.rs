mod commands;
mod config;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::assess::AssessArgs;
use commands::roster::{BatchArgs, ClientsArgs, ReportArgs};
use config::PolicyOverrides;

/// Personal financial wellness scoring
#[derive(Parser)]
#[command(
    name = "finactive",
    version,
    about = "Personal financial wellness scoring",
    long_about = "Computes net worth, savings rate, debt ratio and emergency-fund cover \
                  for a client, scores them out of 100 and raises advisories. Works on a \
                  single record (JSON, stdin or flags) or a CSV client sheet."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Scoring policy file (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Reject records with negative amounts
    #[arg(long, global = true)]
    strict: bool,

    /// Bound the budgeting score to 0-100
    #[arg(long, global = true)]
    clamp_budgeting: bool,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess one client record
    Assess(AssessArgs),
    /// List the clients in a sheet
    Clients(ClientsArgs),
    /// Assess one client from a sheet
    Report(ReportArgs),
    /// Assess every client in a sheet
    Batch(BatchArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let overrides = PolicyOverrides {
        strict: cli.strict,
        clamp_budgeting: cli.clamp_budgeting,
    };

    let policy = match config::load_policy(cli.config.as_deref(), &overrides) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Assess(args) => commands::assess::run_assess(args, &policy),
        Commands::Clients(args) => commands::roster::run_clients(args),
        Commands::Report(args) => commands::roster::run_report(args, &policy),
        Commands::Batch(args) => commands::roster::run_batch(args, &policy),
        Commands::Version => {
            println!("finactive {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
