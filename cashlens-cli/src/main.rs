use anyhow::{bail, Context, Result};
use cashlens_core::CategorizationPolicy;
use cashlens_ingest::SAMPLE_CSV;
use cashlens_metrics::{analyze_with, AnalysisOptions};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod report;
mod state;

use config::{load_config, OutputFormat};
use report::TextStyle;

#[derive(Parser, Debug)]
#[command(
    name = "cashlens",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CASHLENS_BUILD_SHA"), ")"),
    about = "Cashflow stability score from a bank statement CSV"
)]
struct Cli {
    /// Config file (default: ~/.cashlens/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a statement export and print the report
    Analyze {
        /// Statement CSV with date, type, description, amount, current balance columns
        file: PathBuf,

        /// Output format (overrides config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Classify income/expense by transaction type instead of amount sign
        #[arg(long)]
        by_type: bool,

        /// Also write the monthly series to this CSV file
        #[arg(long)]
        chart_csv: Option<PathBuf>,

        /// Hide skipped-row warnings
        #[arg(long)]
        no_warnings: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the expected CSV format
    Template,

    /// Manage ~/.cashlens/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config location
    Path,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze {
            file,
            format,
            by_type,
            chart_csv,
            no_warnings,
            no_color,
        } => {
            let cfg = load_config(cli.config.as_deref())?;

            let format = format.unwrap_or(cfg.report.format);
            let color = cfg.report.color && !no_color;
            let show_warnings = cfg.report.show_warnings && !no_warnings;
            let categorization = if by_type {
                CategorizationPolicy::TypeName
            } else {
                cfg.analysis.categorization
            };

            if !color {
                colored::control::set_override(false);
            }

            return run_analyze(
                &file,
                format,
                AnalysisOptions { categorization },
                chart_csv.as_deref(),
                TextStyle { color, show_warnings },
            )
            .await;
        }

        Command::Template => {
            println!("Expected CSV format (header names are case-insensitive, extra columns are ignored):\n");
            println!("{}", SAMPLE_CSV);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let cfg = load_config(cli.config.as_deref())?;
                print!("{}", config::render_config(&cfg)?);
            }
            ConfigCommand::Path => {
                let p = match cli.config {
                    Some(p) => p,
                    None => config::default_config_path()?,
                };
                println!("{}", p.display());
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn ensure_csv_extension(path: &Path) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        bail!("Please upload a CSV file ({})", path.display());
    }
    Ok(())
}

async fn run_analyze(
    file: &Path,
    format: OutputFormat,
    options: AnalysisOptions,
    chart_csv: Option<&Path>,
    style: TextStyle,
) -> Result<ExitCode> {
    ensure_csv_extension(file)?;

    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    debug!(bytes = text.len(), path = %file.display(), "read statement");

    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let analysis = match analyze_with(&text, &options) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", report::render_error(&e, style.color));
            return Ok(ExitCode::FAILURE);
        }
    };

    match format {
        OutputFormat::Text => print!("{}", report::render_text(&analysis, &file_name, style)),
        OutputFormat::Json => println!("{}", report::render_json(&analysis, &file_name)?),
    }

    if let Some(path) = chart_csv {
        export::write_chart_csv_file(path, &analysis.result.chart_data)?;
        eprintln!("Wrote monthly series to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}
