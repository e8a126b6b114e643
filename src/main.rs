//! CLI entry point for the Olympic transition reports.
//!
//! Every subcommand runs with the stock paths and allow-lists when given no
//! flags; `--config` overrides any part of them from a JSON file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use olympic_transition::config::ReportConfig;
use olympic_transition::loader::Dataset;
use olympic_transition::output::print_json;
use olympic_transition::preprocess::filter_dataset;
use olympic_transition::reports::{medals, participation, ppm};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "olympic_transition")]
#[command(
    about = "Compare Soviet and post-Soviet Olympic results across the 1992 transition",
    long_about = None
)]
struct Cli {
    /// JSON file overriding the default report configuration
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stacked participation bars per Games
    Participation {
        /// Chart file to write (.png or .svg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Grouped Gold/Silver/Bronze bars per Games
    Medals {
        /// Chart file to write (.png or .svg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Participations-per-medal line chart
    Ppm {
        /// Chart file to write (.png or .svg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run all three reports into one directory
    All {
        /// Directory to write the charts and summaries to
        #[arg(short = 'd', long)]
        output_dir: Option<PathBuf>,
    },
    /// Reduce the full athlete-event table to the allowed Games and delegations
    FilterDataset {
        /// Full source CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Filtered CSV to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration as JSON
    ShowConfig,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/olympic_transition.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("olympic_transition.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    match cli.command {
        Commands::Participation { output } => {
            let dataset = Dataset::load(&config.data)?;
            let chart = output.unwrap_or_else(|| config.chart_path(participation::NAME));
            participation::run(&dataset, &config, &chart)?;
        }
        Commands::Medals { output } => {
            let dataset = Dataset::load(&config.data)?;
            let chart = output.unwrap_or_else(|| config.chart_path(medals::NAME));
            medals::run(&dataset, &config, &chart)?;
        }
        Commands::Ppm { output } => {
            let dataset = Dataset::load(&config.data)?;
            let chart = output.unwrap_or_else(|| config.chart_path(ppm::NAME));
            ppm::run(&dataset, &config, &chart)?;
        }
        Commands::All { output_dir } => {
            if let Some(dir) = output_dir {
                config.data.output_dir = dir;
            }
            let dataset = Dataset::load(&config.data)?;
            participation::run(&dataset, &config, &config.chart_path(participation::NAME))?;
            medals::run(&dataset, &config, &config.chart_path(medals::NAME))?;
            ppm::run(&dataset, &config, &config.chart_path(ppm::NAME))?;
            info!(output_dir = %config.data.output_dir.display(), "All reports written");
        }
        Commands::FilterDataset { input, output } => {
            let input = input.unwrap_or_else(|| config.data.raw_athletes.clone());
            let output = output.unwrap_or_else(|| config.data.athletes.clone());
            let written = filter_dataset(&input, &output, &config.allow_list)?;
            info!(
                rows = written,
                output = %output.display(),
                "Filtered and sorted data has been saved"
            );
        }
        Commands::ShowConfig => {
            print_json(&config)?;
        }
    }

    Ok(())
}
