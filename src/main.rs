//! jira-flow CLI
//!
//! Command-line interface for flow metrics over a Jira CSV export:
//! - Print a report for a date window
//! - Generate a default config file

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use jira_flow::config::{generate_default_config, Config};
use jira_flow::{render, DateWindow, FlowDataset, IssueCsvReader, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jira-flow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Flow metrics for Jira CSV exports")]
#[command(long_about = "Computes throughput, cycle time and defect density from a Jira CSV export.\nItems count as completed by Close Progress; bugs count as created by Created.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/jira-flow/config.toml or ./jira-flow.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print flow metrics for a date window
    Report {
        /// Path to the CSV export (default: from config, JIRA.csv)
        path: Option<PathBuf>,
        /// First day of the window, YYYY-MM-DD (default: earliest close)
        #[arg(short, long)]
        start: Option<NaiveDate>,
        /// Last day of the window, inclusive, YYYY-MM-DD (default: latest close)
        #[arg(short, long)]
        end: Option<NaiveDate>,
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Include the completed-item table
        #[arg(long)]
        items: bool,
        /// Number of cycle time histogram bins
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        bins: Option<u16>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    init_logging(&config);

    match cli.command {
        Commands::Report {
            path,
            start,
            end,
            format,
            items,
            bins,
        } => {
            let path = path.unwrap_or_else(|| config.source.path.clone());
            let ingest = IssueCsvReader::new()
                .with_delimiter(config.delimiter_byte())
                .read_path(&path)
                .with_context(|| format!("Failed to read {:?}", path))?;

            if ingest.rows_failed > 0 {
                eprintln!(
                    "Skipped {} undecodable rows ({} read)",
                    ingest.rows_failed, ingest.rows_read
                );
            }

            let dataset = FlowDataset::from_issues(ingest.records)?;

            let default_window = dataset.default_window();
            let window = DateWindow::new(
                start.unwrap_or(default_window.start),
                end.unwrap_or(default_window.end),
            );
            if window.is_empty() {
                tracing::warn!(window = %window, "End date precedes start date; nothing will match");
            }

            let mut charts = config.charts.chart_options();
            if let Some(bins) = bins {
                charts.histogram_bins = usize::from(bins);
            }

            let report = dataset.query(&window, &charts);
            let format = format.unwrap_or(config.output.format);
            let show_items = items || config.output.show_items;

            print!("{}", render(&report, format, show_items));
            if format == OutputFormat::Json {
                println!();
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber. Logs go to stderr; stdout carries the report.
fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
