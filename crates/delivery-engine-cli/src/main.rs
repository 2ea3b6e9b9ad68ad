//! `delivery`: estimate when an order will be received.
//!
//! ## Usage
//!
//! ```bash
//! delivery receive 2024-01-07 --time morning   # 2024-01-08
//! delivery format 2024-01-08                   # Monday, January 8, 2024
//! delivery day 2024-01-07                      # Sunday
//! delivery --json estimate 2024-01-07          # full estimate as JSON
//! ```
//!
//! Logs go to stderr. `-v` enables debug output, `-vv` trace; `RUST_LOG` overrides both.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "delivery",
    version,
    about = "Estimate order receiving dates",
    after_help = "Examples:\n  delivery receive 2024-01-07 --time morning\n  delivery --json estimate 2024-01-07"
)]
struct Cli {
    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the receiving date for a purchase date
    Receive {
        /// Purchase date (YYYY-MM-DD or ISO 8601 datetime); omit for none
        date: Option<String>,
        /// Preferred delivery window (e.g., morning, evening)
        #[arg(long)]
        time: Option<String>,
    },
    /// Print the long-form label for a date
    Format {
        /// Date (YYYY-MM-DD or ISO 8601 datetime); omit for none
        date: Option<String>,
    },
    /// Print the weekday name for a date
    Day {
        /// Date (YYYY-MM-DD or ISO 8601 datetime); omit for none
        date: Option<String>,
    },
    /// Print the full delivery estimate for a purchase date
    Estimate {
        /// Purchase date (YYYY-MM-DD or ISO 8601 datetime); omit for none
        date: Option<String>,
        /// Preferred delivery window (e.g., morning, evening)
        #[arg(long)]
        time: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = run(&cli)?;
    println!("{}", output);
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Receive { date, time } => {
            tracing::debug!(?date, ?time, "computing receiving date");
            let receiving =
                delivery_engine::compute_receiving_date(date.as_deref(), window(time.as_deref()))
                    .with_context(|| "Failed to compute receiving date")?;
            tracing::debug!(?receiving, "receiving date computed");
            Ok(match (cli.json, receiving) {
                (true, r) => json!({ "receiving_date": r }).to_string(),
                (false, Some(r)) => r.to_string(),
                (false, None) => "null".to_string(),
            })
        }
        Command::Format { date } => {
            let label = delivery_engine::format_delivery_date(date.as_deref())
                .with_context(|| "Failed to format delivery date")?;
            Ok(render_label(cli.json, "formatted", label))
        }
        Command::Day { date } => {
            let name = delivery_engine::day_name(date.as_deref())
                .with_context(|| "Failed to compute day name")?;
            Ok(render_label(cli.json, "day_name", name))
        }
        Command::Estimate { date, time } => {
            tracing::debug!(?date, ?time, "estimating delivery");
            let estimate =
                delivery_engine::estimate_delivery(date.as_deref(), window(time.as_deref()))
                    .with_context(|| "Failed to estimate delivery")?;
            if estimate.shifted_from_sunday {
                tracing::info!(
                    purchase_date = ?estimate.purchase_date,
                    "Sunday purchase moved to Monday"
                );
            }
            if cli.json {
                serde_json::to_string_pretty(&estimate).context("Failed to serialize estimate")
            } else {
                Ok(render_estimate_text(&estimate))
            }
        }
    }
}

fn window(time: Option<&str>) -> &str {
    time.unwrap_or_default()
}

fn render_label(as_json: bool, key: &str, value: String) -> String {
    if as_json {
        json!({ key: value }).to_string()
    } else {
        value
    }
}

fn render_estimate_text(estimate: &delivery_engine::DeliveryEstimate) -> String {
    let mut lines = vec![
        format!("purchase date:  {}", or_null(estimate.purchase_date)),
        format!("receiving date: {}", or_null(estimate.receiving_date)),
        format!("delivers:       {}", estimate.formatted),
    ];
    if estimate.preferred_delivery_time.is_specified() {
        lines.push(format!("window:         {}", estimate.preferred_delivery_time));
    }
    if estimate.shifted_from_sunday {
        lines.push("note:           Sunday purchase, moved to Monday".to_string());
    }
    lines.join("\n")
}

fn or_null<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "null".to_string())
}
