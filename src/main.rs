//! PropShop CLI
//!
//! Reads a board of scraped sportsbook lines (JSON, keyed by player),
//! finds props that beat the DFS parlay break-even rates, and prints the
//! report to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use propshop::config::{AppConfig, OutputFormat};
use propshop::input::read_board;
use propshop::report::{build_report, text::render_text};
use propshop::strategy::OddsAnalyzer;

/// Find +EV DFS picks from sportsbook player-prop odds.
#[derive(Parser)]
#[command(name = "propshop", version, about)]
struct Cli {
    /// Quote board JSON: {"<player>": [{"stat", "line", "over_odds", "under_odds"}]}.
    /// Reads stdin when omitted or "-".
    input: Option<PathBuf>,

    /// Configuration file; must exist when given. Defaults to ./config.toml
    /// if present, else the built-in bet catalog.
    #[arg(long, short, env = "PROPSHOP_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (overrides config).
    #[arg(long, short, value_enum)]
    format: Option<OutputFormat>,

    /// Single-line JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    init_logging();

    let cfg = AppConfig::resolve(cli.config.as_deref())?;

    let catalog = cfg.catalog()?;
    info!(
        name = %cfg.analyzer.name,
        bet_types = catalog.len(),
        min_threshold = format!("{:.2}%", catalog.min_threshold()),
        "Analyzer ready"
    );

    let board = read_board(cli.input.as_deref(), std::io::stdin())?;
    let analyzer = OddsAnalyzer::new(catalog);
    let analysis = analyzer.analyze(&board)?;

    let format = cli.format.unwrap_or(cfg.output.format);
    match format {
        OutputFormat::Text => print!("{}", render_text(&analysis.opportunities)),
        OutputFormat::Json => {
            let report = build_report(&analysis).with_timestamp(Utc::now());
            let json = if cfg.output.pretty && !cli.compact {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            }
            .context("Failed to serialise report")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Initialise the `tracing` subscriber on stderr.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("propshop=info"));

    let json_logging = std::env::var("PROPSHOP_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
