use anyhow::{bail, Context, Result};
use clap::Parser;
use market_index::{IndexService, MarketScenario, MarketSeries, SyntheticSeriesGenerator};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Classify trend, momentum and volatility indicators for one symbol.
///
/// Prints the index report as JSON on stdout; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "market-index", version)]
struct Cli {
    /// Symbol the report is built for
    symbol: String,

    /// JSON array of bars ({high, low, close, volume, timestamp}); `-` reads stdin
    #[arg(short, long, conflicts_with = "synthetic")]
    input: Option<PathBuf>,

    /// Generate a seeded synthetic series instead of reading one
    #[arg(long, value_enum)]
    synthetic: Option<MarketScenario>,

    /// Number of synthetic bars
    #[arg(long, default_value_t = 300)]
    bars: usize,

    /// Seed for the synthetic generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Minutes between synthetic bars
    #[arg(long, default_value_t = 24 * 60)]
    interval_minutes: i64,

    /// Collapse intraday bars to the last bar of each UTC day
    #[arg(long)]
    daily: bool,

    /// Indicator configuration file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fan analyzers out across the blocking thread pool
    #[arg(long)]
    concurrent: bool,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();

    let service = IndexService::from_config_file(cli.config.as_deref())
        .context("failed to load indicator configuration")?;

    let mut series = load_series(&cli)?;
    if cli.daily {
        let intraday = series.len();
        series = series.daily();
        tracing::info!(intraday, daily = series.len(), "Collapsed series to daily bars");
    }

    let report = if cli.concurrent {
        service
            .build_report_concurrent(&cli.symbol, Arc::new(series))
            .await
    } else {
        service.build_report(&cli.symbol, &series)
    };

    let json = if cli.compact {
        serde_json::to_string(&report)
    } else {
        serde_json::to_string_pretty(&report)
    }
    .context("failed to encode report")?;

    println!("{json}");
    Ok(())
}

fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("market_index=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_series(cli: &Cli) -> Result<MarketSeries> {
    match (&cli.input, cli.synthetic) {
        (Some(path), _) if path.as_os_str() == "-" => {
            MarketSeries::from_json_reader(io::stdin().lock()).context("failed to parse bars from stdin")
        }
        (Some(path), _) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            MarketSeries::from_json_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse bars from {}", path.display()))
        }
        (None, Some(scenario)) => {
            let mut generator = SyntheticSeriesGenerator::new(cli.seed);
            Ok(generator.generate(scenario, cli.bars, cli.interval_minutes))
        }
        (None, None) => bail!("no bars given: pass --input FILE (or - for stdin) or --synthetic SCENARIO"),
    }
}
