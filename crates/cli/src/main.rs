use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use stockscope_analysis::{decompose, indicator_table, snapshot, DecompositionModel};
use stockscope_core::{PriceHistory, PriceSeries};
use stockscope_data::CsvPriceHistory;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "stockscope")]
#[command(about = "Stock analysis pipeline — indicators, decomposition, and session snapshots")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Directory holding per-ticker daily CSV files
    #[arg(long, env = "STOCKSCOPE_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest session vs the one before it (the metric-tile numbers)
    Snapshot {
        /// Ticker symbol (e.g. "AAPL")
        #[arg(short, long)]
        ticker: String,
    },

    /// Combined indicator table: SMA/EMA 20/50, Bollinger, MACD, RSI
    Indicators {
        #[arg(short, long)]
        ticker: String,

        /// First trading day to include (default: full history)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last trading day to include (default: full history)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Emit JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// Classical seasonal decomposition of the closes
    Decompose {
        #[arg(short, long)]
        ticker: String,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long)]
        end: Option<NaiveDate>,

        /// Decomposition model: "additive" or "multiplicative"
        #[arg(short, long, default_value = "additive")]
        model: String,

        /// Seasonal period in trading days
        #[arg(long, default_value = "30")]
        period: usize,

        #[arg(long)]
        json: bool,
    },

    /// List tickers available in the data directory
    Tickers,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    let provider = CsvPriceHistory::new(&cli.data_dir);

    match cli.command {
        Commands::Snapshot { ticker } => run_snapshot(&provider, &ticker)?,
        Commands::Indicators {
            ticker,
            start,
            end,
            json,
        } => run_indicators(&provider, &ticker, start, end, json)?,
        Commands::Decompose {
            ticker,
            start,
            end,
            model,
            period,
            json,
        } => run_decompose(&provider, &ticker, start, end, &model, period, json)?,
        Commands::Tickers => {
            for ticker in provider.available_tickers()? {
                println!("{ticker}");
            }
        }
    }

    Ok(())
}

/// Load a ticker's history and cut it to the requested date window.
fn load_window(
    provider: &CsvPriceHistory,
    ticker: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<PriceSeries> {
    let full = provider.history(ticker)?;
    tracing::info!(ticker, days = full.len(), "Loaded history");

    let series = match (full.first(), full.last()) {
        (Some(first), Some(last)) => {
            full.between(start.unwrap_or(first.date), end.unwrap_or(last.date))
        }
        _ => full,
    };
    if series.is_empty() {
        anyhow::bail!("No {ticker} data in the requested date range");
    }
    Ok(series)
}

fn run_snapshot(provider: &CsvPriceHistory, ticker: &str) -> Result<()> {
    let series = provider.history(ticker)?;
    let snap = snapshot(&series)?;

    println!("{ticker} — {}", snap.date);
    println!("  Close:   {:.2} USD", snap.close);
    println!(
        "  Change:  {:.2} ({:.2}%)",
        snap.change, snap.change_percent
    );
    println!("  High:    {:.2} USD", snap.high);
    println!("  Low:     {:.2} USD", snap.low);
    println!("  Volume:  {}", format_volume(snap.volume));
    Ok(())
}

fn run_indicators(
    provider: &CsvPriceHistory,
    ticker: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let series = load_window(provider, ticker, start, end)?;
    let table = indicator_table(&series)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!(
        "{:<12} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>7}",
        "Date", "Close", "SMA20", "SMA50", "EMA20", "EMA50", "BB High", "BB Low", "MACD", "Signal",
        "RSI"
    );
    for row in table.rows() {
        println!(
            "{:<12} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.4} {:>9.4} {:>7.2}",
            row.date.to_string(),
            row.close,
            row.sma_20,
            row.sma_50,
            row.ema_20,
            row.ema_50,
            row.bollinger_high,
            row.bollinger_low,
            row.macd,
            row.macd_signal,
            row.rsi,
        );
    }
    println!("{} rows", table.len());
    Ok(())
}

fn run_decompose(
    provider: &CsvPriceHistory,
    ticker: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    model: &str,
    period: usize,
    json: bool,
) -> Result<()> {
    let model = match model {
        "additive" => DecompositionModel::Additive,
        "multiplicative" => DecompositionModel::Multiplicative,
        other => anyhow::bail!("Unknown model '{other}': expected additive or multiplicative"),
    };

    let series = load_window(provider, ticker, start, end)?;
    let result = decompose(&series, model, period)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{:<12} {:>10} {:>10} {:>10} {:>10}",
        "Date", "Observed", "Trend", "Seasonal", "Residual"
    );
    for i in 0..result.dates.len() {
        println!(
            "{:<12} {:>10.2} {:>10} {:>10.4} {:>10}",
            result.dates[i].to_string(),
            result.observed[i],
            format_component(result.trend[i], 2),
            result.seasonal[i],
            format_component(result.residual[i], 4),
        );
    }
    Ok(())
}

/// Render an undefined component as a dash rather than a fabricated value.
fn format_component(value: Option<Decimal>, places: usize) -> String {
    match value {
        Some(v) => format!("{v:.places$}"),
        None => "-".to_string(),
    }
}

fn format_volume(volume: u64) -> String {
    if volume > 1_000_000 {
        format!("{:.2}M", volume as f64 / 1_000_000.0)
    } else {
        volume.to_string()
    }
}
