//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvQuoteAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::tesseract_adapter::TesseractAdapter;
use crate::domain::error::TickerTrackError;
use crate::domain::extractor::extract_tickers;
use crate::domain::policy::ExtractionPolicy;
use crate::domain::position::{StrategyTag, TrackedPosition};
use crate::domain::tabular::SourceKind;
use crate::domain::tracker;
use crate::ports::config_port::ConfigPort;
use crate::ports::position_store_port::PositionStorePort;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

#[derive(Parser, Debug)]
#[command(
    name = "tickertrack",
    about = "Pull ticker symbols out of watchlist exports and track positions"
)]
pub struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the tickers found in a file, one per line
    Extract {
        file: PathBuf,
        #[arg(short, long, value_enum)]
        kind: Option<InputKind>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Track a single ticker at its current price
    Add {
        #[arg(short, long)]
        ticker: String,
        #[arg(short, long, default_value = "investment")]
        strategy: String,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Track every ticker found in a file
    Import {
        file: PathBuf,
        #[arg(short, long, value_enum)]
        kind: Option<InputKind>,
        #[arg(short, long, default_value = "investment")]
        strategy: String,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show tracked positions
    List {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Stop tracking a position
    Remove {
        #[arg(long)]
        id: i64,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Re-quote every tracked position
    Refresh {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Csv,
    Spreadsheet,
    Text,
    Image,
}

impl InputKind {
    /// Kind implied by the file extension; anything unrecognised is read as delimited text.
    pub fn from_path(path: &Path) -> Self {
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false);
        if is_image {
            return Self::Image;
        }
        match SourceKind::from_path(path) {
            Some(SourceKind::Spreadsheet) => Self::Spreadsheet,
            Some(SourceKind::PlainText) => Self::Text,
            Some(SourceKind::Delimited) | None => Self::Csv,
        }
    }
}

pub fn resolve_kind(path: &Path, kind: Option<InputKind>) -> InputKind {
    kind.unwrap_or_else(|| InputKind::from_path(path))
}

pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "tickertrack=debug"
    } else {
        "tickertrack=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Extract { file, kind, config } => run_extract(&file, kind, config.as_deref()),
        Command::Add {
            ticker,
            strategy,
            config,
        } => run_add(&ticker, &strategy, &config),
        Command::Import {
            file,
            kind,
            strategy,
            config,
        } => run_import(&file, kind, &strategy, &config),
        Command::List { config } => run_list(&config),
        Command::Remove { id, config } => run_remove(id, &config),
        Command::Refresh { config } => run_refresh(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TickerTrackError> {
    debug!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

/// Tickers found in `file`, read according to `kind`.
pub fn extract_file(
    file: &Path,
    kind: InputKind,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, TickerTrackError> {
    let policy = ExtractionPolicy::from_config(config)?;
    let content = fs::read(file)?;

    let tickers = match kind {
        InputKind::Image => {
            let ocr = TesseractAdapter::from_config(config);
            tracker::import_screenshot(&ocr, &content, &policy)?
        }
        InputKind::Csv => extract_tickers(&content, SourceKind::Delimited, &policy),
        InputKind::Spreadsheet => extract_tickers(&content, SourceKind::Spreadsheet, &policy),
        InputKind::Text => extract_tickers(&content, SourceKind::PlainText, &policy),
    };
    Ok(tickers)
}

fn run_extract(
    file: &Path,
    kind: Option<InputKind>,
    config_path: Option<&Path>,
) -> Result<(), TickerTrackError> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => FileConfigAdapter::empty(),
    };

    for ticker in extract_file(file, resolve_kind(file, kind), &config)? {
        println!("{ticker}");
    }
    Ok(())
}

fn run_add(ticker: &str, strategy: &str, config_path: &Path) -> Result<(), TickerTrackError> {
    let strategy: StrategyTag = strategy.parse()?;
    let config = load_config(config_path)?;
    let market = CsvQuoteAdapter::from_config(&config)?;

    with_store(&config, |store| {
        let position = tracker::add_position(store, &market, ticker, strategy)?;
        println!(
            "added #{} {} at {:.2}",
            position.id, position.ticker, position.entry_price
        );
        Ok(())
    })
}

fn run_import(
    file: &Path,
    kind: Option<InputKind>,
    strategy: &str,
    config_path: &Path,
) -> Result<(), TickerTrackError> {
    let strategy: StrategyTag = strategy.parse()?;
    let config = load_config(config_path)?;
    let tickers = extract_file(file, resolve_kind(file, kind), &config)?;
    if tickers.is_empty() {
        eprintln!("No tickers found in {}", file.display());
        return Ok(());
    }

    let market = CsvQuoteAdapter::from_config(&config)?;
    with_store(&config, |store| {
        let report = tracker::import_tickers(store, &market, &tickers, strategy)?;
        for position in &report.added {
            println!(
                "added #{} {} at {:.2}",
                position.id, position.ticker, position.entry_price
            );
        }
        for skipped in &report.skipped {
            eprintln!("warning: skipped {} ({})", skipped.ticker, skipped.reason);
        }
        eprintln!(
            "{} added, {} skipped",
            report.added.len(),
            report.skipped.len()
        );
        Ok(())
    })
}

fn run_list(config_path: &Path) -> Result<(), TickerTrackError> {
    let config = load_config(config_path)?;
    with_store(&config, |store| {
        let positions = store.list()?;
        if positions.is_empty() {
            eprintln!("No tracked positions");
            return Ok(());
        }
        println!("{}", table_header());
        for position in &positions {
            println!("{}", format_position(position));
        }
        Ok(())
    })
}

fn run_remove(id: i64, config_path: &Path) -> Result<(), TickerTrackError> {
    let config = load_config(config_path)?;
    with_store(&config, |store| {
        tracker::remove_position(store, id)?;
        println!("removed #{id}");
        Ok(())
    })
}

fn run_refresh(config_path: &Path) -> Result<(), TickerTrackError> {
    let config = load_config(config_path)?;
    let market = CsvQuoteAdapter::from_config(&config)?;
    with_store(&config, |store| {
        let positions = tracker::refresh_prices(store, &market)?;
        println!("{}", table_header());
        for position in &positions {
            println!("{}", format_position(position));
        }
        Ok(())
    })
}

#[cfg(feature = "sqlite")]
fn with_store<F>(config: &dyn ConfigPort, f: F) -> Result<(), TickerTrackError>
where
    F: FnOnce(&dyn PositionStorePort) -> Result<(), TickerTrackError>,
{
    use crate::adapters::sqlite_adapter::SqliteAdapter;

    let store = SqliteAdapter::from_config(config)?;
    store.initialize_schema()?;
    f(&store)
}

#[cfg(not(feature = "sqlite"))]
fn with_store<F>(_config: &dyn ConfigPort, _f: F) -> Result<(), TickerTrackError>
where
    F: FnOnce(&dyn PositionStorePort) -> Result<(), TickerTrackError>,
{
    Err(TickerTrackError::Database {
        reason: "sqlite feature is required for position tracking".into(),
    })
}

pub fn table_header() -> String {
    format!(
        "{:>4}  {:<8}  {:<10}  {:>10}  {:>10}  {:>8}  {:>8}  {}",
        "ID", "TICKER", "STRATEGY", "ENTRY", "CURRENT", "DAY %", "ROI %", "ADDED"
    )
}

pub fn format_position(position: &TrackedPosition) -> String {
    let current = position
        .current_price
        .map(|p| format!("{p:.2}"))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:>4}  {:<8}  {:<10}  {:>10.2}  {:>10}  {:>8.2}  {:>8.2}  {}",
        position.id,
        position.ticker,
        position.strategy.as_str(),
        position.entry_price,
        current,
        position.daily_change_or_zero(),
        position.roi_percent(),
        position.added_at.format("%Y-%m-%d %H:%M"),
    )
}
