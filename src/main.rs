//! findash - command-line front end for the dashboard backend.
//!
//! # Usage
//! ```sh
//! FINDASH_API_URL=http://localhost:8000 findash etf-candles SBMX --limit 100
//! findash bond request.json
//! findash demo --symbol BTC/USDT --trades 10
//! ```
//!
//! Results are printed to stdout as pretty JSON; logs go to stderr.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use findash::application::{TaskTracker, TerminalStore, ThemeStore};
use findash::config::Config;
use findash::domain::ports::KeyValueStore;
use findash::domain::reference::{
    CryptoMarketsQuery, ExportedFile, YieldCurveInterpolationRequest,
};
use findash::domain::task::TaskKind;
use findash::infrastructure::services::etf::interval;
use findash::infrastructure::storage::keys;
use findash::infrastructure::{ApiClient, FileKeyValueStore, MockMarketData, Services};
use findash::interfaces::RootStyle;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "findash", version, about = "Financial dashboard backend client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the backtest engine is up
    Health,
    /// Run a backtest described by a JSON request file
    Backtest { request: PathBuf },
    /// Value a bond from a JSON request file
    Bond { request: PathBuf },
    /// Value an interest rate swap from a JSON request file
    Swap { request: PathBuf },
    /// Value a forward from a JSON request file
    Forward { request: PathBuf },
    /// Portfolio risk metrics for a JSON request file
    Portfolio { request: PathBuf },
    /// List exchange-traded funds
    EtfList,
    /// Price history of one ETF
    EtfCandles {
        ticker: String,
        #[arg(long, default_value_t = interval::DAY)]
        interval: u32,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        till: Option<NaiveDate>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Public holidays for a country and year
    Holidays { country: String, year: i32 },
    /// Crypto market snapshots
    Crypto {
        #[arg(long, default_value = "usd")]
        vs_currency: String,
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Look up a company by INN
    Company { inn: String },
    /// Look up a bank by BIC
    Bank { bic: String },
    /// Zero-coupon yield curve
    Zcyc {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Interpolate the yield curve at the given tenors (years)
    ZcycInterpolate {
        #[arg(required = true, value_delimiter = ',')]
        tenors: Vec<f64>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Download the instrument registry as parquet into the export directory
    ExportRegistry {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a mock trading terminal snapshot
    Demo {
        #[arg(long, default_value = "BTC/USDT")]
        symbol: String,
        #[arg(long, default_value_t = 96000.0)]
        price: f64,
        #[arg(long, default_value_t = 60)]
        candles: usize,
        #[arg(long, default_value_t = 10)]
        trades: usize,
    },
    /// Show or toggle the persisted theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Store or clear the API key sent with portfolio requests
    ApiKey {
        key: Option<String>,
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Setup logging (stderr, so stdout stays valid JSON)
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    let storage = Arc::new(FileKeyValueStore::new(config.storage.state_file()));
    if config.api.api_key.is_none() {
        // Fall back to the key saved with `findash api-key`
        if let Ok(Some(key)) = storage.get(keys::API_KEY) {
            config.api.api_key = Some(key);
        }
    }

    let client = ApiClient::new(config.api.clone()).context("Failed to build HTTP client")?;
    let services = Services::new(client);
    let tasks = TaskTracker::new(config.tasks);

    match cli.command {
        Command::Health => print_json(&services.backtest.health().await?),
        Command::Backtest { request } => {
            let request = read_request(&request)?;
            let id = tasks.add_task("Backtest", TaskKind::Backtest);
            tasks.update_progress(id, 10);
            let result = tasks.finish(id, services.backtest.run(&request).await)?;
            print_json(&result)
        }
        Command::Bond { request } => {
            print_json(&services.bond.valuate(&read_request(&request)?).await?)
        }
        Command::Swap { request } => {
            print_json(&services.swap.valuate(&read_request(&request)?).await?)
        }
        Command::Forward { request } => {
            print_json(&services.forward.valuate(&read_request(&request)?).await?)
        }
        Command::Portfolio { request } => {
            print_json(&services.portfolio.metrics(&read_request(&request)?).await?)
        }
        Command::EtfList => print_json(&services.etf.list().await?),
        Command::EtfCandles {
            ticker,
            interval,
            from,
            till,
            limit,
        } => print_json(
            &services
                .etf
                .candles(&ticker, interval, from, till, limit)
                .await?,
        ),
        Command::Holidays { country, year } => {
            print_json(&services.calendar.holidays(&country, year).await?)
        }
        Command::Crypto {
            vs_currency,
            ids,
            per_page,
            page,
        } => {
            let query = CryptoMarketsQuery {
                vs_currency: Some(vs_currency),
                ids: (!ids.is_empty()).then_some(ids),
                per_page,
                page,
            };
            print_json(&services.crypto.markets(&query).await?)
        }
        Command::Company { inn } => print_json(&services.company.company(&inn).await?),
        Command::Bank { bic } => print_json(&services.company.bank(&bic).await?),
        Command::Zcyc { date } => print_json(&services.yield_curve.curve(date).await?),
        Command::ZcycInterpolate { tenors, date } => {
            let request = YieldCurveInterpolationRequest { tenors, date };
            print_json(&services.yield_curve.interpolate(&request).await?)
        }
        Command::ExportRegistry { out } => {
            let id = tasks.add_task("Export registry (parquet)", TaskKind::Export);
            let dir = out.unwrap_or_else(|| config.storage.export_dir.clone());
            let exported = async {
                let file = services.database.export_registry_parquet().await?;
                tasks.update_progress(id, 50);
                let path = write_export(&dir, &file)?;
                Ok::<_, anyhow::Error>((path, file.bytes.len()))
            }
            .await;
            let (path, size) = tasks.finish(id, exported)?;

            info!("Registry written to {:?}", path);
            print_json(&serde_json::json!({
                "path": path,
                "bytes": size,
            }))
        }
        Command::Demo {
            symbol,
            price,
            candles,
            trades,
        } => {
            let generator = MockMarketData::from_entropy().with_seed_price(price);
            let mut terminal = TerminalStore::new(generator, symbol).with_candle_count(candles);
            for _ in 0..trades {
                terminal.tick();
            }
            print_json(&terminal.snapshot())
        }
        Command::Theme { toggle } => {
            let theme = ThemeStore::new(
                config.storage.theme_support,
                storage.clone(),
                Arc::new(RootStyle::new()),
            );
            theme.init_theme();
            let mode = if toggle {
                theme.toggle_theme()
            } else {
                theme.mode()
            };
            print_json(&serde_json::json!({ "theme": mode }))
        }
        Command::ApiKey { key, clear } => {
            if clear {
                storage.remove(keys::API_KEY)?;
                info!("API key cleared");
            } else if let Some(key) = key {
                storage.set(keys::API_KEY, key.trim())?;
                info!("API key saved to {:?}", storage.path());
            }
            let stored = storage.get(keys::API_KEY)?.is_some();
            print_json(&serde_json::json!({ "api_key_stored": stored }))
        }
    }
}

fn write_export(dir: &Path, file: &ExportedFile) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.bytes).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(path)
}

fn read_request<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}
