//! Shinedesk day close
//!
//! Reads an order export, builds the daily cash report of one branch and
//! prints it as JSON.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use shinedesk_core::cash::{DailyCashAggregator, DenominationCount, DenominationSet};
use shinedesk_core::order::{InMemoryOrderRepository, Order, OrderRepository};
use shinedesk_shared::config::LoggingConfig;
use shinedesk_shared::types::BranchId;
use shinedesk_shared::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "shinedesk-dayclose", version, about = "Build the daily cash report of a branch")]
struct Cli {
    /// JSON file holding an array of orders
    #[arg(long)]
    orders: PathBuf,

    /// Branch to report on
    #[arg(long)]
    branch: BranchId,

    /// Business day (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    /// JSON file with the drawer count, e.g. {"20000": 2, "1000": 3}
    #[arg(long)]
    count: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let repository = load_orders(&cli.orders, &config)?;
    let orders = repository
        .list_by_day(&cli.branch, cli.date)
        .context("Failed to list orders")?;
    info!(
        branch_id = %cli.branch,
        business_date = %cli.date,
        loaded = repository.len(),
        selected = orders.len(),
        "Orders loaded"
    );

    let denominations =
        DenominationSet::from_config(&config.cash).context("Invalid denomination configuration")?;
    let count = cli
        .count
        .as_deref()
        .map(|path| load_count(path, denominations))
        .transpose()?;

    let report = DailyCashAggregator::aggregate(cli.branch, cli.date, &orders, count.as_ref());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so the report on stdout stays machine-readable.
    if logging.json {
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

/// Orders whose policy does not name a VAT rate are billed at the configured one.
fn load_orders(path: &Path, config: &AppConfig) -> Result<InMemoryOrderRepository> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read orders from {}", path.display()))?;
    let records: Vec<Value> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of orders", path.display()))?;

    let vat_rate = serde_json::to_value(config.settlement.vat_rate)?;

    let orders = records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            let policy = record.as_object_mut().and_then(|fields| {
                fields
                    .entry("policy")
                    .or_insert_with(|| json!({}))
                    .as_object_mut()
            });
            if let Some(policy) = policy {
                policy
                    .entry("vat_rate")
                    .or_insert_with(|| vat_rate.clone());
            }
            serde_json::from_value::<Order>(record)
                .with_context(|| format!("Order #{index} in {} is malformed", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    InMemoryOrderRepository::from_orders(orders).context("Order export failed validation")
}

fn load_count(path: &Path, denominations: DenominationSet) -> Result<DenominationCount> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read drawer count from {}", path.display()))?;
    let entries: HashMap<String, i64> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a denomination map", path.display()))?;

    let counts = entries
        .into_iter()
        .map(|(face, count)| {
            face.trim()
                .parse::<u32>()
                .map(|denomination| (denomination, count))
                .with_context(|| format!("Invalid denomination {face:?}"))
        })
        .collect::<Result<Vec<_>>>()?;

    DenominationCount::from_counts(denominations, counts).context("Invalid drawer count")
}
