//! Catalog sync CLI - push CSV quantities and unit costs to Shopify.
//!
//! # Usage
//!
//! ```bash
//! # Sync the file named by INVENTORY_CSV_PATH (or the default path)
//! catalog-sync
//!
//! # Sync a specific file, adjusting stock at one location
//! catalog-sync --file to_update.csv --location-id gid://shopify/Location/123
//!
//! # Structured logs
//! catalog-sync --json-logs
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Store domain (`SHOP` is accepted as a fallback)
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token
//! - `SHOPIFY_API_VERSION` - Admin API version
//! - `INVENTORY_CSV_PATH` - CSV file to sync
//! - `SHOPIFY_LOCATION_ID` - Pin adjustments to one location
//! - `THROTTLE_DEFAULT_WAIT_MS` - Wait after a throttle with no hint
//! - `RUST_LOG` - Log filter

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use catalog_sync::SyncConfig;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catalog-sync")]
#[command(author, version, about = "Sync CSV inventory and unit costs into Shopify")]
struct Cli {
    /// CSV file to read (overrides `INVENTORY_CSV_PATH`)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Location GID to adjust instead of the positional level rule
    #[arg(short, long)]
    location_id: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "catalog_sync=info,catalog_sync_cli=info".into());

    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env before the filter so RUST_LOG can live there
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = run(cli).await {
        tracing::error!("Sync failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), catalog_sync::SyncError> {
    let mut config = SyncConfig::from_env()?;
    if let Some(file) = cli.file {
        config.csv_path = file;
    }
    if cli.location_id.is_some() {
        config.location_id = cli.location_id;
    }

    tracing::info!(
        store = %config.shopify.store,
        api_version = %config.shopify.api_version,
        "Starting catalog sync"
    );

    let outcomes = catalog_sync::run(&config).await?;
    tracing::info!(processed = outcomes.len(), "Catalog sync finished");
    Ok(())
}
