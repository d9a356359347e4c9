//! Catalog sync library.
//!
//! Reads SKU, quantity and unit cost rows from a CSV file and pushes them to
//! a Shopify store through the Admin GraphQL API. Each SKU gets a cost
//! update followed by a relative quantity adjustment at one inventory
//! location, with rate-limited calls waited out and retried.
//!
//! # Security
//!
//! The access token is held as a [`secrecy::SecretString`] and never logged.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod batch;
pub mod catalog;
pub mod config;
pub mod error;
pub mod records;
pub mod shopify;
pub mod sync;
pub mod throttle;

use catalog_sync_core::{LevelSelector, Sku, SyncOutcome};

pub use batch::run_batch;
pub use catalog::Catalog;
pub use config::{ConfigError, ShopifyAdminConfig, SyncConfig};
pub use error::SyncError;
pub use records::{RawRecord, Record, RecordError, load_records};
pub use shopify::{AdminClient, AdminShopifyError};
pub use sync::InventorySync;
pub use throttle::ThrottleGuard;

/// Run a full sync against the store described by `config`.
///
/// # Errors
///
/// Returns an error if the Shopify client cannot be built or the CSV file
/// cannot be read. Per-SKU failures are reported in the returned outcomes.
pub async fn run(config: &SyncConfig) -> Result<Vec<(Sku, SyncOutcome)>, SyncError> {
    let client = AdminClient::new(&config.shopify)?;
    sync_file(config, client).await
}

/// Load the configured CSV file and sync every row through `catalog`.
///
/// # Errors
///
/// Returns an error if the CSV file cannot be read.
pub async fn sync_file<C: Catalog>(
    config: &SyncConfig,
    catalog: C,
) -> Result<Vec<(Sku, SyncOutcome)>, SyncError> {
    let rows = load_records(&config.csv_path)?;
    tracing::info!(
        path = %config.csv_path.display(),
        rows = rows.len(),
        "Loaded inventory rows"
    );

    let sync = InventorySync::new(
        catalog,
        ThrottleGuard::new(config.throttle_default_wait),
        LevelSelector::from_location(config.location_id.clone()),
    );

    Ok(run_batch(&sync, rows).await)
}
