//! Fatal errors for a sync run.

use thiserror::Error;

use crate::config::ConfigError;
use crate::records::RecordError;
use crate::shopify::AdminShopifyError;

/// Errors that stop a run before any SKU is processed.
///
/// Per-SKU failures never surface here; they are reported as
/// [`catalog_sync_core::SyncOutcome`] values.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The CSV file could not be read.
    #[error("Record source error: {0}")]
    Records(#[from] RecordError),

    /// The Shopify client could not be constructed.
    #[error("Shopify client error: {0}")]
    Shopify(#[from] AdminShopifyError),
}
