//! Sequential batch processing of CSV rows.

use catalog_sync_core::{Sku, SyncOutcome};

use crate::catalog::Catalog;
use crate::records::{RawRecord, Record};
use crate::sync::InventorySync;

/// Run every valid row through `sync`, strictly one SKU at a time.
///
/// Rows without a SKU or with a non-integer quantity are skipped and never
/// reach the catalog. Outcomes are returned in file order.
pub async fn run_batch<C: Catalog>(
    sync: &InventorySync<C>,
    rows: Vec<RawRecord>,
) -> Vec<(Sku, SyncOutcome)> {
    let mut outcomes = Vec::with_capacity(rows.len());

    for (index, raw) in rows.iter().enumerate() {
        let record = match Record::try_from(raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(row = index + 1, error = %e, "Skipping row");
                continue;
            }
        };

        let outcome = sync.sync(&record).await;
        tracing::info!(sku = %record.sku, %outcome, "Processed SKU");
        outcomes.push((record.sku, outcome));
    }

    outcomes
}
