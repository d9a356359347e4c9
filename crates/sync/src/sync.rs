//! Per-SKU inventory sync.
//!
//! For one record the driver looks up the variant, writes the unit cost,
//! picks an inventory level and applies the quantity difference as a
//! relative adjustment. A throttle rejection at any step restarts the
//! whole sequence after the [`ThrottleGuard`] wait, so every attempt works
//! from freshly read quantities.

use catalog_sync_core::{
    CostOutcome, LevelSelectionError, LevelSelector, SyncOutcome, quantity_delta,
};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::catalog::Catalog;
use crate::records::Record;
use crate::shopify::AdminShopifyError;
use crate::throttle::ThrottleGuard;

/// Drives the lookup, cost update and quantity adjustment for one SKU.
#[derive(Debug)]
pub struct InventorySync<C> {
    catalog: C,
    throttle: ThrottleGuard,
    selector: LevelSelector,
}

impl<C: Catalog> InventorySync<C> {
    /// Create a driver over `catalog`.
    #[must_use]
    pub const fn new(catalog: C, throttle: ThrottleGuard, selector: LevelSelector) -> Self {
        Self {
            catalog,
            throttle,
            selector,
        }
    }

    /// The underlying catalog.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Sync one record, retrying from the lookup after every throttle wait.
    ///
    /// Never fails: errors other than throttling end this SKU with
    /// [`SyncOutcome::Failed`].
    #[instrument(skip(self, record), fields(sku = %record.sku))]
    pub async fn sync(&self, record: &Record) -> SyncOutcome {
        let mut attempt: u32 = 1;
        loop {
            let err = match self.attempt(record).await {
                Ok(outcome) => return outcome,
                Err(err) => err,
            };

            match self.throttle.absorb(err).await {
                Ok(()) => {
                    attempt += 1;
                    tracing::info!(attempt, "Retrying SKU after rate limit");
                }
                Err(err) => {
                    tracing::error!(error = %err, details = ?err, "Error updating SKU {}", record.sku);
                    return SyncOutcome::Failed {
                        reason: err.to_string(),
                    };
                }
            }
        }
    }

    async fn attempt(&self, record: &Record) -> Result<SyncOutcome, AdminShopifyError> {
        let Some(variant) = self.catalog.find_variant(&record.sku).await? else {
            tracing::info!("SKU {} not found or has no variants", record.sku);
            return Ok(SyncOutcome::NotFound);
        };

        let item = &variant.inventory_item;
        match &item.unit_cost {
            Some(current) => tracing::info!(current_cost = %current, "Current cost found"),
            None => tracing::info!("No existing cost found"),
        }

        let cost = self.update_cost(&item.id, record.unit_cost).await?;

        let level = match self.selector.select(&item.levels) {
            Ok(level) => level,
            Err(LevelSelectionError::InsufficientLocations { found }) => {
                tracing::info!(found, "Not enough locations available to update inventory");
                return Ok(SyncOutcome::InsufficientLocations { cost, found });
            }
            Err(LevelSelectionError::LocationNotStocked { location_id }) => {
                tracing::info!(%location_id, "Item not stocked at configured location");
                return Ok(SyncOutcome::LocationNotStocked { cost, location_id });
            }
        };

        let Some(current) = level.available else {
            tracing::warn!(level_id = %level.id, "No available quantity reported, not adjusting");
            return Ok(SyncOutcome::QuantityUnknown {
                cost,
                level_id: level.id.clone(),
            });
        };

        let delta = quantity_delta(record.quantity, current);
        let errors = self
            .catalog
            .adjust_available(&item.id, &level.location_id, delta)
            .await?;

        if errors.is_empty() {
            tracing::info!(
                level_id = %level.id,
                location = level.location_name.as_deref().unwrap_or(&level.location_id),
                from = current,
                to = record.quantity,
                delta,
                "Updated inventory"
            );
            Ok(SyncOutcome::Adjusted {
                cost,
                level_id: level.id.clone(),
                delta,
            })
        } else {
            tracing::warn!(?errors, "Inventory level update errors");
            Ok(SyncOutcome::AdjustRejected { cost, errors })
        }
    }

    /// Write the unit cost. Only throttle rejections are returned as errors;
    /// every other failure is recorded so the quantity step still runs.
    async fn update_cost(
        &self,
        inventory_item_id: &str,
        cost: Option<Decimal>,
    ) -> Result<CostOutcome, AdminShopifyError> {
        let Some(cost) = cost else {
            tracing::info!("No unit cost in source row, leaving cost unchanged");
            return Ok(CostOutcome::Skipped);
        };

        match self.catalog.update_unit_cost(inventory_item_id, cost).await {
            Ok(errors) if errors.is_empty() => {
                tracing::info!(%cost, "Updated inventory item cost");
                Ok(CostOutcome::Updated)
            }
            Ok(errors) => {
                tracing::warn!(?errors, "Cost update user errors");
                Ok(CostOutcome::Rejected(errors))
            }
            Err(err) if err.is_throttled() => Err(err),
            Err(err) => {
                tracing::error!(error = %err, "Cost update failed, continuing with quantity");
                Ok(CostOutcome::Failed(err.to_string()))
            }
        }
    }
}
