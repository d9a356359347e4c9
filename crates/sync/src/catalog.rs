//! The remote catalog operations the sync driver depends on.

use async_trait::async_trait;
use catalog_sync_core::{CatalogVariant, Sku};
use rust_decimal::Decimal;

use crate::shopify::{AdminClient, AdminShopifyError};

/// Lookup and mutation calls against a remote catalog.
///
/// Mutations return the remote system's user-facing validation errors;
/// an empty list means the change was accepted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Find the variant matching `sku`, with its inventory item and levels.
    async fn find_variant(&self, sku: &Sku) -> Result<Option<CatalogVariant>, AdminShopifyError>;

    /// Set the unit cost of an inventory item.
    async fn update_unit_cost(
        &self,
        inventory_item_id: &str,
        cost: Decimal,
    ) -> Result<Vec<String>, AdminShopifyError>;

    /// Apply a signed delta to the available quantity at one location.
    async fn adjust_available(
        &self,
        inventory_item_id: &str,
        location_id: &str,
        delta: i64,
    ) -> Result<Vec<String>, AdminShopifyError>;
}

#[async_trait]
impl Catalog for AdminClient {
    async fn find_variant(&self, sku: &Sku) -> Result<Option<CatalogVariant>, AdminShopifyError> {
        self.find_variant_by_sku(sku).await
    }

    async fn update_unit_cost(
        &self,
        inventory_item_id: &str,
        cost: Decimal,
    ) -> Result<Vec<String>, AdminShopifyError> {
        Self::update_unit_cost(self, inventory_item_id, cost).await
    }

    async fn adjust_available(
        &self,
        inventory_item_id: &str,
        location_id: &str,
        delta: i64,
    ) -> Result<Vec<String>, AdminShopifyError> {
        Self::adjust_available(self, inventory_item_id, location_id, delta).await
    }
}
