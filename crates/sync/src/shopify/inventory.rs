//! Variant lookup and inventory mutations for the Admin API.

use catalog_sync_core::{CatalogVariant, Sku};
use rust_decimal::Decimal;
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError,
    conversions::{AVAILABLE, convert_user_errors, convert_variant},
    queries::{
        InventoryAdjustAvailable, InventoryItemUpdateCost, ProductVariantsBySku,
        inventory_adjust_available, inventory_item_update_cost, product_variants_by_sku,
    },
};

/// Variants requested per SKU search.
const VARIANTS_PER_SKU: i64 = 100;

/// Inventory levels requested per variant.
const LEVELS_PER_ITEM: i64 = 100;

/// Adjustment reason recorded in Shopify's inventory history.
const ADJUST_REASON: &str = "correction";

impl AdminClient {
    /// Find the first variant whose SKU matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(sku = %sku))]
    pub async fn find_variant_by_sku(
        &self,
        sku: &Sku,
    ) -> Result<Option<CatalogVariant>, AdminShopifyError> {
        let variables = product_variants_by_sku::Variables {
            query: sku.search_query(),
            first: VARIANTS_PER_SKU,
            levels_first: LEVELS_PER_ITEM,
        };

        let response = self.execute::<ProductVariantsBySku>(variables).await?;

        Ok(response
            .product_variants
            .edges
            .into_iter()
            .next()
            .map(|edge| convert_variant(edge.node)))
    }

    /// Set an inventory item's unit cost.
    ///
    /// Returns Shopify's user errors (empty on success).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(inventory_item_id = %inventory_item_id, cost = %cost))]
    pub async fn update_unit_cost(
        &self,
        inventory_item_id: &str,
        cost: Decimal,
    ) -> Result<Vec<String>, AdminShopifyError> {
        let variables = inventory_item_update_cost::Variables {
            id: inventory_item_id.to_string(),
            input: inventory_item_update_cost::InventoryItemInput {
                cost: cost.to_string(),
            },
        };

        let response = self.execute::<InventoryItemUpdateCost>(variables).await?;

        Ok(response
            .inventory_item_update
            .map(|payload| convert_user_errors(payload.user_errors))
            .unwrap_or_default())
    }

    /// Adjust the `available` quantity of an item at a location by `delta`.
    ///
    /// Returns Shopify's user errors (empty on success).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(inventory_item_id = %inventory_item_id, location_id = %location_id, delta = %delta))]
    pub async fn adjust_available(
        &self,
        inventory_item_id: &str,
        location_id: &str,
        delta: i64,
    ) -> Result<Vec<String>, AdminShopifyError> {
        use inventory_adjust_available::{InventoryAdjustQuantitiesInput, InventoryChangeInput};

        let variables = inventory_adjust_available::Variables {
            input: InventoryAdjustQuantitiesInput {
                name: AVAILABLE.to_string(),
                reason: ADJUST_REASON.to_string(),
                reference_document_uri: None,
                changes: vec![InventoryChangeInput {
                    inventory_item_id: inventory_item_id.to_string(),
                    location_id: location_id.to_string(),
                    delta,
                }],
            },
        };

        let response = self.execute::<InventoryAdjustAvailable>(variables).await?;

        Ok(response
            .inventory_adjust_quantities
            .map(|payload| convert_user_errors(payload.user_errors))
            .unwrap_or_default())
    }
}
