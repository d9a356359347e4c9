//! Conversions from GraphQL response shapes to domain types.

use std::str::FromStr;

use catalog_sync_core::{CatalogVariant, InventoryItem, InventoryLevel, Money};
use rust_decimal::Decimal;

use super::queries::{UserError, product_variants_by_sku};

/// Quantity name the sync reads and adjusts.
pub const AVAILABLE: &str = "available";

// =============================================================================
// ProductVariantsBySku conversions
// =============================================================================

pub fn convert_variant(
    node: product_variants_by_sku::ProductVariantsBySkuProductVariantsEdgesNode,
) -> CatalogVariant {
    let item = node.inventory_item;

    let unit_cost = item.unit_cost.and_then(|cost| {
        Decimal::from_str(&cost.amount)
            .map(|amount| Money::new(amount, cost.currency_code))
            .map_err(|e| {
                tracing::warn!(amount = %cost.amount, error = %e, "Unparseable unit cost from Shopify");
            })
            .ok()
    });

    CatalogVariant {
        id: node.id,
        title: node.title,
        sku: node.sku,
        product_title: node.product.map(|p| p.title),
        inventory_item: InventoryItem {
            id: item.id,
            unit_cost,
            levels: item
                .inventory_levels
                .edges
                .into_iter()
                .map(|e| convert_inventory_level(e.node))
                .collect(),
        },
    }
}

fn convert_inventory_level(
    level: product_variants_by_sku::ProductVariantsBySkuInventoryLevelsEdgesNode,
) -> InventoryLevel {
    let available = level
        .quantities
        .iter()
        .find(|q| q.name == AVAILABLE)
        .map(|q| q.quantity);

    if available.is_none() {
        tracing::warn!(level_id = %level.id, "Inventory level has no available quantity");
    }

    InventoryLevel {
        id: level.id,
        available,
        location_id: level.location.id,
        location_name: Some(level.location.name),
    }
}

// =============================================================================
// Mutation payloads
// =============================================================================

pub fn convert_user_errors(errors: Vec<UserError>) -> Vec<String> {
    errors
        .into_iter()
        .map(|e| match e.field {
            Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), e.message),
            _ => e.message,
        })
        .collect()
}
