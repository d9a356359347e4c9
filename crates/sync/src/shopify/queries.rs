//! GraphQL operation definitions for the Shopify Admin API.
//!
//! Each operation is a marker type implementing `graphql_client`'s
//! `GraphQLQuery`, with its document, variables and response shape in a
//! module of the same name.

use graphql_client::{GraphQLQuery, QueryBody};

// =============================================================================
// Custom scalar type aliases
// =============================================================================

/// Decimal number as string (preserves precision).
type Decimal = String;

/// Opaque global ID (`gid://shopify/...`).
#[allow(clippy::upper_case_acronyms)]
type ID = String;

// =============================================================================
// Variant lookup
// =============================================================================

/// Look up variants (and their inventory) by SKU search query.
pub struct ProductVariantsBySku;

pub mod product_variants_by_sku {
    use serde::{Deserialize, Serialize};

    use super::{Decimal, ID};

    pub const OPERATION_NAME: &str = "ProductVariantsBySku";
    pub const QUERY: &str = r#"
query ProductVariantsBySku($query: String!, $first: Int!, $levelsFirst: Int!) {
  productVariants(first: $first, query: $query) {
    edges {
      node {
        id
        title
        sku
        product {
          id
          title
          handle
        }
        inventoryItem {
          id
          unitCost {
            amount
            currencyCode
          }
          inventoryLevels(first: $levelsFirst) {
            edges {
              node {
                id
                quantities(names: ["available"]) {
                  name
                  quantity
                }
                location {
                  id
                  name
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub query: String,
        pub first: i64,
        pub levels_first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_variants: ProductVariantsBySkuProductVariants,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductVariantsBySkuProductVariants {
        pub edges: Vec<ProductVariantsBySkuProductVariantsEdges>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductVariantsBySkuProductVariantsEdges {
        pub node: ProductVariantsBySkuProductVariantsEdgesNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductVariantsBySkuProductVariantsEdgesNode {
        pub id: ID,
        pub title: String,
        pub sku: Option<String>,
        pub product: Option<ProductVariantsBySkuProduct>,
        pub inventory_item: ProductVariantsBySkuInventoryItem,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductVariantsBySkuProduct {
        pub id: ID,
        pub title: String,
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductVariantsBySkuInventoryItem {
        pub id: ID,
        pub unit_cost: Option<ProductVariantsBySkuUnitCost>,
        pub inventory_levels: ProductVariantsBySkuInventoryLevels,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductVariantsBySkuUnitCost {
        pub amount: Decimal,
        pub currency_code: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductVariantsBySkuInventoryLevels {
        pub edges: Vec<ProductVariantsBySkuInventoryLevelsEdges>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductVariantsBySkuInventoryLevelsEdges {
        pub node: ProductVariantsBySkuInventoryLevelsEdgesNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductVariantsBySkuInventoryLevelsEdgesNode {
        pub id: ID,
        #[serde(default)]
        pub quantities: Vec<ProductVariantsBySkuQuantity>,
        pub location: ProductVariantsBySkuLocation,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductVariantsBySkuQuantity {
        pub name: String,
        pub quantity: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductVariantsBySkuLocation {
        pub id: ID,
        pub name: String,
    }
}

impl GraphQLQuery for ProductVariantsBySku {
    type Variables = product_variants_by_sku::Variables;
    type ResponseData = product_variants_by_sku::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: product_variants_by_sku::QUERY,
            operation_name: product_variants_by_sku::OPERATION_NAME,
        }
    }
}

// =============================================================================
// Inventory mutations
// =============================================================================

/// Set an inventory item's unit cost.
pub struct InventoryItemUpdateCost;

pub mod inventory_item_update_cost {
    use serde::{Deserialize, Serialize};

    use super::{Decimal, ID};

    pub const OPERATION_NAME: &str = "InventoryItemUpdateCost";
    pub const QUERY: &str = r"
mutation InventoryItemUpdateCost($id: ID!, $input: InventoryItemInput!) {
  inventoryItemUpdate(id: $id, input: $input) {
    inventoryItem {
      id
      unitCost {
        amount
      }
    }
    userErrors {
      field
      message
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: ID,
        pub input: InventoryItemInput,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct InventoryItemInput {
        pub cost: Decimal,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub inventory_item_update: Option<InventoryItemUpdateCostPayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InventoryItemUpdateCostPayload {
        pub inventory_item: Option<InventoryItemUpdateCostItem>,
        #[serde(default)]
        pub user_errors: Vec<super::UserError>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InventoryItemUpdateCostItem {
        pub id: ID,
        pub unit_cost: Option<InventoryItemUpdateCostUnitCost>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct InventoryItemUpdateCostUnitCost {
        pub amount: Decimal,
    }
}

impl GraphQLQuery for InventoryItemUpdateCost {
    type Variables = inventory_item_update_cost::Variables;
    type ResponseData = inventory_item_update_cost::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: inventory_item_update_cost::QUERY,
            operation_name: inventory_item_update_cost::OPERATION_NAME,
        }
    }
}

/// Apply a signed delta to an item's `available` quantity at one location.
pub struct InventoryAdjustAvailable;

pub mod inventory_adjust_available {
    use serde::{Deserialize, Serialize};

    use super::ID;

    pub const OPERATION_NAME: &str = "InventoryAdjustAvailable";
    pub const QUERY: &str = r"
mutation InventoryAdjustAvailable($input: InventoryAdjustQuantitiesInput!) {
  inventoryAdjustQuantities(input: $input) {
    inventoryAdjustmentGroup {
      reason
      changes {
        name
        delta
      }
    }
    userErrors {
      field
      message
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: InventoryAdjustQuantitiesInput,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InventoryAdjustQuantitiesInput {
        pub name: String,
        pub reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub reference_document_uri: Option<String>,
        pub changes: Vec<InventoryChangeInput>,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InventoryChangeInput {
        pub inventory_item_id: ID,
        pub location_id: ID,
        pub delta: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub inventory_adjust_quantities: Option<InventoryAdjustAvailablePayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InventoryAdjustAvailablePayload {
        pub inventory_adjustment_group: Option<InventoryAdjustmentGroup>,
        #[serde(default)]
        pub user_errors: Vec<super::UserError>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct InventoryAdjustmentGroup {
        pub reason: String,
        #[serde(default)]
        pub changes: Vec<InventoryAdjustmentChange>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct InventoryAdjustmentChange {
        pub name: String,
        pub delta: i64,
    }
}

impl GraphQLQuery for InventoryAdjustAvailable {
    type Variables = inventory_adjust_available::Variables;
    type ResponseData = inventory_adjust_available::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: inventory_adjust_available::QUERY,
            operation_name: inventory_adjust_available::OPERATION_NAME,
        }
    }
}

/// A mutation user error (invalid input, missing permission, ...).
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UserError {
    /// Path to the offending input field.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Error message.
    pub message: String,
}
