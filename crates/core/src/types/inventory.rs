//! Inventory entities and the rule that picks which level to adjust.

use serde::{Deserialize, Serialize};

use super::cost::Money;

/// Stock of one inventory item at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLevel {
    /// Inventory level ID.
    pub id: String,
    /// Quantity available; `None` when Shopify did not report one.
    pub available: Option<i64>,
    /// Location ID.
    pub location_id: String,
    /// Location name.
    pub location_name: Option<String>,
}

/// The stock-tracked item behind a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Inventory item ID.
    pub id: String,
    /// Current unit cost, if one has been set.
    pub unit_cost: Option<Money>,
    /// Levels in the order Shopify returned them.
    pub levels: Vec<InventoryLevel>,
}

/// A product variant matched by SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogVariant {
    /// Variant ID.
    pub id: String,
    /// Variant title.
    pub title: String,
    /// SKU as stored in Shopify.
    pub sku: Option<String>,
    /// Parent product title.
    pub product_title: Option<String>,
    /// The variant's inventory item.
    pub inventory_item: InventoryItem,
}

/// Why no inventory level could be selected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelSelectionError {
    /// Fewer than two levels exist for the positional rule.
    #[error("not enough locations to update inventory (found {found})")]
    InsufficientLocations {
        /// Number of levels returned.
        found: usize,
    },
    /// The pinned location has no level for this item.
    #[error("item is not stocked at location {location_id}")]
    LocationNotStocked {
        /// The configured location ID.
        location_id: String,
    },
}

/// Chooses the inventory level whose quantity gets adjusted.
///
/// `Positional` takes the third level when there is one, else the second.
/// The first level is never adjusted. This mirrors a store whose location
/// order is fixed; it is not a semantic match, so `Location` exists to pin
/// the adjustment to a known location ID instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LevelSelector {
    /// Third level if present, else second.
    #[default]
    Positional,
    /// Level whose location ID matches exactly.
    Location(String),
}

impl LevelSelector {
    /// Build a selector from an optional pinned location ID.
    #[must_use]
    pub fn from_location(location_id: Option<String>) -> Self {
        location_id.map_or(Self::Positional, Self::Location)
    }

    /// Select the level to adjust.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientLocations` when the positional rule finds fewer
    /// than two levels, or `LocationNotStocked` when the pinned location is
    /// absent.
    pub fn select<'a>(
        &self,
        levels: &'a [InventoryLevel],
    ) -> Result<&'a InventoryLevel, LevelSelectionError> {
        match self {
            Self::Positional => levels.get(2).or_else(|| levels.get(1)).ok_or(
                LevelSelectionError::InsufficientLocations {
                    found: levels.len(),
                },
            ),
            Self::Location(location_id) => levels
                .iter()
                .find(|level| &level.location_id == location_id)
                .ok_or_else(|| LevelSelectionError::LocationNotStocked {
                    location_id: location_id.clone(),
                }),
        }
    }
}

/// Relative adjustment that brings `current` to `desired`.
#[must_use]
pub const fn quantity_delta(desired: i64, current: i64) -> i64 {
    desired.saturating_sub(current)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn levels(available: &[i64]) -> Vec<InventoryLevel> {
        available
            .iter()
            .enumerate()
            .map(|(i, qty)| InventoryLevel {
                id: format!("gid://shopify/InventoryLevel/{i}"),
                available: Some(*qty),
                location_id: format!("gid://shopify/Location/{i}"),
                location_name: Some(format!("Location {i}")),
            })
            .collect()
    }

    #[test]
    fn test_positional_three_levels_picks_third() {
        let levels = levels(&[100, 50, 7]);
        let selected = LevelSelector::Positional.select(&levels).unwrap();
        assert_eq!(selected, &levels[2]);
    }

    #[test]
    fn test_positional_more_than_three_still_picks_third() {
        let levels = levels(&[1, 2, 3, 4, 5]);
        let selected = LevelSelector::Positional.select(&levels).unwrap();
        assert_eq!(selected.available, Some(3));
    }

    #[test]
    fn test_positional_two_levels_picks_second() {
        let levels = levels(&[100, 50]);
        let selected = LevelSelector::Positional.select(&levels).unwrap();
        assert_eq!(selected, &levels[1]);
    }

    #[test]
    fn test_positional_insufficient_locations() {
        for count in 0..2 {
            let levels = levels(&vec![10; count]);
            assert_eq!(
                LevelSelector::Positional.select(&levels),
                Err(LevelSelectionError::InsufficientLocations { found: count })
            );
        }
    }

    #[test]
    fn test_pinned_location() {
        let levels = levels(&[100, 50, 7]);
        let selector = LevelSelector::Location("gid://shopify/Location/0".to_string());
        assert_eq!(selector.select(&levels).unwrap().available, Some(100));
    }

    #[test]
    fn test_pinned_location_missing() {
        let levels = levels(&[100]);
        let selector = LevelSelector::from_location(Some("gid://shopify/Location/9".to_string()));
        assert!(matches!(
            selector.select(&levels),
            Err(LevelSelectionError::LocationNotStocked { .. })
        ));
    }

    #[test]
    fn test_from_location_none_is_positional() {
        assert_eq!(LevelSelector::from_location(None), LevelSelector::Positional);
    }

    #[test]
    fn test_quantity_delta() {
        assert_eq!(quantity_delta(50, 30), 20);
        assert_eq!(quantity_delta(10, 7), 3);
        assert_eq!(quantity_delta(0, 12), -12);
        assert_eq!(quantity_delta(5, 5), 0);
    }

    #[test]
    fn test_quantity_delta_saturates() {
        assert_eq!(quantity_delta(i64::MIN, 1), i64::MIN);
    }
}
