//! Core types for Catalog Sync.
//!
//! This module provides type-safe wrappers for the inventory sync domain.

pub mod cost;
pub mod inventory;
pub mod outcome;
pub mod sku;

pub use cost::{Money, parse_unit_cost};
pub use inventory::{
    CatalogVariant, InventoryItem, InventoryLevel, LevelSelectionError, LevelSelector,
    quantity_delta,
};
pub use outcome::{CostOutcome, SyncOutcome};
pub use sku::{Sku, SkuError};
