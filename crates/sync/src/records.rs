//! CSV record source.
//!
//! Reads the product export with a header row. Columns are located by name,
//! so their order does not matter:
//!
//! | Column         | Meaning                 |
//! |----------------|-------------------------|
//! | `Product Code` | SKU                     |
//! | `Inventory`    | Desired available stock |
//! | `Unit Cost`    | Desired unit cost       |

use std::io::Read;
use std::path::Path;

use catalog_sync_core::{Sku, SkuError, parse_unit_cost};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors from reading or interpreting the source file.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The file could not be opened or its header read.
    #[error("failed to read {path}: {source}")]
    Open {
        /// Path that was opened.
        path: String,
        /// Underlying CSV/IO error.
        source: csv::Error,
    },

    /// The SKU column is empty.
    #[error("invalid SKU: {0}")]
    Sku(#[from] SkuError),

    /// The quantity column is not an integer.
    #[error("invalid quantity {0:?}")]
    Quantity(String),
}

/// One row as it appears in the file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RawRecord {
    /// SKU cell. Blank means the row is skipped.
    #[serde(rename = "Product Code", default)]
    pub product_code: Option<String>,
    /// Desired quantity cell. Must be a whole signed integer after trimming;
    /// values with a fraction or trailing text (`"10.0"`, `"12abc"`) are
    /// rejected rather than truncated.
    #[serde(rename = "Inventory", default)]
    pub inventory: Option<String>,
    /// Unit cost cell, parsed with [`parse_unit_cost`].
    #[serde(rename = "Unit Cost", default)]
    pub unit_cost: Option<String>,
}

/// A validated row, ready to sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Product SKU.
    pub sku: Sku,
    /// Desired available quantity.
    pub quantity: i64,
    /// Desired unit cost; `None` when the row has no usable cost.
    pub unit_cost: Option<Decimal>,
}

impl TryFrom<&RawRecord> for Record {
    type Error = RecordError;

    fn try_from(raw: &RawRecord) -> Result<Self, Self::Error> {
        let sku = Sku::parse(raw.product_code.as_deref().unwrap_or_default())?;

        let quantity_raw = raw.inventory.as_deref().unwrap_or_default().trim();
        let quantity = quantity_raw
            .parse::<i64>()
            .map_err(|_| RecordError::Quantity(quantity_raw.to_string()))?;

        let unit_cost = raw.unit_cost.as_deref().and_then(parse_unit_cost);

        Ok(Self {
            sku,
            quantity,
            unit_cost,
        })
    }
}

/// Load every row from the CSV file at `path`.
///
/// Rows that cannot be decoded (e.g. invalid UTF-8) are skipped with a
/// warning; validation happens later via [`Record::try_from`].
///
/// # Errors
///
/// Returns `RecordError::Open` if the file cannot be opened.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, RecordError> {
    let reader = reader_builder()
        .from_path(path)
        .map_err(|source| RecordError::Open {
            path: path.display().to_string(),
            source,
        })?;

    let rows = collect_rows(reader);
    tracing::info!(path = %path.display(), rows = rows.len(), "Loaded product rows");
    Ok(rows)
}

/// Load every row from an in-memory CSV source.
pub fn read_records<R: Read>(source: R) -> Vec<RawRecord> {
    collect_rows(reader_builder().from_reader(source))
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.flexible(true).trim(csv::Trim::All);
    builder
}

fn collect_rows<R: Read>(mut reader: csv::Reader<R>) -> Vec<RawRecord> {
    reader
        .deserialize::<RawRecord>()
        .filter_map(|row| {
            row.map_err(|e| tracing::warn!(error = %e, "Skipping unreadable row"))
                .ok()
        })
        .collect()
}
