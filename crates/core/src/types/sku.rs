//! Stock keeping unit (SKU) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Sku`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SkuError {
    /// The input is empty or only whitespace.
    #[error("SKU cannot be empty")]
    Empty,
}

/// A product SKU as it appears in the source file and in Shopify.
///
/// Surrounding whitespace is trimmed on parse; the inner value is otherwise
/// kept verbatim (SKUs are case-sensitive in Shopify search). No length
/// limit is applied: an over-long SKU is looked up and reported as not found.
///
/// ## Examples
///
/// ```
/// use catalog_sync_core::Sku;
///
/// assert!(Sku::parse("ABC123").is_ok());
/// assert_eq!(Sku::parse("  ABC123 ").unwrap().as_str(), "ABC123");
///
/// assert!(Sku::parse("").is_err());
/// assert!(Sku::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Parse a `Sku` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty.
    pub fn parse(s: &str) -> Result<Self, SkuError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(SkuError::Empty);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Sku` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Shopify search syntax matching this SKU, e.g. `sku:"ABC 123"`.
    ///
    /// The value is quoted so SKUs containing spaces or search operators are
    /// matched literally.
    #[must_use]
    pub fn search_query(&self) -> String {
        let escaped = self.0.replace('\\', "\\\\").replace('"', "\\\"");
        format!("sku:\"{escaped}\"")
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Sku {
    type Err = SkuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
