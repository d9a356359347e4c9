//! Per-SKU sync outcomes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Result of the unit cost update step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum CostOutcome {
    /// Cost written.
    Updated,
    /// The source row carried no usable cost.
    Skipped,
    /// Shopify rejected the update with user errors.
    Rejected(Vec<String>),
    /// The update call failed outright.
    Failed(String),
}

impl fmt::Display for CostOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated => write!(f, "cost updated"),
            Self::Skipped => write!(f, "cost skipped (no cost in source)"),
            Self::Rejected(errors) => write!(f, "cost rejected: {}", errors.join("; ")),
            Self::Failed(reason) => write!(f, "cost update failed: {reason}"),
        }
    }
}

/// Terminal state of one SKU's sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SyncOutcome {
    /// No variant matched the SKU.
    NotFound,
    /// Too few inventory levels to pick one positionally.
    InsufficientLocations {
        /// Cost step result.
        cost: CostOutcome,
        /// Number of levels found.
        found: usize,
    },
    /// The pinned location has no level for this item.
    LocationNotStocked {
        /// Cost step result.
        cost: CostOutcome,
        /// The configured location ID.
        location_id: String,
    },
    /// The selected level reported no available quantity, so no delta
    /// could be computed.
    QuantityUnknown {
        /// Cost step result.
        cost: CostOutcome,
        /// Selected inventory level ID.
        level_id: String,
    },
    /// Quantity adjusted.
    Adjusted {
        /// Cost step result.
        cost: CostOutcome,
        /// Adjusted inventory level ID.
        level_id: String,
        /// Applied delta.
        delta: i64,
    },
    /// Shopify rejected the quantity adjustment with user errors.
    AdjustRejected {
        /// Cost step result.
        cost: CostOutcome,
        /// User error messages.
        errors: Vec<String>,
    },
    /// A non-throttle error stopped this SKU.
    Failed {
        /// Error description.
        reason: String,
    },
}

impl SyncOutcome {
    /// Whether the quantity was written.
    #[must_use]
    pub const fn is_adjusted(&self) -> bool {
        matches!(self, Self::Adjusted { .. })
    }

    /// The cost step result, when the variant was found.
    #[must_use]
    pub const fn cost(&self) -> Option<&CostOutcome> {
        match self {
            Self::InsufficientLocations { cost, .. }
            | Self::LocationNotStocked { cost, .. }
            | Self::QuantityUnknown { cost, .. }
            | Self::Adjusted { cost, .. }
            | Self::AdjustRejected { cost, .. } => Some(cost),
            Self::NotFound | Self::Failed { .. } => None,
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found or has no variants"),
            Self::InsufficientLocations { cost, found } => write!(
                f,
                "{cost}; not enough locations available to update inventory ({found})"
            ),
            Self::LocationNotStocked { cost, location_id } => {
                write!(f, "{cost}; not stocked at location {location_id}")
            }
            Self::QuantityUnknown { cost, level_id } => {
                write!(f, "{cost}; no available quantity reported at {level_id}")
            }
            Self::Adjusted {
                cost,
                level_id,
                delta,
            } => write!(f, "{cost}; inventory adjusted by {delta:+} at {level_id}"),
            Self::AdjustRejected { cost, errors } => {
                write!(f, "{cost}; inventory rejected: {}", errors.join("; "))
            }
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}
