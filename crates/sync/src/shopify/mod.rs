//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! The Admin API access token grants write access to products, inventory
//! and costs. It is held as a `SecretString` and never logged.
//!
//! # Architecture
//!
//! - `graphql_client` query contract (`GraphQLQuery`) with hand-written
//!   operation documents in [`queries`]
//! - Direct API calls to Shopify (no local state)
//! - Throttled responses surface as [`AdminShopifyError::Throttled`] with the
//!   server's retry hint; waiting is the caller's job (see `throttle`)
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_sync::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify)?;
//!
//! let variant = client.find_variant_by_sku(&sku).await?;
//!
//! client.adjust_available(
//!     "gid://shopify/InventoryItem/123",
//!     "gid://shopify/Location/456",
//!     -1, // decrease by 1
//! ).await?;
//! ```

mod client;
mod conversions;
mod inventory;
pub mod queries;

pub use client::AdminClient;

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Shopify rejected the call for exceeding the rate limit.
    #[error("Throttled by Shopify{}", format_retry_after(.retry_after))]
    Throttled {
        /// Server-suggested wait, when the response carried one.
        retry_after: Option<Duration>,
    },

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Unexpected HTTP status without a GraphQL body.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (truncated).
        body: String,
    },
}

impl AdminShopifyError {
    /// Whether this error is a rate-limit rejection.
    #[must_use]
    pub const fn is_throttled(&self) -> bool {
        matches!(self, Self::Throttled { .. })
    }

    /// Server-suggested wait for throttled errors.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Throttled { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Classification code from `extensions.code` (e.g. `THROTTLED`).
    pub code: Option<String>,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| match &e.code {
            Some(code) => format!("{} ({code})", e.message),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[allow(clippy::ref_option)]
fn format_retry_after(retry_after: &Option<Duration>) -> String {
    retry_after.map_or_else(String::new, |d| {
        format!(", retry after {} ms", d.as_millis())
    })
}
