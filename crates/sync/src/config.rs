//! Sync configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com).
//!   `SHOP` is accepted as a fallback.
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token (HIGH PRIVILEGE)
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `INVENTORY_CSV_PATH` - Source file (default: private_repo/clean_data/to_update.csv)
//! - `SHOPIFY_LOCATION_ID` - Pin quantity adjustments to this location ID
//! - `THROTTLE_DEFAULT_WAIT_MS` - Wait when Shopify throttles without a hint (default: 2000)

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_API_VERSION: &str = "2026-01";
const DEFAULT_CSV_PATH: &str = "private_repo/clean_data/to_update.csv";
const DEFAULT_THROTTLE_WAIT_MS: u64 = 2000;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Sync run configuration.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Shopify Admin API configuration
    pub shopify: ShopifyAdminConfig,
    /// CSV file to read records from
    pub csv_path: PathBuf,
    /// Location to pin quantity adjustments to (positional rule when unset)
    pub location_id: Option<String>,
    /// Wait applied when a throttled response carries no retry hint
    pub throttle_default_wait: Duration,
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the HIGH PRIVILEGE access token.
#[derive(Clone)]
pub struct ShopifyAdminConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Admin API access token (HIGH PRIVILEGE - full store access)
    pub access_token: SecretString,
}

impl std::fmt::Debug for ShopifyAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl SyncConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the access token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build configuration from an explicit variable map.
    ///
    /// # Errors
    ///
    /// See [`SyncConfig::from_env`].
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let env = Env(vars);

        let shopify = ShopifyAdminConfig::from_vars(&env)?;
        let csv_path = PathBuf::from(env.get_or_default("INVENTORY_CSV_PATH", DEFAULT_CSV_PATH));
        let location_id = env.get_optional("SHOPIFY_LOCATION_ID");
        let wait_ms = env
            .get_optional("THROTTLE_DEFAULT_WAIT_MS")
            .map(|s| {
                s.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("THROTTLE_DEFAULT_WAIT_MS".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_THROTTLE_WAIT_MS);

        Ok(Self {
            shopify,
            csv_path,
            location_id,
            throttle_default_wait: Duration::from_millis(wait_ms),
        })
    }
}

impl ShopifyAdminConfig {
    fn from_vars(env: &Env<'_>) -> Result<Self, ConfigError> {
        let store = env
            .get_optional("SHOPIFY_STORE")
            .or_else(|| env.get_optional("SHOP"))
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOPIFY_STORE".to_string()))?;

        Ok(Self {
            store: normalize_store(&store),
            api_version: env.get_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            access_token: env.get_validated_secret("SHOPIFY_ACCESS_TOKEN")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Lookup over a snapshot of the process environment.
struct Env<'a>(&'a HashMap<String, String>);

impl Env<'_> {
    /// Get a required variable.
    fn get_required(&self, key: &str) -> Result<String, ConfigError> {
        self.get_optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable; blank values count as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        self.0
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Load and validate a secret.
    fn get_validated_secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        let value = self.get_required(key)?;
        validate_secret_strength(&value, key)?;
        Ok(SecretString::from(value))
    }
}

/// Strip scheme and trailing slashes so `https://shop.myshopify.com/` and
/// `shop.myshopify.com` configure the same endpoint.
fn normalize_store(store: &str) -> String {
    let without_scheme = store
        .strip_prefix("https://")
        .or_else(|| store.strip_prefix("http://"))
        .unwrap_or(store);
    without_scheme.trim_end_matches('/').to_string()
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real access tokens (shpat_ + 32 hex chars) sit well above this
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
