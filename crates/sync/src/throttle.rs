//! Wait-and-retry handling for Shopify rate limiting.
//!
//! Shopify meters Admin API calls with a leaky bucket. When a call is
//! rejected as throttled, [`ThrottleGuard`] sleeps for the server's hint (or
//! a fixed default) and hands control back so the caller can rerun the
//! whole operation. Anything else is returned untouched.

use std::time::Duration;

use crate::shopify::AdminShopifyError;

/// Pauses the current flow on throttle rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleGuard {
    default_wait: Duration,
}

impl ThrottleGuard {
    /// Wait used when a throttled response carries no hint.
    pub const DEFAULT_WAIT: Duration = Duration::from_millis(2000);

    /// Create a guard with a custom fallback wait.
    #[must_use]
    pub const fn new(default_wait: Duration) -> Self {
        Self { default_wait }
    }

    /// The fallback wait.
    #[must_use]
    pub const fn default_wait(&self) -> Duration {
        self.default_wait
    }

    /// How long to wait before retrying, or `None` if `err` is not a
    /// throttle rejection.
    #[must_use]
    pub fn wait_for(&self, err: &AdminShopifyError) -> Option<Duration> {
        err.is_throttled()
            .then(|| err.retry_after().unwrap_or(self.default_wait))
    }

    /// Sleep out a throttle rejection, or hand back any other error.
    ///
    /// # Errors
    ///
    /// Returns `err` unchanged when it is not a throttle rejection.
    pub async fn absorb(&self, err: AdminShopifyError) -> Result<(), AdminShopifyError> {
        let Some(wait) = self.wait_for(&err) else {
            return Err(err);
        };

        tracing::warn!(
            wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
            "Rate limited! Waiting before retrying"
        );
        tokio::time::sleep(wait).await;
        Ok(())
    }
}

impl Default for ThrottleGuard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WAIT)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[test]
    fn test_wait_for_uses_server_hint() {
        let guard = ThrottleGuard::default();
        let err = AdminShopifyError::Throttled {
            retry_after: Some(Duration::from_millis(750)),
        };
        assert_eq!(guard.wait_for(&err), Some(Duration::from_millis(750)));
    }

    #[test]
    fn test_wait_for_falls_back_to_default() {
        let guard = ThrottleGuard::default();
        let err = AdminShopifyError::Throttled { retry_after: None };
        assert_eq!(guard.wait_for(&err), Some(Duration::from_millis(2000)));
    }

    #[test]
    fn test_wait_for_ignores_other_errors() {
        let guard = ThrottleGuard::default();
        let err = AdminShopifyError::Unauthorized("nope".to_string());
        assert_eq!(guard.wait_for(&err), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_absorb_sleeps_default_wait() {
        let guard = ThrottleGuard::default();
        let start = Instant::now();

        guard
            .absorb(AdminShopifyError::Throttled { retry_after: None })
            .await
            .unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(2000));
        assert!(elapsed < Duration::from_millis(2100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_absorb_propagates_without_sleeping() {
        let guard = ThrottleGuard::new(Duration::from_secs(60));
        let start = Instant::now();

        let err = guard
            .absorb(AdminShopifyError::Unauthorized("bad token".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminShopifyError::Unauthorized(_)));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
