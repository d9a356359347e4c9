//! Shopify Admin API GraphQL client.

use std::sync::Arc;
use std::time::Duration;

use graphql_client::GraphQLQuery;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::instrument;

use crate::config::ShopifyAdminConfig;

use super::{AdminShopifyError, GraphQLError, GraphQLErrorLocation};

/// Request timeout for every Admin API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `extensions.code` Shopify attaches to rate-limited requests.
const THROTTLED_CODE: &str = "THROTTLED";

/// Longest response body kept in `AdminShopifyError::Status`.
const MAX_ERROR_BODY: usize = 512;

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; all clones share one connection pool.
///
/// # Security
///
/// This client holds a HIGH PRIVILEGE access token with write access to the
/// store's inventory.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: SecretString,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
    #[serde(default)]
    extensions: Option<ResponseExtensions>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
    #[serde(default)]
    extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorExtensions {
    code: Option<String>,
    /// Milliseconds; some proxies send it as a string.
    retry_after: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ResponseExtensions {
    cost: Option<QueryCost>,
}

/// Query cost block Shopify returns alongside every response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryCost {
    requested_query_cost: Option<f64>,
    throttle_status: Option<ThrottleStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThrottleStatus {
    currently_available: f64,
    restore_rate: f64,
}

impl AdminClient {
    /// Create a new Admin API client for the configured store.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ShopifyAdminConfig) -> Result<Self, AdminShopifyError> {
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            config.store, config.api_version
        );
        Self::with_endpoint(config, endpoint)
    }

    /// Create a client that posts to an explicit GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::Http` if the HTTP client cannot be built.
    pub fn with_endpoint(
        config: &ShopifyAdminConfig,
        endpoint: impl Into<String>,
    ) -> Result<Self, AdminShopifyError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                endpoint: endpoint.into(),
                access_token: config.access_token.clone(),
            }),
        })
    }

    /// The GraphQL endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL operation.
    ///
    /// Rate-limit rejections (HTTP 429 or a `THROTTLED` GraphQL error) are
    /// returned as `AdminShopifyError::Throttled` carrying Shopify's retry
    /// hint; no waiting happens here.
    #[instrument(skip(self, variables))]
    pub(super) async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let body = Q::build_query(variables);
        tracing::debug!(operation = body.operation_name, "Executing Admin API operation");

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<f64>().ok())
                .and_then(duration_from_secs);
            return Err(AdminShopifyError::Throttled { retry_after });
        }

        // Check for unauthorized
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or revoked access token".to_string(),
            ));
        }

        let text = response.text().await?;

        if !status.is_success() {
            // Shopify sometimes wraps errors in a GraphQL body even on 5xx
            if let Ok(parsed) = serde_json::from_str::<GraphQLResponse<Q::ResponseData>>(&text)
                && parsed.errors.as_ref().is_some_and(|e| !e.is_empty())
            {
                return Err(classify_errors(parsed));
            }
            return Err(AdminShopifyError::Status {
                status: status.as_u16(),
                body: truncate(&text, MAX_ERROR_BODY),
            });
        }

        let graphql_response: GraphQLResponse<Q::ResponseData> = serde_json::from_str(&text)?;

        // Check for GraphQL errors
        if graphql_response
            .errors
            .as_ref()
            .is_some_and(|errors| !errors.is_empty())
        {
            return Err(classify_errors(graphql_response));
        }

        graphql_response.data.ok_or_else(|| {
            AdminShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                code: None,
                locations: vec![],
                path: vec![],
            }])
        })
    }
}

/// Turn a response carrying `errors` into a typed error.
///
/// Any `THROTTLED` entry makes the whole response a throttle rejection.
fn classify_errors<T>(response: GraphQLResponse<T>) -> AdminShopifyError {
    let errors = response.errors.unwrap_or_default();

    let throttled = errors.iter().find(|e| {
        e.extensions
            .as_ref()
            .and_then(|x| x.code.as_deref())
            .is_some_and(|code| code == THROTTLED_CODE)
    });

    if let Some(error) = throttled {
        let retry_after = error
            .extensions
            .as_ref()
            .and_then(|x| x.retry_after.as_ref())
            .and_then(retry_after_millis)
            .or_else(|| {
                response
                    .extensions
                    .as_ref()
                    .and_then(|x| x.cost.as_ref())
                    .and_then(cost_based_wait)
            });
        return AdminShopifyError::Throttled { retry_after };
    }

    AdminShopifyError::GraphQL(
        errors
            .into_iter()
            .map(|e| GraphQLError {
                message: e.message,
                code: e.extensions.and_then(|x| x.code),
                locations: e
                    .locations
                    .into_iter()
                    .map(|l| GraphQLErrorLocation {
                        line: l.line,
                        column: l.column,
                    })
                    .collect(),
                path: e.path,
            })
            .collect(),
    )
}

/// Parse an explicit `retryAfter` hint (milliseconds, number or string).
fn retry_after_millis(value: &serde_json::Value) -> Option<Duration> {
    let millis = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    duration_from_secs(millis / 1000.0)
}

/// Time until the bucket refills enough for the requested cost.
fn cost_based_wait(cost: &QueryCost) -> Option<Duration> {
    let requested = cost.requested_query_cost?;
    let status = cost.throttle_status.as_ref()?;
    if status.restore_rate <= 0.0 {
        return None;
    }
    let deficit = (requested - status.currently_available).max(0.0);
    // Round up to whole milliseconds
    duration_from_secs((deficit / status.restore_rate * 1000.0).ceil() / 1000.0)
}

/// A usable wait hint. Zero, negative, NaN and out-of-range values are
/// treated as no hint so the guard falls back to its default wait.
fn duration_from_secs(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|wait| !wait.is_zero())
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> GraphQLResponse<serde_json::Value> {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_classify_throttled_with_cost_hint() {
        let response = parse(serde_json::json!({
            "errors": [{ "message": "Throttled", "extensions": { "code": "THROTTLED" } }],
            "extensions": { "cost": {
                "requestedQueryCost": 152,
                "actualQueryCost": null,
                "throttleStatus": { "maximumAvailable": 2000.0, "currentlyAvailable": 2, "restoreRate": 100.0 }
            }}
        }));

        let err = classify_errors(response);
        assert!(err.is_throttled());
        assert_eq!(err.retry_after(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_classify_throttled_with_explicit_hint() {
        let response = parse(serde_json::json!({
            "errors": [{ "message": "Throttled", "extensions": { "code": "THROTTLED", "retryAfter": "750" } }]
        }));

        let err = classify_errors(response);
        assert_eq!(err.retry_after(), Some(Duration::from_millis(750)));
    }

    #[test]
    fn test_classify_throttled_without_hint() {
        let response = parse(serde_json::json!({
            "errors": [{ "message": "Throttled", "extensions": { "code": "THROTTLED" } }]
        }));

        let err = classify_errors(response);
        assert!(err.is_throttled());
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_classify_other_errors() {
        let response = parse(serde_json::json!({
            "errors": [{
                "message": "Field 'bogus' doesn't exist",
                "locations": [{ "line": 2, "column": 3 }],
                "extensions": { "code": "undefinedField" }
            }]
        }));

        match classify_errors(response) {
            AdminShopifyError::GraphQL(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].code.as_deref(), Some("undefinedField"));
                assert_eq!(errors[0].locations[0].line, 2);
            }
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }

    #[test]
    fn test_cost_based_wait_when_available_covers_cost() {
        let cost = QueryCost {
            requested_query_cost: Some(10.0),
            throttle_status: Some(ThrottleStatus {
                currently_available: 50.0,
                restore_rate: 50.0,
            }),
        };
        assert_eq!(cost_based_wait(&cost), None);
    }

    #[test]
    fn test_classify_throttled_zero_hint_falls_back_to_default() {
        let response = parse(serde_json::json!({
            "errors": [{ "message": "Throttled", "extensions": { "code": "THROTTLED", "retryAfter": 0 } }]
        }));

        let err = classify_errors(response);
        assert!(err.is_throttled());
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_retry_after_out_of_range_is_no_hint() {
        assert_eq!(retry_after_millis(&serde_json::json!(1e30)), None);
        assert_eq!(retry_after_millis(&serde_json::json!("1e30")), None);
        assert_eq!(duration_from_secs(1e30), None);
        assert_eq!(duration_from_secs(f64::NAN), None);
        assert_eq!(duration_from_secs(f64::INFINITY), None);
        assert_eq!(duration_from_secs(0.0), None);
    }

    #[test]
    fn test_classify_throttled_huge_hint_does_not_panic() {
        let response = parse(serde_json::json!({
            "errors": [{ "message": "Throttled", "extensions": { "code": "THROTTLED", "retryAfter": 1e30 } }]
        }));

        let err = classify_errors(response);
        assert!(err.is_throttled());
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_cost_based_wait_zero_restore_rate() {
        let cost = QueryCost {
            requested_query_cost: Some(10.0),
            throttle_status: Some(ThrottleStatus {
                currently_available: 0.0,
                restore_rate: 0.0,
            }),
        };
        assert_eq!(cost_based_wait(&cost), None);
    }

    #[test]
    fn test_retry_after_rejects_negative() {
        assert_eq!(retry_after_millis(&serde_json::json!(-5)), None);
        assert_eq!(
            retry_after_millis(&serde_json::json!(2000)),
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
    }
}
