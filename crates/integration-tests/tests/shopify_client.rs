//! Admin API client behavior against a mock GraphQL endpoint.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use catalog_sync::{AdminShopifyError, Catalog};
use catalog_sync_core::Sku;
use catalog_sync_integration_tests::{
    TOKEN, admin_client, adjust_response, cost_update_response, no_variants_response, operation,
    requests_for, throttled_response, variant_response,
};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::header;
use wiremock::{MockServer, ResponseTemplate};

const ITEM_ID: &str = "gid://shopify/InventoryItem/42";

// ============================================================================
// Variant lookup
// ============================================================================

#[tokio::test]
async fn test_find_variant_sends_token_and_quoted_sku() {
    let server = MockServer::start().await;
    operation("ProductVariantsBySku")
        .and(header("X-Shopify-Access-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(variant_response(
            "ABC123",
            ITEM_ID,
            Some("4.25"),
            &[
                ("gid://shopify/InventoryLevel/1", "gid://shopify/Location/1", 100),
                ("gid://shopify/InventoryLevel/2", "gid://shopify/Location/2", 50),
            ],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let variant = client
        .find_variant(&Sku::parse("ABC123").unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(variant.inventory_item.id, ITEM_ID);
    assert_eq!(
        variant.inventory_item.unit_cost.as_ref().map(|m| m.amount),
        Some(Decimal::new(425, 2))
    );
    let levels = &variant.inventory_item.levels;
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].available, Some(100));
    assert_eq!(levels[1].location_id, "gid://shopify/Location/2");

    let requests = requests_for(&server, "ProductVariantsBySku").await;
    assert_eq!(requests[0]["variables"]["query"], json!("sku:\"ABC123\""));
    assert_eq!(requests[0]["variables"]["first"], json!(100));
}

#[tokio::test]
async fn test_find_variant_none_when_no_edges() {
    let server = MockServer::start().await;
    operation("ProductVariantsBySku")
        .respond_with(ResponseTemplate::new(200).set_body_json(no_variants_response()))
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let variant = client
        .find_variant(&Sku::parse("MISSING").unwrap())
        .await
        .unwrap();
    assert!(variant.is_none());
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_update_unit_cost_request_and_user_errors() {
    let server = MockServer::start().await;
    operation("InventoryItemUpdateCost")
        .respond_with(ResponseTemplate::new(200).set_body_json(cost_update_response(
            ITEM_ID,
            &[("cost", "Cost must be greater than or equal to 0")],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let errors = client
        .update_unit_cost(ITEM_ID, Decimal::new(550, 2))
        .await
        .unwrap();

    assert_eq!(
        errors,
        vec!["cost: Cost must be greater than or equal to 0".to_string()]
    );

    let requests = requests_for(&server, "InventoryItemUpdateCost").await;
    assert_eq!(
        requests[0]["variables"],
        json!({ "id": ITEM_ID, "input": { "cost": "5.50" } })
    );
}

#[tokio::test]
async fn test_adjust_available_sends_relative_change() {
    let server = MockServer::start().await;
    operation("InventoryAdjustAvailable")
        .respond_with(ResponseTemplate::new(200).set_body_json(adjust_response(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let errors = client
        .adjust_available(ITEM_ID, "gid://shopify/Location/3", -4)
        .await
        .unwrap();
    assert!(errors.is_empty());

    let requests = requests_for(&server, "InventoryAdjustAvailable").await;
    assert_eq!(
        requests[0]["variables"]["input"],
        json!({
            "name": "available",
            "reason": "correction",
            "changes": [{
                "inventoryItemId": ITEM_ID,
                "locationId": "gid://shopify/Location/3",
                "delta": -4
            }]
        })
    );
}

// ============================================================================
// Error classification
// ============================================================================

#[tokio::test]
async fn test_throttled_graphql_error_carries_retry_after() {
    let server = MockServer::start().await;
    operation("ProductVariantsBySku")
        .respond_with(ResponseTemplate::new(200).set_body_json(throttled_response(Some(750))))
        .mount(&server)
        .await;

    let err = admin_client(&server)
        .find_variant(&Sku::parse("ABC123").unwrap())
        .await
        .unwrap_err();

    assert!(err.is_throttled());
    assert_eq!(err.retry_after(), Some(Duration::from_millis(750)));
}

#[tokio::test]
async fn test_throttled_graphql_error_uses_cost_block() {
    let server = MockServer::start().await;
    operation("ProductVariantsBySku")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Throttled", "extensions": { "code": "THROTTLED" } }],
            "extensions": {
                "cost": {
                    "requestedQueryCost": 152,
                    "actualQueryCost": null,
                    "throttleStatus": {
                        "maximumAvailable": 2000.0,
                        "currentlyAvailable": 2,
                        "restoreRate": 100.0
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let err = admin_client(&server)
        .find_variant(&Sku::parse("ABC123").unwrap())
        .await
        .unwrap_err();

    assert!(err.is_throttled());
    assert_eq!(err.retry_after(), Some(Duration::from_millis(1500)));
}

#[tokio::test]
async fn test_http_429_reads_retry_after_header() {
    let server = MockServer::start().await;
    operation("InventoryAdjustAvailable")
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "2"))
        .mount(&server)
        .await;

    let err = admin_client(&server)
        .adjust_available(ITEM_ID, "gid://shopify/Location/1", 1)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AdminShopifyError::Throttled { retry_after: Some(d) } if d == Duration::from_secs(2)
    ));
}

#[tokio::test]
async fn test_http_429_unusable_retry_after_is_no_hint() {
    for value in ["1e30", "0", "soon"] {
        let server = MockServer::start().await;
        operation("ProductVariantsBySku")
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", value))
            .mount(&server)
            .await;

        let err = admin_client(&server)
            .find_variant(&Sku::parse("ABC123").unwrap())
            .await
            .unwrap_err();

        assert!(
            matches!(err, AdminShopifyError::Throttled { retry_after: None }),
            "Retry-After {value:?} gave {err:?}"
        );
    }
}

#[tokio::test]
async fn test_unauthorized_status() {
    let server = MockServer::start().await;
    operation("InventoryItemUpdateCost")
        .respond_with(ResponseTemplate::new(401).set_body_string("[API] Invalid API key"))
        .mount(&server)
        .await;

    let err = admin_client(&server)
        .update_unit_cost(ITEM_ID, Decimal::ONE)
        .await
        .unwrap_err();

    assert!(matches!(err, AdminShopifyError::Unauthorized(_)));
    assert!(!err.is_throttled());
}

#[tokio::test]
async fn test_server_error_status() {
    let server = MockServer::start().await;
    operation("ProductVariantsBySku")
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = admin_client(&server)
        .find_variant(&Sku::parse("ABC123").unwrap())
        .await
        .unwrap_err();

    match err {
        AdminShopifyError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "Bad Gateway");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_graphql_error_not_throttled() {
    let server = MockServer::start().await;
    operation("ProductVariantsBySku")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{
                "message": "Field 'bogus' doesn't exist on type 'ProductVariant'",
                "locations": [{ "line": 3, "column": 5 }],
                "extensions": { "code": "undefinedField" }
            }]
        })))
        .mount(&server)
        .await;

    let err = admin_client(&server)
        .find_variant(&Sku::parse("ABC123").unwrap())
        .await
        .unwrap_err();

    assert!(!err.is_throttled());
    match err {
        AdminShopifyError::GraphQL(errors) => {
            assert_eq!(errors[0].code.as_deref(), Some("undefinedField"));
            assert_eq!(errors[0].locations.len(), 1);
        }
        other => panic!("expected GraphQL error, got {other:?}"),
    }
}
