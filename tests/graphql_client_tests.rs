//! Integration tests for the GraphQL and checkout clients.
//!
//! These tests verify how GraphQL responses are interpreted and how the
//! checkout operations are sent over the wire.

use checkout_shipping::checkout::{CheckoutApi, CheckoutClient};
use checkout_shipping::clients::graphql::{GraphqlClient, GraphqlError};
use checkout_shipping::clients::{HttpError, HttpResponseError};
use checkout_shipping::money::{CurrencyCode, Money};
use checkout_shipping::shipping::{AmountBreakdown, PatchOperation};
use checkout_shipping::{CheckoutConfig, ClientId, HostUrl, OrderId};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> CheckoutConfig {
    CheckoutConfig::builder()
        .api_host(HostUrl::new(server.uri()).unwrap())
        .client_id(ClientId::new("test-client").unwrap())
        .build()
        .unwrap()
}

fn order_id() -> OrderId {
    OrderId::new("5O190127TN364715T").unwrap()
}

// ============================================================================
// GraphqlClient Tests
// ============================================================================

#[test]
fn test_graphql_client_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
    assert_send_sync::<CheckoutClient>();
}

#[tokio::test]
async fn test_query_posts_query_and_variables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "query": "query { ping }",
            "variables": {"id": 7}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ping": "pong"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&config_for(&server));
    let response = client
        .query("query { ping }", Some(json!({"id": 7})))
        .await
        .unwrap();

    assert_eq!(response.body["data"]["ping"], "pong");
}

#[tokio::test]
async fn test_query_leaves_errors_to_the_caller() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"errors": [{"message": "boom"}]})),
        )
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&config_for(&server));
    let response = client.query("query { ping }", None).await.unwrap();
    assert!(response.body.get("errors").is_some());

    let error = client.query_data("query { ping }", None).await.unwrap_err();
    assert!(matches!(error, GraphqlError::Errors { ref messages } if messages == &["boom"]));
}

#[tokio::test]
async fn test_http_failure_is_wrapped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Unauthorized"})))
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&config_for(&server));
    let error = client.query_data("query { ping }", None).await.unwrap_err();

    assert!(matches!(
        error,
        GraphqlError::Http(HttpError::Response(HttpResponseError { code: 401, .. }))
    ));
    assert!(error.to_string().contains("Unauthorized"));
}

// ============================================================================
// CheckoutClient Tests
// ============================================================================

#[tokio::test]
async fn test_get_checkout_details_reads_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query GetCheckoutDetails"))
        .and(body_partial_json(json!({"variables": {"orderID": "5O190127TN364715T"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "checkoutSession": {
                    "cart": {
                        "intent": "capture",
                        "amounts": {"total": {"currencyCode": "USD"}},
                        "shippingMethods": [
                            {"id": "SHIP_124", "label": "Overnight", "type": "SHIPPING", "selected": true,
                             "amount": {"value": "40.00", "currency_code": "USD"}}
                        ]
                    },
                    "payees": [{"merchantId": "XYZ12345", "email": {"stringValue": "xyz-us-b1@example.com"}}]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CheckoutClient::new(&config_for(&server));
    let session = client.get_checkout_details(&order_id()).await.unwrap();

    assert_eq!(session.cart.intent.as_deref(), Some("capture"));
    assert_eq!(
        session.payees[0]
            .email
            .as_ref()
            .and_then(|email| email.string_value.as_deref()),
        Some("xyz-us-b1@example.com")
    );
    let options = session.shipping_options().unwrap();
    assert_eq!(options.selected().map(|o| o.amount.to_value_string()), Some("40.00".to_string()));
}

#[tokio::test]
async fn test_get_checkout_details_without_session_is_missing_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"checkoutSession": null}})))
        .mount(&server)
        .await;

    let client = CheckoutClient::new(&config_for(&server));
    let error = client.get_checkout_details(&order_id()).await.unwrap_err();

    assert!(matches!(error, GraphqlError::MissingData));
}

#[tokio::test]
async fn test_update_shipping_sends_operations_and_accepts_bare_ack() {
    let usd = CurrencyCode::new("USD").unwrap();
    let amount = AmountBreakdown::builder(&usd)
        .item_total(Money::parse("10.00", &usd).unwrap())
        .build()
        .unwrap();
    let operations = vec![PatchOperation::replace_amount(amount)];

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("mutation UpdateShipping"))
        .and(body_partial_json(json!({
            "variables": {
                "orderID": "5O190127TN364715T",
                "data": [{
                    "op": "replace",
                    "path": "/purchase_units/@reference_id=='default'/amount",
                    "value": {"value": "10.00", "currency_code": "USD"}
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "5O190127TN364715T"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = CheckoutClient::new(&config_for(&server));
    client
        .update_shipping(&order_id(), &operations)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_shipping_errors_array_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "ORDER_NOT_FOUND"}]
        })))
        .mount(&server)
        .await;

    let client = CheckoutClient::new(&config_for(&server));
    let error = client.update_shipping(&order_id(), &[]).await.unwrap_err();

    assert_eq!(error.to_string(), "GraphQL request failed: ORDER_NOT_FOUND");
}
