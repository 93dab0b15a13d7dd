//! GraphQL-backed checkout API.

use async_trait::async_trait;

use crate::checkout::session::CheckoutSession;
use crate::clients::{GraphqlClient, GraphqlError};
use crate::config::{CheckoutConfig, OrderId};
use crate::shipping::PatchOperation;

/// Fetches the checkout session for an order.
pub const GET_CHECKOUT_DETAILS_QUERY: &str = r"query GetCheckoutDetails($orderID: String!) {
    checkoutSession(token: $orderID) {
        cart {
            intent
            amounts {
                total {
                    currencyCode
                }
            }
            shippingMethods {
                id
                label
                type
                selected
                amount {
                    currency_code: currencyCode
                    value
                }
            }
        }
        payees {
            merchantId
            email {
                stringValue
            }
        }
    }
}";

/// Applies shipping patch operations to an order.
pub const UPDATE_SHIPPING_MUTATION: &str = r"mutation UpdateShipping($orderID: String!, $data: [PatchData]!) {
    updateShipping(token: $orderID, data: $data)
}";

/// The checkout operations a shipping-address change depends on.
///
/// [`CheckoutClient`] is the GraphQL implementation; tests and embedders
/// can supply their own.
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    /// Fetches the checkout session for `order_id`.
    async fn get_checkout_details(&self, order_id: &OrderId)
        -> Result<CheckoutSession, GraphqlError>;

    /// Sends a shipping update for `order_id`.
    ///
    /// An empty `operations` slice asks the server to refresh the order's
    /// shipping state from what it already holds.
    async fn update_shipping(
        &self,
        order_id: &OrderId,
        operations: &[PatchOperation],
    ) -> Result<(), GraphqlError>;
}

/// [`CheckoutApi`] over the checkout GraphQL endpoint.
#[derive(Debug)]
pub struct CheckoutClient {
    graphql: GraphqlClient,
}

impl CheckoutClient {
    /// Creates a client from the configuration.
    #[must_use]
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            graphql: GraphqlClient::new(config),
        }
    }

    /// Returns the underlying GraphQL client.
    #[must_use]
    pub const fn graphql(&self) -> &GraphqlClient {
        &self.graphql
    }
}

#[async_trait]
impl CheckoutApi for CheckoutClient {
    async fn get_checkout_details(
        &self,
        order_id: &OrderId,
    ) -> Result<CheckoutSession, GraphqlError> {
        tracing::debug!("Fetching checkout details for order {}", order_id);
        let mut data = self
            .graphql
            .query_data(
                GET_CHECKOUT_DETAILS_QUERY,
                Some(serde_json::json!({ "orderID": order_id })),
            )
            .await?;

        let session = data
            .get_mut("checkoutSession")
            .map(serde_json::Value::take)
            .filter(|session| !session.is_null())
            .ok_or(GraphqlError::MissingData)?;
        Ok(serde_json::from_value(session)?)
    }

    async fn update_shipping(
        &self,
        order_id: &OrderId,
        operations: &[PatchOperation],
    ) -> Result<(), GraphqlError> {
        tracing::debug!(
            "Updating shipping for order {} with {} operation(s)",
            order_id,
            operations.len()
        );
        let variables = serde_json::json!({
            "orderID": order_id,
            "data": operations,
        });

        // Acknowledgements carry no `data`; only an `errors` array is a failure.
        let response = self
            .graphql
            .query(UPDATE_SHIPPING_MUTATION, Some(variables))
            .await?;
        GraphqlClient::check_errors(&response.body)
    }
}
