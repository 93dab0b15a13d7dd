//! GraphQL client implementation.

use crate::clients::graphql::GraphqlError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::CheckoutConfig;

/// Path of the GraphQL endpoint relative to the API host.
const GRAPHQL_PATH: &str = "graphql";

/// GraphQL client for the checkout API.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use checkout_shipping::clients::GraphqlClient;
/// use serde_json::json;
///
/// let client = GraphqlClient::new(&config);
/// let data = client
///     .query_data(
///         "query GetCheckoutDetails($orderID: String!) { checkoutSession(token: $orderID) { cart { intent } } }",
///         Some(json!({ "orderID": "5O190127TN364715T" })),
///     )
///     .await?;
/// println!("intent: {}", data["checkoutSession"]["cart"]["intent"]);
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    http_client: HttpClient,
    tries: u32,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new GraphQL client from the configuration.
    ///
    /// The configured `tries` applies to every request.
    #[must_use]
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            http_client: HttpClient::new(config),
            tries: config.tries(),
        }
    }

    /// Returns the number of attempts made per request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Executes a GraphQL document and returns the raw response.
    ///
    /// GraphQL-level errors are returned with HTTP 200 and left in
    /// `response.body["errors"]`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] for HTTP-level errors (network errors,
    /// non-2xx responses, retry exhaustion).
    pub async fn query(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<HttpResponse, GraphqlError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables
        });

        let request = HttpRequest::builder(HttpMethod::Post, GRAPHQL_PATH)
            .body(body)
            .tries(self.tries)
            .build()
            .map_err(|e| GraphqlError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }

    /// Executes a GraphQL document and returns its `data` object.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Errors`] when the body holds a non-empty
    /// `errors` array, [`GraphqlError::MissingData`] when `data` is absent or
    /// null, and [`GraphqlError::Http`] for transport failures.
    pub async fn query_data(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, GraphqlError> {
        let response = self.query(query, variables).await?;
        Self::extract_data(response.body)
    }

    /// Fails if `body` carries a non-empty GraphQL `errors` array.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Errors`] with each error's `message`, or the
    /// raw error object when it has none.
    pub fn check_errors(body: &serde_json::Value) -> Result<(), GraphqlError> {
        match body.get("errors").and_then(serde_json::Value::as_array) {
            Some(errors) if !errors.is_empty() => Err(GraphqlError::Errors {
                messages: errors
                    .iter()
                    .map(|error| {
                        error
                            .get("message")
                            .and_then(serde_json::Value::as_str)
                            .map_or_else(|| error.to_string(), String::from)
                    })
                    .collect(),
            }),
            _ => Ok(()),
        }
    }

    fn extract_data(mut body: serde_json::Value) -> Result<serde_json::Value, GraphqlError> {
        Self::check_errors(&body)?;

        match body.get_mut("data").map(serde_json::Value::take) {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(GraphqlError::MissingData),
        }
    }
}
