//! Configuration types for checkout API communication.
//!
//! # Overview
//!
//! - [`CheckoutConfig`]: The configuration struct holding all client settings
//! - [`CheckoutConfigBuilder`]: A builder for constructing [`CheckoutConfig`] instances
//! - [`ClientId`]: A validated client ID newtype
//! - [`AccessToken`]: A validated bearer token with masked debug output
//! - [`OrderId`]: A validated checkout order ID
//! - [`HostUrl`]: A validated API host URL
//!
//! # Example
//!
//! ```rust
//! use checkout_shipping::{CheckoutConfig, ClientId, HostUrl};
//!
//! let config = CheckoutConfig::builder()
//!     .api_host(HostUrl::new("https://www.sandbox.example.com").unwrap())
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ClientId, HostUrl, OrderId};

use crate::error::ConfigError;

/// Configuration for talking to the checkout GraphQL endpoint.
///
/// # Thread Safety
///
/// `CheckoutConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    api_host: HostUrl,
    client_id: ClientId,
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
    tries: u32,
}

impl CheckoutConfig {
    /// Creates a new builder for constructing a `CheckoutConfig`.
    #[must_use]
    pub fn builder() -> CheckoutConfigBuilder {
        CheckoutConfigBuilder::new()
    }

    /// Returns the API host all requests are sent to.
    #[must_use]
    pub const fn api_host(&self) -> &HostUrl {
        &self.api_host
    }

    /// Returns the merchant integration's client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the bearer token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many times a request is attempted on 429/500 responses.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

// Verify CheckoutConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CheckoutConfig>();
};

/// Builder for constructing [`CheckoutConfig`] instances.
///
/// Required fields are `api_host` and `client_id`.
///
/// # Defaults
///
/// - `access_token`: `None`
/// - `user_agent_prefix`: `None`
/// - `tries`: `1` (no retries)
#[derive(Debug, Default)]
pub struct CheckoutConfigBuilder {
    api_host: Option<HostUrl>,
    client_id: Option<ClientId>,
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
}

impl CheckoutConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API host (required).
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the bearer token sent in the `Authorization` header.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the number of attempts for requests answered with 429 or 500.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the [`CheckoutConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_host` or
    /// `client_id` are not set, and [`ConfigError::InvalidTries`] if `tries`
    /// was set to zero.
    pub fn build(self) -> Result<CheckoutConfig, ConfigError> {
        let api_host = self
            .api_host
            .ok_or(ConfigError::MissingRequiredField { field: "api_host" })?;
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;

        let tries = self.tries.unwrap_or(1);
        if tries == 0 {
            return Err(ConfigError::InvalidTries { tries });
        }

        Ok(CheckoutConfig {
            api_host,
            client_id,
            access_token: self.access_token,
            user_agent_prefix: self.user_agent_prefix,
            tries,
        })
    }
}
