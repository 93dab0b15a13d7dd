//! # Checkout Shipping
//!
//! Shipping-address-change handling for a hosted checkout, providing exact
//! money arithmetic, patch computation for the order's purchase unit, and
//! the GraphQL transport used to refresh an order.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`CheckoutConfig`] and [`CheckoutConfigBuilder`]
//! - Validated newtypes for client credentials, hosts and order IDs
//! - Fixed-point [`Money`](money::Money) tied to a currency's minor unit
//! - The [`ActionSet`](shipping::ActionSet) handed to merchant callbacks
//! - Shopper-safe rejection messages via [`shipping::translate`]
//! - An async GraphQL client with retry and rate limit handling
//!
//! ## Quick Start
//!
//! ```rust
//! use checkout_shipping::{CheckoutConfig, ClientId, HostUrl};
//!
//! let config = CheckoutConfig::builder()
//!     .api_host(HostUrl::new("https://www.sandbox.example.com").unwrap())
//!     .client_id(ClientId::new("merchant-client-id").unwrap())
//!     .tries(3)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.tries(), 3);
//! ```
//!
//! ## Server-side Integration
//!
//! The merchant declares updates and queries the resulting patch:
//!
//! ```rust,ignore
//! use checkout_shipping::shipping::{ActionSet, CallbackError, OnShippingAddressChange, ShippingAddressChangeData};
//!
//! struct Merchant;
//!
//! #[async_trait::async_trait]
//! impl OnShippingAddressChange for Merchant {
//!     async fn on_shipping_address_change(
//!         &self,
//!         data: &ShippingAddressChangeData,
//!         actions: &mut ActionSet<'_>,
//!     ) -> Result<(), CallbackError> {
//!         let usd = data.amount.currency_code();
//!         let operations = actions
//!             .update_tax(Money::parse("20.00", usd)?)?
//!             .update_shipping_discount(Money::parse("10.00", usd)?)?
//!             .query()?;
//!         send_to_merchant_server(&operations).await?;
//!         Ok(())
//!     }
//! }
//! ```
//!
//! ## Client-side Integration
//!
//! ```rust,ignore
//! use checkout_shipping::checkout::CheckoutClient;
//! use checkout_shipping::shipping::handle_shipping_address_change;
//!
//! let api = CheckoutClient::new(&config);
//! let outcome = handle_shipping_address_change(&api, &merchant, &data).await;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Exact arithmetic**: Money never passes through floating point
//! - **Single settlement**: Each action set is queried, patched or rejected once
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod checkout;
pub mod clients;
pub mod config;
pub mod error;
pub mod money;
pub mod shipping;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, CheckoutConfig, CheckoutConfigBuilder, ClientId, HostUrl, OrderId};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    GraphqlClient, GraphqlError, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidHttpRequestError,
    MaxHttpRetriesExceededError,
};

// Re-export checkout and shipping entry points
pub use checkout::{CheckoutApi, CheckoutClient};
pub use money::{CurrencyCode, Money, MoneyError};
pub use shipping::{
    handle_shipping_address_change, ActionSet, OnShippingAddressChange, ShippingChangeError,
    ShippingChangeOutcome,
};
