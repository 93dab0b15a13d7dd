//! Error types for checkout configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use checkout_shipping::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`CheckoutConfig`](crate::CheckoutConfig)
/// or one of its validated newtypes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide the client ID of the merchant integration.")]
    EmptyClientId,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Omit the token instead of passing an empty string.")]
    EmptyAccessToken,

    /// Order ID is invalid.
    #[error("Invalid order ID '{order_id}'. Order IDs must be non-empty and contain only ASCII letters, digits, '-' or '_'.")]
    InvalidOrderId {
        /// The invalid order ID that was provided.
        order_id: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with an http or https scheme (e.g., 'https://www.sandbox.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The request attempt count must allow at least one attempt.
    #[error("Invalid tries value {tries}. At least one attempt is required.")]
    InvalidTries {
        /// The rejected value.
        tries: u32,
    },
}
