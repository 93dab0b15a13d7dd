//! Error types for shipping-address-change actions.
//!
//! - [`ShippingChangeError::InvalidInput`]: malformed option list or amount passed to an update method
//! - [`ShippingChangeError::Money`]: money parsing or arithmetic failure, including currency mismatch
//! - [`ShippingChangeError::AlreadySettled`]: an action was used after `query`, `patch` or `reject`
//! - [`ShippingChangeError::PatchRejected`]: the order-update endpoint declined the update
//!
//! None of these messages are shown to shoppers. Shopper-facing text only
//! ever comes from [`translate`](crate::shipping::translate).

use thiserror::Error;

use crate::clients::graphql::GraphqlError;
use crate::money::MoneyError;

/// Error type for shipping-address-change actions.
#[derive(Debug, Error)]
pub enum ShippingChangeError {
    /// An update method received a value it cannot accept.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// The argument that was rejected (`tax`, `discount`, `options`).
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A money value could not be parsed or combined.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The action set was already settled by `query`, `patch` or `reject`.
    #[error("Shipping change actions were already settled; each event allows a single query, patch or reject")]
    AlreadySettled,

    /// The order-update endpoint declined the shipping update.
    #[error("Shipping update was rejected for order {order_id}: {source}")]
    PatchRejected {
        /// The order whose update was declined.
        order_id: String,
        /// The transport or GraphQL error returned by the endpoint.
        #[source]
        source: GraphqlError,
    },
}

impl ShippingChangeError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by malformed merchant input,
    /// including currency mismatches.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::Money(_))
    }
}
