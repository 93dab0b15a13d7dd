//! Host side of a shipping-address change.
//!
//! [`handle_shipping_address_change`] fetches the shipping options offered
//! by the checkout session, hands a fresh [`ActionSet`] to the merchant
//! callback, and reports how the callback settled it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::checkout::CheckoutApi;
use crate::config::OrderId;
use crate::shipping::actions::{ActionSet, Settlement};
use crate::shipping::amount::AmountBreakdown;
use crate::shipping::options::ShippingOptionSet;
use crate::shipping::patch::PatchOperation;
use crate::shipping::rejection::{ShippingErrorCode, GENERIC_ERROR_MESSAGE};

/// Error type returned by merchant callbacks.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// The shopper's new shipping address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// City or locality.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,
    /// Postal or zip code.
    pub postal_code: Option<String>,
}

/// Payload passed to the merchant when the shipping address changes.
///
/// Deserializes from the host event
/// `{"orderID", "amount", "shipping_address"}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ShippingAddressChangeData {
    /// The order being checked out.
    #[serde(rename = "orderID")]
    pub order_id: OrderId,
    /// The order amount before the change.
    pub amount: AmountBreakdown,
    /// The new address.
    #[serde(default)]
    pub shipping_address: ShippingAddress,
}

impl ShippingAddressChangeData {
    /// Creates a payload.
    #[must_use]
    pub const fn new(
        order_id: OrderId,
        amount: AmountBreakdown,
        shipping_address: ShippingAddress,
    ) -> Self {
        Self {
            order_id,
            amount,
            shipping_address,
        }
    }

    /// The error codes a merchant may reject with.
    ///
    /// Either a code or its [`message`](ShippingErrorCode::message) can be
    /// passed to [`ActionSet::reject`].
    #[must_use]
    pub fn errors(&self) -> &'static [ShippingErrorCode] {
        &ShippingErrorCode::ALL
    }
}

/// The merchant's shipping-address-change callback.
#[async_trait]
pub trait OnShippingAddressChange: Send + Sync {
    /// Reacts to a new shipping address through `actions`.
    ///
    /// # Errors
    ///
    /// Any error halts checkout with the generic shopper-facing message.
    async fn on_shipping_address_change(
        &self,
        data: &ShippingAddressChangeData,
        actions: &mut ActionSet<'_>,
    ) -> Result<(), CallbackError>;
}

/// What the host should do after the callback finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShippingChangeOutcome {
    /// The merchant computed these operations with `query`.
    Queried(Vec<PatchOperation>),
    /// The merchant refreshed the order with `patch`.
    Patched,
    /// Checkout must stop and show `message` to the shopper.
    Rejected {
        /// Shopper-facing message.
        message: &'static str,
    },
    /// The callback finished without settling its actions.
    Completed,
}

/// Runs one shipping-address-change event end to end.
///
/// The shipping options offered by the checkout session become the
/// action set's snapshot. When the session cannot be fetched or its
/// methods are malformed, an empty snapshot is used.
///
/// A callback error or a failed `patch` becomes
/// [`ShippingChangeOutcome::Rejected`] with the generic message, so
/// merchant text never reaches the shopper.
pub async fn handle_shipping_address_change(
    api: &dyn CheckoutApi,
    callback: &dyn OnShippingAddressChange,
    data: &ShippingAddressChangeData,
) -> ShippingChangeOutcome {
    let snapshot = fetch_options_snapshot(api, &data.order_id).await;

    let mut actions = ActionSet::new(api, data.order_id.clone(), data.amount.clone(), snapshot);
    if let Err(e) = callback.on_shipping_address_change(data, &mut actions).await {
        tracing::warn!(
            "Shipping address change callback failed for order {}: {}",
            data.order_id,
            e
        );
        return ShippingChangeOutcome::Rejected {
            message: GENERIC_ERROR_MESSAGE,
        };
    }

    match actions.into_settlement() {
        Some(Settlement::Queried(operations)) => ShippingChangeOutcome::Queried(operations),
        Some(Settlement::Patched) => ShippingChangeOutcome::Patched,
        Some(Settlement::PatchFailed) => ShippingChangeOutcome::Rejected {
            message: GENERIC_ERROR_MESSAGE,
        },
        Some(Settlement::Rejected { message }) => ShippingChangeOutcome::Rejected { message },
        None => ShippingChangeOutcome::Completed,
    }
}

async fn fetch_options_snapshot(api: &dyn CheckoutApi, order_id: &OrderId) -> ShippingOptionSet {
    let session = match api.get_checkout_details(order_id).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(
                "Could not fetch checkout details for order {}: {}",
                order_id,
                e
            );
            return ShippingOptionSet::empty();
        }
    };

    session.shipping_options().unwrap_or_else(|e| {
        tracing::warn!(
            "Ignoring shipping methods of order {}: {}",
            order_id,
            e
        );
        ShippingOptionSet::empty()
    })
}
