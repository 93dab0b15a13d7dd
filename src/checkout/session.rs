//! Checkout session details returned by `GetCheckoutDetails`.

use serde::Deserialize;

use crate::money::CurrencyCode;
use crate::shipping::{ShippingChangeError, ShippingOption, ShippingOptionSet};

/// The checkout session as seen when a shipping address changes.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    /// The shopper's cart.
    pub cart: Cart,
    /// Merchants receiving funds for this order.
    #[serde(default)]
    pub payees: Vec<Payee>,
}

impl CheckoutSession {
    /// The shipping methods offered by the session, as a validated set.
    ///
    /// A session without shipping methods yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingChangeError::InvalidInput`] if the session lists
    /// duplicate ids or several selected methods.
    pub fn shipping_options(&self) -> Result<ShippingOptionSet, ShippingChangeError> {
        self.cart
            .shipping_methods
            .clone()
            .map_or_else(|| Ok(ShippingOptionSet::empty()), ShippingOptionSet::new)
    }

    /// The cart currency, if the session reported one.
    #[must_use]
    pub fn currency_code(&self) -> Option<&CurrencyCode> {
        self.cart
            .amounts
            .as_ref()
            .map(|amounts| &amounts.total.currency_code)
    }
}

/// The cart portion of a checkout session.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Payment intent, e.g. `capture` or `authorize`.
    pub intent: Option<String>,
    /// Cart amounts.
    pub amounts: Option<CartAmounts>,
    /// Shipping methods currently offered.
    pub shipping_methods: Option<Vec<ShippingOption>>,
}

/// Cart amounts reported by the session.
#[derive(Clone, Debug, Deserialize)]
pub struct CartAmounts {
    /// The order total.
    pub total: CartTotal,
}

/// Currency of the cart total.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotal {
    /// ISO 4217 code of the total.
    pub currency_code: CurrencyCode,
}

/// A merchant receiving funds.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payee {
    /// Merchant account id.
    pub merchant_id: Option<String>,
    /// Merchant email.
    pub email: Option<PayeeEmail>,
}

/// Wrapped email value.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayeeEmail {
    /// The email address.
    pub string_value: Option<String>,
}
