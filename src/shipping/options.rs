//! Shipping options offered to the shopper.
//!
//! A [`ShippingOptionSet`] keeps the caller's order; that order is what gets
//! written into the shipping-options patch. At most one option is selected.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::money::{serialize_value_first, CurrencyCode, Money};
use crate::shipping::errors::ShippingChangeError;

/// The kind of delivery an option represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingOptionType {
    /// Delivery to the shopper's address.
    Shipping,
}

/// One selectable delivery method with its charge.
///
/// Serializes as `{"id","label","type","selected","amount":{"value","currency_code"}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingOption {
    /// Identifier, unique within its set.
    pub id: String,
    /// Shopper-facing label.
    pub label: String,
    /// Delivery kind.
    #[serde(rename = "type")]
    pub kind: ShippingOptionType,
    /// Whether this option is the current selection.
    pub selected: bool,
    /// The charge for this option.
    #[serde(serialize_with = "serialize_value_first")]
    pub amount: Money,
}

/// An ordered list of shipping options with at most one selected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShippingOptionSet(Vec<ShippingOption>);

impl ShippingOptionSet {
    /// Validates and wraps a list of options.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingChangeError::InvalidInput`] if an id is empty or
    /// repeated, or if more than one option is selected.
    pub fn new(options: Vec<ShippingOption>) -> Result<Self, ShippingChangeError> {
        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if option.id.trim().is_empty() {
                return Err(ShippingChangeError::invalid(
                    "options",
                    "shipping option id must not be empty",
                ));
            }
            if !seen.insert(option.id.as_str()) {
                return Err(ShippingChangeError::invalid(
                    "options",
                    format!("duplicate shipping option id '{}'", option.id),
                ));
            }
        }

        let selected = options.iter().filter(|option| option.selected).count();
        if selected > 1 {
            return Err(ShippingChangeError::invalid(
                "options",
                format!("{selected} shipping options are selected; at most one is allowed"),
            ));
        }

        Ok(Self(options))
    }

    /// An empty set, used when the checkout session offers no methods.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the options in their original order.
    #[must_use]
    pub fn as_slice(&self) -> &[ShippingOption] {
        &self.0
    }

    /// Number of options in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set has no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the selected option, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&ShippingOption> {
        self.0.iter().find(|option| option.selected)
    }

    /// The shipping charge implied by the selection: the selected option's
    /// amount, or zero in `currency_code` when nothing is selected.
    #[must_use]
    pub fn selected_amount(&self, currency_code: &CurrencyCode) -> Money {
        self.selected()
            .map_or_else(|| Money::zero(currency_code), |option| option.amount.clone())
    }

    /// Fails unless every option is priced in `currency_code`.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingChangeError::Money`] with a currency mismatch.
    pub fn ensure_currency(&self, currency_code: &CurrencyCode) -> Result<(), ShippingChangeError> {
        let reference = Money::zero(currency_code);
        for option in &self.0 {
            reference.ensure_same_currency(&option.amount)?;
        }
        Ok(())
    }
}

impl Serialize for ShippingOptionSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ShippingOptionSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let options = Vec::<ShippingOption>::deserialize(deserializer)?;
        Self::new(options).map_err(serde::de::Error::custom)
    }
}
