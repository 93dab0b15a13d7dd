//! Patch emission for the order's purchase unit.
//!
//! A shipping-address change can rewrite two documents on the server-held
//! order: the purchase unit `amount` and its `shipping/options`. Both are
//! written with whole-object JSON-Patch `replace` operations, amount first.
//!
//! # Example
//!
//! ```rust
//! use checkout_shipping::money::{CurrencyCode, Money};
//! use checkout_shipping::shipping::{AmountBreakdown, PatchEmitter, PendingChangeSet, ShippingOptionSet};
//!
//! let usd = CurrencyCode::new("USD").unwrap();
//! let original = AmountBreakdown::builder(&usd)
//!     .item_total(Money::parse("10.00", &usd).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let mut pending = PendingChangeSet::new();
//! pending.set_tax(Money::parse("0.80", &usd).unwrap());
//!
//! let operations = PatchEmitter::emit(&original, &ShippingOptionSet::empty(), &pending).unwrap();
//! assert_eq!(operations.len(), 1);
//! assert_eq!(operations[0].path, checkout_shipping::shipping::AMOUNT_PATH);
//! ```

use serde::Serialize;

use crate::shipping::amount::AmountBreakdown;
use crate::shipping::errors::ShippingChangeError;
use crate::shipping::options::ShippingOptionSet;
use crate::shipping::pending::PendingChangeSet;

/// JSON pointer to the default purchase unit's amount.
pub const AMOUNT_PATH: &str = "/purchase_units/@reference_id=='default'/amount";

/// JSON pointer to the default purchase unit's shipping options.
pub const SHIPPING_OPTIONS_PATH: &str = "/purchase_units/@reference_id=='default'/shipping/options";

/// The JSON-Patch operation kind. Only whole-value replacement is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Overwrite the value at `path`.
    Replace,
}

/// The document written by a [`PatchOperation`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PatchValue {
    /// The full recomputed amount object.
    Amount(AmountBreakdown),
    /// The full shipping option list, in caller order.
    ShippingOptions(ShippingOptionSet),
}

/// A single `{"op","path","value"}` patch record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatchOperation {
    /// Operation kind.
    pub op: PatchOp,
    /// Target pointer, one of [`AMOUNT_PATH`] or [`SHIPPING_OPTIONS_PATH`].
    pub path: &'static str,
    /// Replacement value.
    pub value: PatchValue,
}

impl PatchOperation {
    /// Replaces the purchase unit amount.
    #[must_use]
    pub const fn replace_amount(amount: AmountBreakdown) -> Self {
        Self {
            op: PatchOp::Replace,
            path: AMOUNT_PATH,
            value: PatchValue::Amount(amount),
        }
    }

    /// Replaces the purchase unit shipping options.
    #[must_use]
    pub const fn replace_shipping_options(options: ShippingOptionSet) -> Self {
        Self {
            op: PatchOp::Replace,
            path: SHIPPING_OPTIONS_PATH,
            value: PatchValue::ShippingOptions(options),
        }
    }
}

/// Reduces a [`PendingChangeSet`] into the ordered patch for the order.
#[derive(Clone, Copy, Debug, Default)]
pub struct PatchEmitter;

impl PatchEmitter {
    /// Computes the patch operations for `pending` against `original`.
    ///
    /// - Nothing requested: no operations.
    /// - Anything requested: one amount `replace` carrying the full
    ///   recomputed breakdown, even if the values equal the original.
    /// - Options requested: a second `replace` with the list exactly as given.
    ///
    /// Tax, shipping selection and shipping discount are applied in that
    /// fixed order, so the order of the update calls never matters.
    ///
    /// `options_snapshot` is the selection known to the checkout session
    /// before the change and is only used for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingChangeError::Money`] if a requested value is in a
    /// different currency than `original` or the total overflows.
    pub fn emit(
        original: &AmountBreakdown,
        options_snapshot: &ShippingOptionSet,
        pending: &PendingChangeSet,
    ) -> Result<Vec<PatchOperation>, ShippingChangeError> {
        if pending.is_empty() {
            tracing::debug!("No shipping changes requested; emitting an empty patch");
            return Ok(Vec::new());
        }

        let mut amount = original.clone();
        if let Some(tax) = pending.tax() {
            amount = amount.apply_tax(tax)?;
        }
        if let Some(options) = pending.options() {
            tracing::debug!(
                "Shipping selection changing from {:?} to {:?}",
                options_snapshot.selected().map(|option| option.id.as_str()),
                options.selected().map(|option| option.id.as_str())
            );
            amount = amount.apply_shipping_selection(options)?;
        }
        if let Some(discount) = pending.discount() {
            amount = amount.apply_shipping_discount(discount)?;
        }

        if &amount == original {
            tracing::debug!("Requested shipping changes leave the amount unchanged");
        }

        let mut operations = Vec::with_capacity(2);
        operations.push(PatchOperation::replace_amount(amount));
        if let Some(options) = pending.options() {
            operations.push(PatchOperation::replace_shipping_options(options.clone()));
        }

        tracing::debug!("Emitting {} shipping patch operation(s)", operations.len());
        Ok(operations)
    }
}
