//! Accumulator for the updates requested during one shipping-address change.

use crate::money::Money;
use crate::shipping::options::ShippingOptionSet;

/// The tax, shipping discount and shipping options requested so far.
///
/// Each slot is `None` until set. Setting a slot again overwrites it, and the
/// relative order of calls across slots has no effect on the result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingChangeSet {
    tax: Option<Money>,
    discount: Option<Money>,
    options: Option<ShippingOptionSet>,
}

impl PendingChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new tax total.
    pub fn set_tax(&mut self, tax: Money) -> &mut Self {
        self.tax = Some(tax);
        self
    }

    /// Records a new shipping option list.
    pub fn set_shipping_options(&mut self, options: ShippingOptionSet) -> &mut Self {
        self.options = Some(options);
        self
    }

    /// Records a new shipping discount.
    pub fn set_shipping_discount(&mut self, discount: Money) -> &mut Self {
        self.discount = Some(discount);
        self
    }

    /// The requested tax total, if any.
    #[must_use]
    pub const fn tax(&self) -> Option<&Money> {
        self.tax.as_ref()
    }

    /// The requested shipping discount, if any.
    #[must_use]
    pub const fn discount(&self) -> Option<&Money> {
        self.discount.as_ref()
    }

    /// The requested shipping options, if any.
    #[must_use]
    pub const fn options(&self) -> Option<&ShippingOptionSet> {
        self.options.as_ref()
    }

    /// Returns `true` if no slot was ever set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tax.is_none() && self.discount.is_none() && self.options.is_none()
    }
}
