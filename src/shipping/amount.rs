//! Purchase-unit amount breakdown and its recomputation rule.
//!
//! The order total is always derived:
//!
//! ```text
//! total = item_total + shipping + handling + tax_total - discount - shipping_discount
//! ```
//!
//! The `apply_*` functions never mutate their input; each returns a new
//! breakdown with the total recomputed.

use serde::ser::SerializeStruct;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::money::{CurrencyCode, Money, MoneyError};
use crate::shipping::errors::ShippingChangeError;
use crate::shipping::options::ShippingOptionSet;

/// The decomposition of an order amount, all in one currency.
///
/// Serializes as the upstream amount object:
/// `{"value","currency_code","breakdown":{"item_total","shipping","handling","tax_total","discount","shipping_discount"}}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmountBreakdown {
    currency_code: CurrencyCode,
    item_total: Money,
    shipping: Money,
    handling: Money,
    tax_total: Money,
    discount: Money,
    shipping_discount: Money,
    total: Money,
}

impl AmountBreakdown {
    /// Starts a breakdown in `currency_code` with every component at zero.
    #[must_use]
    pub fn builder(currency_code: &CurrencyCode) -> AmountBreakdownBuilder {
        AmountBreakdownBuilder::new(currency_code)
    }

    /// The currency shared by every component.
    #[must_use]
    pub const fn currency_code(&self) -> &CurrencyCode {
        &self.currency_code
    }

    /// Sum of line items.
    #[must_use]
    pub const fn item_total(&self) -> &Money {
        &self.item_total
    }

    /// Shipping charge.
    #[must_use]
    pub const fn shipping(&self) -> &Money {
        &self.shipping
    }

    /// Handling charge.
    #[must_use]
    pub const fn handling(&self) -> &Money {
        &self.handling
    }

    /// Tax total.
    #[must_use]
    pub const fn tax_total(&self) -> &Money {
        &self.tax_total
    }

    /// Order-level discount.
    #[must_use]
    pub const fn discount(&self) -> &Money {
        &self.discount
    }

    /// Shipping discount, zero unless set.
    #[must_use]
    pub const fn shipping_discount(&self) -> &Money {
        &self.shipping_discount
    }

    /// The derived order total.
    #[must_use]
    pub const fn total(&self) -> &Money {
        &self.total
    }

    /// Returns a breakdown with `tax_total` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingChangeError::Money`] on currency mismatch or overflow.
    pub fn apply_tax(&self, tax: &Money) -> Result<Self, ShippingChangeError> {
        self.total.ensure_same_currency(tax)?;
        let mut next = self.clone();
        next.tax_total = tax.clone();
        next.recompute()
    }

    /// Returns a breakdown whose shipping charge follows the selected option,
    /// or zero when no option is selected.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingChangeError::Money`] on currency mismatch or overflow.
    pub fn apply_shipping_selection(
        &self,
        options: &ShippingOptionSet,
    ) -> Result<Self, ShippingChangeError> {
        let shipping = options.selected_amount(&self.currency_code);
        self.total.ensure_same_currency(&shipping)?;
        let mut next = self.clone();
        next.shipping = shipping;
        next.recompute()
    }

    /// Returns a breakdown with `shipping_discount` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingChangeError::Money`] on currency mismatch or overflow.
    pub fn apply_shipping_discount(&self, discount: &Money) -> Result<Self, ShippingChangeError> {
        self.total.ensure_same_currency(discount)?;
        let mut next = self.clone();
        next.shipping_discount = discount.clone();
        next.recompute()
    }

    fn recompute(mut self) -> Result<Self, ShippingChangeError> {
        self.total = self
            .item_total
            .checked_add(&self.shipping)?
            .checked_add(&self.handling)?
            .checked_add(&self.tax_total)?
            .checked_sub(&self.discount)?
            .checked_sub(&self.shipping_discount)?;
        Ok(self)
    }
}

/// Builder for [`AmountBreakdown`]. Unset components default to zero.
#[derive(Debug)]
pub struct AmountBreakdownBuilder {
    currency_code: CurrencyCode,
    item_total: Option<Money>,
    shipping: Option<Money>,
    handling: Option<Money>,
    tax_total: Option<Money>,
    discount: Option<Money>,
    shipping_discount: Option<Money>,
}

impl AmountBreakdownBuilder {
    fn new(currency_code: &CurrencyCode) -> Self {
        Self {
            currency_code: currency_code.clone(),
            item_total: None,
            shipping: None,
            handling: None,
            tax_total: None,
            discount: None,
            shipping_discount: None,
        }
    }

    /// Sets the item total.
    #[must_use]
    pub fn item_total(mut self, money: Money) -> Self {
        self.item_total = Some(money);
        self
    }

    /// Sets the shipping charge.
    #[must_use]
    pub fn shipping(mut self, money: Money) -> Self {
        self.shipping = Some(money);
        self
    }

    /// Sets the handling charge.
    #[must_use]
    pub fn handling(mut self, money: Money) -> Self {
        self.handling = Some(money);
        self
    }

    /// Sets the tax total.
    #[must_use]
    pub fn tax_total(mut self, money: Money) -> Self {
        self.tax_total = Some(money);
        self
    }

    /// Sets the order discount.
    #[must_use]
    pub fn discount(mut self, money: Money) -> Self {
        self.discount = Some(money);
        self
    }

    /// Sets the shipping discount.
    #[must_use]
    pub fn shipping_discount(mut self, money: Money) -> Self {
        self.shipping_discount = Some(money);
        self
    }

    /// Builds the breakdown and derives its total.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingChangeError::Money`] if a component is in another
    /// currency or the total overflows.
    pub fn build(self) -> Result<AmountBreakdown, ShippingChangeError> {
        let currency_code = self.currency_code;
        let zero = Money::zero(&currency_code);
        let component = |money: Option<Money>| -> Result<Money, MoneyError> {
            let money = money.unwrap_or_else(|| zero.clone());
            zero.ensure_same_currency(&money)?;
            Ok(money)
        };

        let breakdown = AmountBreakdown {
            item_total: component(self.item_total)?,
            shipping: component(self.shipping)?,
            handling: component(self.handling)?,
            tax_total: component(self.tax_total)?,
            discount: component(self.discount)?,
            shipping_discount: component(self.shipping_discount)?,
            total: zero.clone(),
            currency_code,
        };
        breakdown.recompute()
    }
}

#[derive(Serialize)]
struct BreakdownRef<'a> {
    item_total: &'a Money,
    shipping: &'a Money,
    handling: &'a Money,
    tax_total: &'a Money,
    discount: &'a Money,
    shipping_discount: &'a Money,
}

impl Serialize for AmountBreakdown {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Amount", 3)?;
        state.serialize_field("value", &self.total.to_value_string())?;
        state.serialize_field("currency_code", &self.currency_code)?;
        state.serialize_field(
            "breakdown",
            &BreakdownRef {
                item_total: &self.item_total,
                shipping: &self.shipping,
                handling: &self.handling,
                tax_total: &self.tax_total,
                discount: &self.discount,
                shipping_discount: &self.shipping_discount,
            },
        )?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for AmountBreakdown {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct AmountWire {
            currency_code: CurrencyCode,
            value: String,
            #[serde(default)]
            breakdown: Option<BreakdownWire>,
        }

        #[derive(Deserialize)]
        struct BreakdownWire {
            item_total: Option<Money>,
            shipping: Option<Money>,
            handling: Option<Money>,
            tax_total: Option<Money>,
            discount: Option<Money>,
            shipping_discount: Option<Money>,
        }

        let wire = AmountWire::deserialize(deserializer)?;
        let declared = Money::parse(&wire.value, &wire.currency_code).map_err(de::Error::custom)?;

        let mut builder = AmountBreakdown::builder(&wire.currency_code);
        match wire.breakdown {
            Some(parts) => {
                let set = |builder: AmountBreakdownBuilder,
                           money: Option<Money>,
                           apply: fn(AmountBreakdownBuilder, Money) -> AmountBreakdownBuilder| {
                    match money {
                        Some(money) => apply(builder, money),
                        None => builder,
                    }
                };
                builder = set(builder, parts.item_total, AmountBreakdownBuilder::item_total);
                builder = set(builder, parts.shipping, AmountBreakdownBuilder::shipping);
                builder = set(builder, parts.handling, AmountBreakdownBuilder::handling);
                builder = set(builder, parts.tax_total, AmountBreakdownBuilder::tax_total);
                builder = set(builder, parts.discount, AmountBreakdownBuilder::discount);
                builder = set(
                    builder,
                    parts.shipping_discount,
                    AmountBreakdownBuilder::shipping_discount,
                );
            }
            None => builder = builder.item_total(declared.clone()),
        }

        let breakdown = builder.build().map_err(de::Error::custom)?;
        if breakdown.total != declared {
            tracing::debug!(
                "Declared amount {} differs from derived total {}; using the derived total",
                declared,
                breakdown.total
            );
        }
        Ok(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::options::{ShippingOption, ShippingOptionType};

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    fn money(value: &str) -> Money {
        Money::parse(value, &usd()).unwrap()
    }

    fn sample() -> AmountBreakdown {
        AmountBreakdown::builder(&usd())
            .item_total(money("180.00"))
            .shipping(money("5.00"))
            .handling(money("1.00"))
            .tax_total(money("20.00"))
            .discount(money("10.00"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_total_is_derived() {
        let breakdown = sample();
        assert_eq!(breakdown.total().to_value_string(), "196.00");
        assert_eq!(breakdown.shipping_discount().to_value_string(), "0.00");
    }

    #[test]
    fn test_apply_tax_returns_new_breakdown() {
        let original = sample();
        let updated = original.apply_tax(&money("25.50")).unwrap();

        assert_eq!(updated.tax_total().to_value_string(), "25.50");
        assert_eq!(updated.total().to_value_string(), "201.50");
        assert_eq!(original.tax_total().to_value_string(), "20.00");
    }

    #[test]
    fn test_apply_shipping_selection_uses_selected_amount() {
        let options = ShippingOptionSet::new(vec![ShippingOption {
            id: "SHIP_124".to_string(),
            label: "Overnight".to_string(),
            kind: ShippingOptionType::Shipping,
            selected: true,
            amount: money("40.00"),
        }])
        .unwrap();

        let updated = sample().apply_shipping_selection(&options).unwrap();
        assert_eq!(updated.shipping().to_value_string(), "40.00");
        assert_eq!(updated.total().to_value_string(), "231.00");

        let cleared = sample().apply_shipping_selection(&ShippingOptionSet::empty()).unwrap();
        assert_eq!(cleared.shipping().to_value_string(), "0.00");
    }

    #[test]
    fn test_apply_shipping_discount() {
        let updated = sample().apply_shipping_discount(&money("10.00")).unwrap();
        assert_eq!(updated.total().to_value_string(), "186.00");
    }

    #[test]
    fn test_currency_mismatch_is_rejected() {
        let euros = Money::parse("1.00", &CurrencyCode::new("EUR").unwrap()).unwrap();
        assert!(matches!(
            sample().apply_tax(&euros),
            Err(ShippingChangeError::Money(MoneyError::CurrencyMismatch { .. }))
        ));
        assert!(AmountBreakdown::builder(&usd()).handling(euros).build().is_err());
    }

    #[test]
    fn test_deserializes_host_amount() {
        let json = r#"{
            "currency_code": "USD",
            "value": "200.00",
            "breakdown": {
                "item_total": {"currency_code": "USD", "value": "180.00"},
                "shipping": {"currency_code": "USD", "value": "5.00"},
                "handling": {"currency_code": "USD", "value": "1.00"},
                "tax_total": {"currency_code": "USD", "value": "20.00"},
                "discount": {"currency_code": "USD", "value": "10.00"}
            }
        }"#;
        let breakdown: AmountBreakdown = serde_json::from_str(json).unwrap();
        assert_eq!(breakdown, sample());
    }

    #[test]
    fn test_deserializes_amount_without_breakdown() {
        let json = r#"{"currency_code": "USD", "value": "42.10"}"#;
        let breakdown: AmountBreakdown = serde_json::from_str(json).unwrap();
        assert_eq!(breakdown.item_total().to_value_string(), "42.10");
        assert_eq!(breakdown.total().to_value_string(), "42.10");
    }

    #[test]
    fn test_serializes_full_amount_object() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"value":"196.00","currency_code":"USD","breakdown":{"item_total":{"currency_code":"USD","value":"180.00"},"shipping":{"currency_code":"USD","value":"5.00"},"handling":{"currency_code":"USD","value":"1.00"},"tax_total":{"currency_code":"USD","value":"20.00"},"discount":{"currency_code":"USD","value":"10.00"},"shipping_discount":{"currency_code":"USD","value":"0.00"}}}"#
        );
    }
}
