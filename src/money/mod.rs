//! Fixed-point money values tied to a currency.
//!
//! Amounts are held as [`rust_decimal::Decimal`] and never touch binary
//! floating point. Every [`Money`] carries the precision of its currency's
//! minor unit: parsing rejects extra fractional digits and serialization
//! always prints exactly that many digits (`"0.00"` for USD, `"500"` for JPY).
//!
//! # Wire format
//!
//! The checkout API uses two field orders for the same money object. Amount
//! breakdown entries are written `{"currency_code", "value"}`, while shipping
//! option amounts and the top-level order amount are written
//! `{"value", "currency_code"}`. `Money` serializes in the first order;
//! [`serialize_value_first`] produces the second.
//!
//! # Example
//!
//! ```rust
//! use checkout_shipping::money::{CurrencyCode, Money};
//!
//! let usd = CurrencyCode::new("USD").unwrap();
//! let item_total = Money::parse("180.00", &usd).unwrap();
//! let handling = Money::parse("1", &usd).unwrap();
//!
//! let sum = item_total.checked_add(&handling).unwrap();
//! assert_eq!(sum.to_value_string(), "181.00");
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Currencies whose minor unit has no fractional digits.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["CLP", "HUF", "ISK", "JPY", "KRW", "TWD", "VND"];

/// Errors produced while parsing or combining money values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The currency code is not a three-letter uppercase ISO 4217 code.
    #[error("Invalid currency code '{code}'. Expected a three-letter ISO 4217 code such as 'USD'.")]
    InvalidCurrencyCode {
        /// The rejected code.
        code: String,
    },

    /// The amount string is not a valid decimal for its currency.
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Two values in different currencies were combined.
    #[error("Currency mismatch: expected {expected}, got {found}")]
    CurrencyMismatch {
        /// The currency of the left-hand side (usually the order's currency).
        expected: CurrencyCode,
        /// The currency that did not match.
        found: CurrencyCode,
    },

    /// The result does not fit in a decimal.
    #[error("Money arithmetic overflowed")]
    Overflow,
}

/// A validated three-letter ISO 4217 currency code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a new validated currency code.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidCurrencyCode`] unless the code is exactly
    /// three ASCII uppercase letters.
    pub fn new(code: impl Into<String>) -> Result<Self, MoneyError> {
        let code = code.into();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(MoneyError::InvalidCurrencyCode { code });
        }
        Ok(Self(code))
    }

    /// Number of fractional digits in the currency's minor unit.
    #[must_use]
    pub fn minor_units(&self) -> u32 {
        if ZERO_DECIMAL_CURRENCIES.contains(&self.0.as_str()) {
            0
        } else {
            2
        }
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A monetary amount in a single currency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Money {
    currency_code: CurrencyCode,
    amount: Decimal,
}

impl Money {
    /// Parses a decimal string such as `"20.00"` in the given currency.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidAmount`] if the string is not a plain
    /// decimal number or has more fractional digits than the currency's
    /// minor unit allows, and [`MoneyError::Overflow`] if the value is too
    /// large to carry the minor-unit digits.
    pub fn parse(value: &str, currency_code: &CurrencyCode) -> Result<Self, MoneyError> {
        let invalid = |reason: &str| MoneyError::InvalidAmount {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.starts_with('+') || trimmed.contains(['e', 'E', '_']) {
            return Err(invalid("expected a plain decimal string"));
        }

        let amount = Decimal::from_str(trimmed).map_err(|e| invalid(&e.to_string()))?;
        if amount.scale() > currency_code.minor_units() {
            return Err(invalid(&format!(
                "{} allows at most {} fractional digits",
                currency_code,
                currency_code.minor_units()
            )));
        }

        Self::from_decimal(amount, currency_code.clone())
    }

    /// Zero in the given currency.
    #[must_use]
    pub fn zero(currency_code: &CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(0, currency_code.minor_units()),
            currency_code: currency_code.clone(),
        }
    }

    /// Fixes `amount` at the currency's minor-unit scale.
    ///
    /// Values too large to carry the minor-unit digits fail with
    /// [`MoneyError::Overflow`] instead of losing precision.
    fn from_decimal(mut amount: Decimal, currency_code: CurrencyCode) -> Result<Self, MoneyError> {
        amount.rescale(currency_code.minor_units());
        if amount.scale() != currency_code.minor_units() {
            return Err(MoneyError::Overflow);
        }
        Ok(Self {
            currency_code,
            amount,
        })
    }

    /// Returns the currency of this amount.
    #[must_use]
    pub const fn currency_code(&self) -> &CurrencyCode {
        &self.currency_code
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Adds two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the currencies differ and
    /// [`MoneyError::Overflow`] if the sum does not fit.
    pub fn checked_add(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Self::from_decimal(amount, self.currency_code.clone())
    }

    /// Subtracts `other` from `self`.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the currencies differ and
    /// [`MoneyError::Overflow`] if the difference does not fit.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Self::from_decimal(amount, self.currency_code.clone())
    }

    /// Fails with [`MoneyError::CurrencyMismatch`] unless `other` shares this currency.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn ensure_same_currency(&self, other: &Self) -> Result<(), MoneyError> {
        if self.currency_code == other.currency_code {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                expected: self.currency_code.clone(),
                found: other.currency_code.clone(),
            })
        }
    }

    /// Formats the amount with exactly the currency's minor-unit digits.
    #[must_use]
    pub fn to_value_string(&self) -> String {
        self.amount.to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Money", 2)?;
        state.serialize_field("currency_code", &self.currency_code)?;
        state.serialize_field("value", &self.to_value_string())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct MoneyWire {
            currency_code: CurrencyCode,
            value: String,
        }

        let wire = MoneyWire::deserialize(deserializer)?;
        Self::parse(&wire.value, &wire.currency_code).map_err(de::Error::custom)
    }
}

/// Serializes a [`Money`] as `{"value", "currency_code"}`.
///
/// Used with `#[serde(serialize_with = "...")]` on fields whose upstream
/// representation puts the value first.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize_value_first<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut state = serializer.serialize_struct("Money", 2)?;
    state.serialize_field("value", &money.to_value_string())?;
    state.serialize_field("currency_code", &money.currency_code)?;
    state.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    #[test]
    fn test_currency_code_validation() {
        assert!(CurrencyCode::new("USD").is_ok());
        assert!(CurrencyCode::new("usd").is_err());
        assert!(CurrencyCode::new("US").is_err());
        assert!(CurrencyCode::new("USDX").is_err());
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(usd().minor_units(), 2);
        assert_eq!(CurrencyCode::new("JPY").unwrap().minor_units(), 0);
    }

    #[test]
    fn test_parse_pads_to_minor_unit_precision() {
        assert_eq!(Money::parse("5", &usd()).unwrap().to_value_string(), "5.00");
        assert_eq!(Money::parse("5.5", &usd()).unwrap().to_value_string(), "5.50");
        assert_eq!(Money::parse("0.00", &usd()).unwrap().to_value_string(), "0.00");
        let jpy = CurrencyCode::new("JPY").unwrap();
        assert_eq!(Money::parse("500", &jpy).unwrap().to_value_string(), "500");
    }

    #[test]
    fn test_parse_rejects_excess_precision_and_garbage() {
        assert!(matches!(
            Money::parse("20.001", &usd()),
            Err(MoneyError::InvalidAmount { .. })
        ));
        assert!(Money::parse("", &usd()).is_err());
        assert!(Money::parse("abc", &usd()).is_err());
        assert!(Money::parse("1e3", &usd()).is_err());
        assert!(Money::parse("+1.00", &usd()).is_err());
        assert!(Money::parse("1.5", &CurrencyCode::new("JPY").unwrap()).is_err());
    }

    #[test]
    fn test_arithmetic_is_exact() {
        let a = Money::parse("0.10", &usd()).unwrap();
        let b = Money::parse("0.20", &usd()).unwrap();
        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.amount(), dec!(0.30));
        assert_eq!(sum.to_value_string(), "0.30");

        let diff = a.checked_sub(&b).unwrap();
        assert_eq!(diff.to_value_string(), "-0.10");
        assert!(diff.is_negative());
    }

    #[test]
    fn test_values_too_large_for_minor_units_overflow() {
        let half = Money::parse("500000000000000000000000000.00", &usd()).unwrap();
        assert_eq!(half.checked_add(&half), Err(MoneyError::Overflow));

        let negative_half = Money::parse("-500000000000000000000000000.00", &usd()).unwrap();
        assert_eq!(negative_half.checked_sub(&half), Err(MoneyError::Overflow));

        assert_eq!(
            Money::parse("9999999999999999999999999999", &usd()),
            Err(MoneyError::Overflow)
        );

        let jpy = CurrencyCode::new("JPY").unwrap();
        let big_yen = Money::parse("9999999999999999999999999999", &jpy).unwrap();
        assert_eq!(big_yen.to_value_string(), "9999999999999999999999999999");
    }

    #[test]
    fn test_currency_mismatch_is_an_error() {
        let dollars = Money::parse("1.00", &usd()).unwrap();
        let euros = Money::parse("1.00", &CurrencyCode::new("EUR").unwrap()).unwrap();

        let err = dollars.checked_add(&euros).unwrap_err();
        assert!(matches!(err, MoneyError::CurrencyMismatch { .. }));
        assert_eq!(err.to_string(), "Currency mismatch: expected USD, got EUR");
    }

    #[test]
    fn test_serialization_field_orders() {
        let money = Money::parse("20.00", &usd()).unwrap();
        assert_eq!(
            serde_json::to_string(&money).unwrap(),
            r#"{"currency_code":"USD","value":"20.00"}"#
        );

        let mut out = Vec::new();
        serialize_value_first(&money, &mut serde_json::Serializer::new(&mut out)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"{"value":"20.00","currency_code":"USD"}"#
        );
    }

    #[test]
    fn test_deserialization_rejects_numeric_values() {
        let money: Money =
            serde_json::from_str(r#"{"value":"1.00","currency_code":"USD"}"#).unwrap();
        assert_eq!(money.to_value_string(), "1.00");

        assert!(serde_json::from_str::<Money>(r#"{"value":1.0,"currency_code":"USD"}"#).is_err());
    }
}
