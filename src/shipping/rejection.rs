//! Shopper-facing messages for rejected shipping-address changes.
//!
//! Merchants reject an address by passing either a recognized error code
//! (`"ADDRESS_ERROR"`) or the exact message for that code. Anything else,
//! including free-form merchant text, becomes [`GENERIC_ERROR_MESSAGE`] so
//! unvetted strings never reach the shopper.
//!
//! ```rust
//! use checkout_shipping::shipping::{translate, ShippingErrorCode, GENERIC_ERROR_MESSAGE};
//!
//! assert_eq!(translate("ADDRESS_ERROR"), "Your order can't be shipped to this address.");
//! assert_eq!(translate(ShippingErrorCode::ZipError.message()), "Your order can't be shipped to this zip.");
//! assert_eq!(translate("This is crazy!"), GENERIC_ERROR_MESSAGE);
//! ```

use std::fmt;

/// Shown for any rejection input that is not recognized.
pub const GENERIC_ERROR_MESSAGE: &str = "Unable to update address. Please try again.";

/// Recognized reasons for refusing a shipping address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShippingErrorCode {
    /// The order cannot be shipped to the address.
    AddressError,
    /// The order cannot be shipped to the country.
    CountryError,
    /// The order cannot be shipped to the state.
    StateError,
    /// The order cannot be shipped to the postal code.
    ZipError,
}

impl ShippingErrorCode {
    /// Every recognized code, in table order.
    pub const ALL: [Self; 4] = [
        Self::AddressError,
        Self::CountryError,
        Self::StateError,
        Self::ZipError,
    ];

    /// The wire code, e.g. `"ADDRESS_ERROR"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::AddressError => "ADDRESS_ERROR",
            Self::CountryError => "COUNTRY_ERROR",
            Self::StateError => "STATE_ERROR",
            Self::ZipError => "ZIP_ERROR",
        }
    }

    /// The shopper-facing message for this code.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AddressError => "Your order can't be shipped to this address.",
            Self::CountryError => "Your order can't be shipped to this country.",
            Self::StateError => "Your order can't be shipped to this state.",
            Self::ZipError => "Your order can't be shipped to this zip.",
        }
    }

    /// Looks up a code by its wire code or its exact message.
    #[must_use]
    pub fn recognize(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.code() == input || code.message() == input)
    }
}

impl fmt::Display for ShippingErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Maps a rejection input to the message shown to the shopper.
#[must_use]
pub fn translate(input: &str) -> &'static str {
    ShippingErrorCode::recognize(input).map_or_else(
        || {
            tracing::debug!("Unrecognized shipping rejection replaced with the generic message");
            GENERIC_ERROR_MESSAGE
        },
        ShippingErrorCode::message,
    )
}
