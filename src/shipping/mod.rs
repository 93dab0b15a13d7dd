//! Shipping-address-change actions.
//!
//! When a shopper changes their shipping address, the merchant callback
//! receives an [`ActionSet`]. It can:
//!
//! - record a new tax total, shipping discount or shipping option list and
//!   [`query`](ActionSet::query) the resulting patch (server-side integration)
//! - [`patch`](ActionSet::patch) to have the server refresh the order
//!   (client-side integration)
//! - [`reject`](ActionSet::reject) the address with a shopper-facing message
//!
//! # Overview
//!
//! - [`AmountBreakdown`]: the purchase unit amount and its recomputation rules
//! - [`ShippingOptionSet`]: offered shipping methods, at most one selected
//! - [`PendingChangeSet`]: last-write-wins accumulator for requested updates
//! - [`PatchEmitter`]: reduces pending updates into ordered patch operations
//! - [`translate`]: maps rejection input to shopper-facing text
//! - [`handle_shipping_address_change`]: runs one event end to end
//!
//! # Example
//!
//! ```rust
//! use checkout_shipping::money::{CurrencyCode, Money};
//! use checkout_shipping::shipping::{
//!     AmountBreakdown, PatchEmitter, PendingChangeSet, ShippingOption, ShippingOptionSet,
//!     ShippingOptionType, AMOUNT_PATH, SHIPPING_OPTIONS_PATH,
//! };
//!
//! let usd = CurrencyCode::new("USD").unwrap();
//! let usd_amount = |value: &str| Money::parse(value, &usd).unwrap();
//!
//! let original = AmountBreakdown::builder(&usd)
//!     .item_total(usd_amount("180.00"))
//!     .shipping(usd_amount("5.00"))
//!     .handling(usd_amount("1.00"))
//!     .tax_total(usd_amount("20.00"))
//!     .discount(usd_amount("10.00"))
//!     .build()
//!     .unwrap();
//!
//! let options = ShippingOptionSet::new(vec![ShippingOption {
//!     id: "SHIP_1234".to_string(),
//!     label: "Free Shipping".to_string(),
//!     kind: ShippingOptionType::Shipping,
//!     selected: true,
//!     amount: usd_amount("0.00"),
//! }])
//! .unwrap();
//!
//! let mut pending = PendingChangeSet::new();
//! pending
//!     .set_shipping_discount(usd_amount("10.00"))
//!     .set_shipping_options(options);
//!
//! let operations = PatchEmitter::emit(&original, &ShippingOptionSet::empty(), &pending).unwrap();
//! assert_eq!(operations[0].path, AMOUNT_PATH);
//! assert_eq!(operations[1].path, SHIPPING_OPTIONS_PATH);
//! ```

mod actions;
mod amount;
mod errors;
mod handler;
mod options;
mod patch;
mod pending;
mod rejection;

pub use actions::{ActionSet, ActionState, Settlement};
pub use amount::{AmountBreakdown, AmountBreakdownBuilder};
pub use errors::ShippingChangeError;
pub use handler::{
    handle_shipping_address_change, CallbackError, OnShippingAddressChange, ShippingAddress,
    ShippingAddressChangeData, ShippingChangeOutcome,
};
pub use options::{ShippingOption, ShippingOptionSet, ShippingOptionType};
pub use patch::{
    PatchEmitter, PatchOp, PatchOperation, PatchValue, AMOUNT_PATH, SHIPPING_OPTIONS_PATH,
};
pub use pending::PendingChangeSet;
pub use rejection::{translate, ShippingErrorCode, GENERIC_ERROR_MESSAGE};
