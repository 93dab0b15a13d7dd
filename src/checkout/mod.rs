//! Checkout session access.
//!
//! - [`CheckoutApi`]: the operations a shipping-address change needs
//! - [`CheckoutClient`]: the GraphQL implementation
//! - [`CheckoutSession`]: session details, including offered shipping methods

mod client;
mod session;

pub use client::{CheckoutApi, CheckoutClient, GET_CHECKOUT_DETAILS_QUERY, UPDATE_SHIPPING_MUTATION};
pub use session::{Cart, CartAmounts, CartTotal, CheckoutSession, Payee, PayeeEmail};
