//! The actions handed to a merchant's shipping-address-change callback.
//!
//! An [`ActionSet`] accumulates tax, shipping discount and shipping option
//! updates, then settles exactly once through [`ActionSet::query`],
//! [`ActionSet::patch`] or [`ActionSet::reject`].
//!
//! # Example
//!
//! ```rust,ignore
//! let operations = actions
//!     .update_tax(Money::parse("20.00", &usd)?)?
//!     .update_shipping_options(options)?
//!     .update_shipping_discount(Money::parse("10.00", &usd)?)?
//!     .query()?;
//! ```

use std::fmt;

use crate::checkout::CheckoutApi;
use crate::config::OrderId;
use crate::money::Money;
use crate::shipping::amount::AmountBreakdown;
use crate::shipping::errors::ShippingChangeError;
use crate::shipping::options::ShippingOptionSet;
use crate::shipping::patch::{PatchEmitter, PatchOperation};
use crate::shipping::pending::PendingChangeSet;
use crate::shipping::rejection::translate;

/// Lifecycle of an [`ActionSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionState {
    /// Nothing has been called yet.
    Idle,
    /// At least one update was recorded.
    Accumulating,
    /// `query`, `patch` or `reject` was called; no further calls are accepted.
    Settled,
}

/// How an [`ActionSet`] was settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// `query` computed these operations.
    Queried(Vec<PatchOperation>),
    /// `patch` was acknowledged by the server.
    Patched,
    /// `patch` was sent and declined.
    PatchFailed,
    /// `reject` halted checkout with this shopper-facing message.
    Rejected {
        /// The translated message.
        message: &'static str,
    },
}

/// Chainable actions for one shipping-address-change event.
pub struct ActionSet<'a> {
    api: &'a dyn CheckoutApi,
    order_id: OrderId,
    original: AmountBreakdown,
    options_snapshot: ShippingOptionSet,
    pending: PendingChangeSet,
    state: ActionState,
    settlement: Option<Settlement>,
}

impl<'a> ActionSet<'a> {
    /// Binds a fresh action set to an order's amount and shipping snapshot.
    #[must_use]
    pub fn new(
        api: &'a dyn CheckoutApi,
        order_id: OrderId,
        original: AmountBreakdown,
        options_snapshot: ShippingOptionSet,
    ) -> Self {
        Self {
            api,
            order_id,
            original,
            options_snapshot,
            pending: PendingChangeSet::new(),
            state: ActionState::Idle,
            settlement: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ActionState {
        self.state
    }

    /// The order this event belongs to.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// The amount the order had when the event started.
    #[must_use]
    pub const fn original_amount(&self) -> &AmountBreakdown {
        &self.original
    }

    /// The shipping options the checkout session offered when the event started.
    #[must_use]
    pub const fn options_snapshot(&self) -> &ShippingOptionSet {
        &self.options_snapshot
    }

    /// The updates recorded so far.
    #[must_use]
    pub const fn pending(&self) -> &PendingChangeSet {
        &self.pending
    }

    /// How the set was settled, once it has been.
    #[must_use]
    pub const fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    /// Consumes the set and returns its settlement.
    #[must_use]
    pub fn into_settlement(self) -> Option<Settlement> {
        self.settlement
    }

    /// Records a new tax total for the order.
    ///
    /// # Errors
    ///
    /// - [`ShippingChangeError::AlreadySettled`] after settlement
    /// - [`ShippingChangeError::InvalidInput`] for a negative amount
    /// - [`ShippingChangeError::Money`] for a currency other than the order's
    pub fn update_tax(&mut self, tax: Money) -> Result<&mut Self, ShippingChangeError> {
        self.ensure_open()?;
        self.check_amount("tax", &tax)?;
        self.pending.set_tax(tax);
        self.state = ActionState::Accumulating;
        Ok(self)
    }

    /// Replaces the shipping options offered for the order.
    ///
    /// The list is written upstream exactly as given, and its selected
    /// option determines the shipping charge.
    ///
    /// # Errors
    ///
    /// - [`ShippingChangeError::AlreadySettled`] after settlement
    /// - [`ShippingChangeError::InvalidInput`] for a negative option amount
    /// - [`ShippingChangeError::Money`] for a currency other than the order's
    pub fn update_shipping_options(
        &mut self,
        options: ShippingOptionSet,
    ) -> Result<&mut Self, ShippingChangeError> {
        self.ensure_open()?;
        options.ensure_currency(self.original.currency_code())?;
        if let Some(option) = options.as_slice().iter().find(|o| o.amount.is_negative()) {
            return Err(ShippingChangeError::invalid(
                "options",
                format!("shipping option '{}' has a negative amount", option.id),
            ));
        }
        self.pending.set_shipping_options(options);
        self.state = ActionState::Accumulating;
        Ok(self)
    }

    /// Records a new shipping discount for the order.
    ///
    /// # Errors
    ///
    /// - [`ShippingChangeError::AlreadySettled`] after settlement
    /// - [`ShippingChangeError::InvalidInput`] for a negative amount
    /// - [`ShippingChangeError::Money`] for a currency other than the order's
    pub fn update_shipping_discount(
        &mut self,
        discount: Money,
    ) -> Result<&mut Self, ShippingChangeError> {
        self.ensure_open()?;
        self.check_amount("discount", &discount)?;
        self.pending.set_shipping_discount(discount);
        self.state = ActionState::Accumulating;
        Ok(self)
    }

    /// Computes the patch for the recorded updates without any network I/O.
    ///
    /// Returns an empty list when nothing was updated.
    ///
    /// # Errors
    ///
    /// - [`ShippingChangeError::AlreadySettled`] after settlement
    /// - [`ShippingChangeError::Money`] if the recomputed total overflows
    pub fn query(&mut self) -> Result<Vec<PatchOperation>, ShippingChangeError> {
        self.ensure_open()?;
        let operations = PatchEmitter::emit(&self.original, &self.options_snapshot, &self.pending)?;
        tracing::debug!(
            "Shipping change for order {} settled by query with {} operation(s)",
            self.order_id,
            operations.len()
        );
        self.settle(Settlement::Queried(operations.clone()));
        Ok(operations)
    }

    /// Asks the server to refresh the order's shipping state.
    ///
    /// Sends exactly one update request and ignores any recorded updates;
    /// the server already holds the order state. Each call is a new request.
    ///
    /// # Errors
    ///
    /// - [`ShippingChangeError::AlreadySettled`] after settlement
    /// - [`ShippingChangeError::PatchRejected`] if the server declines the update
    pub async fn patch(&mut self) -> Result<(), ShippingChangeError> {
        self.ensure_open()?;
        match self.api.update_shipping(&self.order_id, &[]).await {
            Ok(()) => {
                tracing::debug!("Shipping change for order {} settled by patch", self.order_id);
                self.settle(Settlement::Patched);
                Ok(())
            }
            Err(source) => {
                tracing::warn!(
                    "Shipping update for order {} was rejected: {}",
                    self.order_id,
                    source
                );
                self.settle(Settlement::PatchFailed);
                Err(ShippingChangeError::PatchRejected {
                    order_id: self.order_id.to_string(),
                    source,
                })
            }
        }
    }

    /// Halts checkout for this address and returns the shopper-facing message.
    ///
    /// Recognized error codes and their messages map to their message; any
    /// other input maps to the generic fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingChangeError::AlreadySettled`] after settlement.
    pub fn reject(&mut self, error: &str) -> Result<&'static str, ShippingChangeError> {
        self.ensure_open()?;
        let message = translate(error);
        tracing::debug!("Shipping change for order {} rejected", self.order_id);
        self.settle(Settlement::Rejected { message });
        Ok(message)
    }

    fn ensure_open(&self) -> Result<(), ShippingChangeError> {
        if self.state == ActionState::Settled {
            return Err(ShippingChangeError::AlreadySettled);
        }
        Ok(())
    }

    fn check_amount(&self, field: &'static str, money: &Money) -> Result<(), ShippingChangeError> {
        self.original.total().ensure_same_currency(money)?;
        if money.is_negative() {
            return Err(ShippingChangeError::invalid(field, "must not be negative"));
        }
        Ok(())
    }

    fn settle(&mut self, settlement: Settlement) {
        self.state = ActionState::Settled;
        self.settlement = Some(settlement);
    }
}

impl fmt::Debug for ActionSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSet")
            .field("order_id", &self.order_id)
            .field("original", &self.original)
            .field("options_snapshot", &self.options_snapshot)
            .field("pending", &self.pending)
            .field("state", &self.state)
            .field("settlement", &self.settlement)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::CheckoutSession;
    use crate::clients::{GraphqlError, HttpError, HttpResponseError};
    use crate::money::{CurrencyCode, MoneyError};
    use crate::shipping::options::{ShippingOption, ShippingOptionType};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingApi {
        updates: Mutex<Vec<usize>>,
        fail: bool,
    }

    #[async_trait]
    impl CheckoutApi for RecordingApi {
        async fn get_checkout_details(
            &self,
            _order_id: &OrderId,
        ) -> Result<CheckoutSession, GraphqlError> {
            Err(GraphqlError::MissingData)
        }

        async fn update_shipping(
            &self,
            _order_id: &OrderId,
            operations: &[PatchOperation],
        ) -> Result<(), GraphqlError> {
            self.updates.lock().unwrap().push(operations.len());
            if self.fail {
                return Err(GraphqlError::Http(HttpError::Response(HttpResponseError {
                    code: 422,
                    message: r#"{"name":"UNPROCESSABLE_ENTITY"}"#.to_string(),
                    debug_id: None,
                })));
            }
            Ok(())
        }
    }

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    fn money(value: &str) -> Money {
        Money::parse(value, &usd()).unwrap()
    }

    fn original() -> AmountBreakdown {
        AmountBreakdown::builder(&usd())
            .item_total(money("180.00"))
            .shipping(money("5.00"))
            .handling(money("1.00"))
            .tax_total(money("20.00"))
            .discount(money("10.00"))
            .build()
            .unwrap()
    }

    fn option(id: &str, selected: bool, value: &str) -> ShippingOption {
        ShippingOption {
            id: id.to_string(),
            label: id.to_string(),
            kind: ShippingOptionType::Shipping,
            selected,
            amount: money(value),
        }
    }

    fn action_set(api: &RecordingApi) -> ActionSet<'_> {
        ActionSet::new(
            api,
            OrderId::new("ORDER-1").unwrap(),
            original(),
            ShippingOptionSet::empty(),
        )
    }

    #[test]
    fn test_state_moves_from_idle_to_accumulating_to_settled() {
        let api = RecordingApi::default();
        let mut actions = action_set(&api);
        assert_eq!(actions.state(), ActionState::Idle);

        actions.update_tax(money("20.00")).unwrap();
        assert_eq!(actions.state(), ActionState::Accumulating);

        actions.query().unwrap();
        assert_eq!(actions.state(), ActionState::Settled);
    }

    #[test]
    fn test_updates_chain_and_query_reflects_last_write() {
        let api = RecordingApi::default();
        let mut actions = action_set(&api);

        let operations = actions
            .update_tax(money("1.00"))
            .unwrap()
            .update_tax(money("2.00"))
            .unwrap()
            .query()
            .unwrap();

        assert_eq!(operations.len(), 1);
        assert_eq!(actions.pending().tax(), Some(&money("2.00")));
        assert_eq!(
            actions.settlement(),
            Some(&Settlement::Queried(operations.clone()))
        );
    }

    #[test]
    fn test_query_without_updates_is_empty_and_sends_nothing() {
        let api = RecordingApi::default();
        let mut actions = action_set(&api);

        assert!(actions.query().unwrap().is_empty());
        assert!(api.updates.lock().unwrap().is_empty());
    }

    #[test]
    fn test_second_query_is_already_settled() {
        let api = RecordingApi::default();
        let mut actions = action_set(&api);

        actions.query().unwrap();
        assert!(matches!(
            actions.query(),
            Err(ShippingChangeError::AlreadySettled)
        ));
        assert!(matches!(
            actions.update_tax(money("1.00")),
            Err(ShippingChangeError::AlreadySettled)
        ));
        assert!(matches!(
            actions.reject("ADDRESS_ERROR"),
            Err(ShippingChangeError::AlreadySettled)
        ));
    }

    #[test]
    fn test_negative_tax_is_invalid_input() {
        let api = RecordingApi::default();
        let mut actions = action_set(&api);

        let error = actions.update_tax(money("-1.00")).unwrap_err();
        assert!(matches!(
            error,
            ShippingChangeError::InvalidInput { field: "tax", .. }
        ));
        assert_eq!(actions.state(), ActionState::Idle);
    }

    #[test]
    fn test_discount_in_other_currency_is_rejected() {
        let api = RecordingApi::default();
        let mut actions = action_set(&api);
        let eur = CurrencyCode::new("EUR").unwrap();

        let error = actions
            .update_shipping_discount(Money::parse("1.00", &eur).unwrap())
            .unwrap_err();
        assert!(matches!(error, ShippingChangeError::Money(_)));
        assert!(actions.pending().is_empty());
    }

    #[test]
    fn test_options_in_other_currency_are_rejected() {
        let api = RecordingApi::default();
        let mut actions = action_set(&api);
        actions.update_tax(money("25.00")).unwrap();
        let before = actions.pending().clone();

        let eur = CurrencyCode::new("EUR").unwrap();
        let options = ShippingOptionSet::new(vec![
            option("SHIP_1", true, "0.00"),
            ShippingOption {
                amount: Money::parse("20.00", &eur).unwrap(),
                ..option("SHIP_2", false, "0.00")
            },
        ])
        .unwrap();

        let error = actions.update_shipping_options(options).unwrap_err();
        assert!(matches!(
            error,
            ShippingChangeError::Money(MoneyError::CurrencyMismatch { ref expected, ref found })
                if expected == &usd() && found == &eur
        ));
        assert_eq!(actions.pending(), &before);
        assert!(actions.pending().options().is_none());
        assert_eq!(actions.state(), ActionState::Accumulating);
    }

    #[test]
    fn test_negative_option_amount_is_rejected() {
        let api = RecordingApi::default();
        let mut actions = action_set(&api);
        let options = ShippingOptionSet::new(vec![option("SHIP_1", true, "-5.00")]).unwrap();

        let error = actions.update_shipping_options(options).unwrap_err();
        assert!(matches!(
            error,
            ShippingChangeError::InvalidInput { field: "options", .. }
        ));
    }

    #[test]
    fn test_reject_translates_and_settles() {
        let api = RecordingApi::default();
        let mut actions = action_set(&api);

        let message = actions.reject("This is crazy!").unwrap();
        assert_eq!(message, "Unable to update address. Please try again.");
        assert_eq!(
            actions.into_settlement(),
            Some(Settlement::Rejected { message })
        );
    }

    #[tokio::test]
    async fn test_patch_sends_one_request_and_ignores_pending() {
        let api = RecordingApi::default();
        let mut actions = action_set(&api);
        actions.update_tax(money("3.00")).unwrap();

        actions.patch().await.unwrap();

        assert_eq!(*api.updates.lock().unwrap(), vec![0]);
        assert_eq!(actions.settlement(), Some(&Settlement::Patched));
    }

    #[test]
    fn test_failed_patch_is_patch_rejected_and_settles() {
        let api = RecordingApi {
            fail: true,
            ..RecordingApi::default()
        };
        let mut actions = action_set(&api);

        let error = tokio_test::block_on(actions.patch()).unwrap_err();
        assert!(matches!(
            error,
            ShippingChangeError::PatchRejected { ref order_id, .. } if order_id == "ORDER-1"
        ));
        assert_eq!(actions.settlement(), Some(&Settlement::PatchFailed));
        assert!(matches!(
            tokio_test::block_on(actions.patch()),
            Err(ShippingChangeError::AlreadySettled)
        ));
        assert_eq!(api.updates.lock().unwrap().len(), 1);
    }
}
