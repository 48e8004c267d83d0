//! Simulated order placement.
//!
//! Nothing leaves the shopper's storage: placing an order fabricates an id
//! from the current time, snapshots the billing details, and clears the cart.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartError, CartStore};
use crate::storage::{Storage, keys};
use crate::types::Price;

/// Reasons an order cannot be placed.
///
/// The `Display` text of the first two variants is shown to the shopper as is.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty!")]
    EmptyCart,

    #[error("Please accept the Terms and Conditions to proceed.")]
    TermsNotAccepted,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("failed to encode order details: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The billing form's fields. Empty strings are accepted everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub telephone: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
    pub zone: String,
}

/// Order identifier of the form `ORD-<unix millis>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Prefix every generated id starts with.
    pub const PREFIX: &'static str = "ORD-";

    /// Fabricate an id from a point in time.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use demo_shop_core::OrderId;
    ///
    /// let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    /// assert_eq!(OrderId::at(at).as_str(), "ORD-1700000000123");
    /// ```
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(format!("{}{}", Self::PREFIX, now.timestamp_millis()))
    }

    /// Wrap an id received from elsewhere (a query parameter, storage).
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A successfully placed order.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub details: BillingDetails,
    /// Units that were in the cart.
    pub item_count: u32,
    /// Cart total at the moment of placement.
    pub total: Price,
}

/// The most recent order as remembered in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastOrder {
    pub order_id: OrderId,
    /// `None` if the snapshot is missing or unreadable.
    pub details: Option<BillingDetails>,
}

/// Entry gate for the checkout page: the cart must not be empty.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when there is nothing to check out.
pub fn require_items<S: Storage + ?Sized>(storage: &S) -> Result<Cart, CheckoutError> {
    let cart = crate::cart::read_cart(storage);
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    Ok(cart)
}

/// Place an order.
///
/// Checks, in order: the cart is not empty, the terms box was ticked. On
/// success the order id and billing snapshot are written to storage and the
/// cart slot is erased. On failure storage is untouched.
///
/// # Errors
///
/// [`CheckoutError::EmptyCart`] or [`CheckoutError::TermsNotAccepted`] for
/// shopper mistakes; [`CheckoutError::Encode`] if the snapshot cannot be
/// serialized.
pub fn place_order<S: Storage + ?Sized>(
    storage: &mut S,
    details: BillingDetails,
    terms_accepted: bool,
    now: DateTime<Utc>,
) -> Result<PlacedOrder, CheckoutError> {
    let cart = require_items(storage)?;
    if !terms_accepted {
        return Err(CheckoutError::TermsNotAccepted);
    }

    let order_id = OrderId::at(now);
    let snapshot = serde_json::to_string(&details)?;

    storage.set_item(keys::LAST_ORDER_ID, order_id.as_str().to_owned());
    storage.set_item(keys::LAST_ORDER_DATA, snapshot);
    CartStore::new(storage).clear();

    tracing::info!(
        order_id = %order_id,
        item_count = cart.item_count(),
        total = %cart.total(),
        "Order placed"
    );

    Ok(PlacedOrder {
        order_id,
        details,
        item_count: cart.item_count(),
        total: cart.total(),
    })
}

/// Read back the most recent order, if any.
#[must_use]
pub fn last_order<S: Storage + ?Sized>(storage: &S) -> Option<LastOrder> {
    let order_id = OrderId::from_raw(storage.get_item(keys::LAST_ORDER_ID)?);
    let details = storage
        .get_item(keys::LAST_ORDER_DATA)
        .and_then(|raw| serde_json::from_str(&raw).ok());

    Some(LastOrder { order_id, details })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::storage::MemoryStorage;

    fn details() -> BillingDetails {
        BillingDetails {
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            telephone: "1234567890".to_string(),
            address: "123 Test Street".to_string(),
            city: "Test City".to_string(),
            postcode: "12345".to_string(),
            country: "United States".to_string(),
            zone: "California".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_735_689_600_000).unwrap()
    }

    fn storage_with_cart() -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        let mut cart = CartStore::new(&mut storage);
        cart.add("MacBook", Price::from_cents(129_999)).unwrap();
        cart.add("MacBook", Price::from_cents(129_999)).unwrap();
        storage
    }

    #[test]
    fn test_place_order_clears_cart_and_records_order() {
        let mut storage = storage_with_cart();

        let order = place_order(&mut storage, details(), true, now()).unwrap();

        assert_eq!(order.order_id.as_str(), "ORD-1735689600000");
        assert!(order.order_id.as_str().starts_with(OrderId::PREFIX));
        assert_eq!(order.item_count, 2);
        assert_eq!(order.total, Price::from_cents(259_998));

        assert!(storage.get_item(keys::CART).is_none());
        let last = last_order(&storage).unwrap();
        assert_eq!(last.order_id, order.order_id);
        assert_eq!(last.details, Some(details()));
    }

    #[test]
    fn test_place_order_requires_terms() {
        let mut storage = storage_with_cart();
        let before = storage.clone();

        let err = place_order(&mut storage, details(), false, now()).unwrap_err();

        assert!(matches!(err, CheckoutError::TermsNotAccepted));
        assert_eq!(storage, before);
    }

    #[test]
    fn test_place_order_with_empty_cart() {
        let mut storage = MemoryStorage::new();

        let err = place_order(&mut storage, details(), true, now()).unwrap_err();

        assert!(matches!(err, CheckoutError::EmptyCart));
        assert_eq!(err.to_string(), "Your cart is empty!");
        assert!(last_order(&storage).is_none());
    }

    #[test]
    fn test_empty_fields_are_accepted() {
        let mut storage = storage_with_cart();

        let order = place_order(&mut storage, BillingDetails::default(), true, now()).unwrap();

        assert_eq!(order.details, BillingDetails::default());
    }

    #[test]
    fn test_require_items() {
        assert!(matches!(
            require_items(&MemoryStorage::new()),
            Err(CheckoutError::EmptyCart)
        ));
        assert_eq!(require_items(&storage_with_cart()).unwrap().item_count(), 2);
    }

    #[test]
    fn test_last_order_tolerates_bad_snapshot() {
        let mut storage = MemoryStorage::new();
        storage.set_item(keys::LAST_ORDER_ID, "ORD-1".to_string());
        storage.set_item(keys::LAST_ORDER_DATA, "oops".to_string());

        let last = last_order(&storage).unwrap();
        assert_eq!(last.order_id.as_str(), "ORD-1");
        assert!(last.details.is_none());
    }
}
