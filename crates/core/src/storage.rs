//! The shopper's key-value storage.
//!
//! Every piece of shopper state lives in a flat map of string slots, the same
//! shape a browser's local storage has. Pages never touch the slots directly
//! for cart data; they go through [`crate::cart::CartStore`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Well-known storage keys.
pub mod keys {
    /// JSON array of cart line items.
    pub const CART: &str = "demo_ecommerce_cart";

    /// `"true"` while the shopper is logged in.
    pub const LOGGED_IN: &str = "isLoggedIn";

    /// Email remembered from the last login.
    pub const USER_EMAIL: &str = "userEmail";

    /// Id of the most recently placed order.
    pub const LAST_ORDER_ID: &str = "lastOrderId";

    /// JSON snapshot of the billing details submitted with the last order.
    pub const LAST_ORDER_DATA: &str = "lastOrderData";
}

/// A string key-value slot map.
///
/// Reads and writes are synchronous and infallible. Whoever owns the
/// implementation decides when the slots are persisted.
pub trait Storage {
    /// Read a slot.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a slot, replacing any previous value.
    fn set_item(&mut self, key: &str, value: String);

    /// Erase a slot. Erasing a missing slot is a no-op.
    fn remove_item(&mut self, key: &str);
}

/// In-memory [`Storage`].
///
/// Serializes as a plain JSON object so it can be stashed in a session as a
/// single value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStorage(BTreeMap<String, String>);

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.0.insert(key.to_owned(), value);
    }

    fn remove_item(&mut self, key: &str) {
        self.0.remove(key);
    }
}
