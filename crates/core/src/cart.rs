//! Shopping cart.
//!
//! The cart is an ordered list of line items persisted as a JSON array in
//! the [`keys::CART`] slot. A product name identifies its line: adding a
//! name that is already present bumps that line's quantity instead of
//! appending a second line.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{Storage, keys};
use crate::types::Price;

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No line exists at the given position.
    #[error("no cart line at position {index}")]
    LineNotFound {
        /// Requested position.
        index: usize,
    },

    /// The cart could not be encoded for storage.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One product in the cart plus the quantity chosen by the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name; doubles as the line's identity.
    pub name: String,
    /// Unit price copied from the catalog when the line was created.
    pub price: Price,
    /// Always at least 1 while the line exists.
    pub quantity: u32,
}

impl LineItem {
    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// An ordered sequence of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |sum, item| sum.saturating_add(item.quantity))
    }

    /// Sum of `price * quantity` across all lines, rounded to cents.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items
            .iter()
            .map(LineItem::line_total)
            .sum::<Price>()
            .rounded()
    }

    /// Add one unit of `name`, merging with an existing line of the same name.
    ///
    /// The price of an existing line is left as it was. Returns the line's
    /// new quantity.
    pub fn add(&mut self, name: &str, price: Price) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|item| item.name == name) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        self.items.push(LineItem {
            name: name.to_owned(),
            price,
            quantity: 1,
        });
        1
    }

    /// Remove the line at `index`. Out-of-range positions remove nothing.
    pub fn remove(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Overwrite the quantity at `index`; zero or negative removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if a positive quantity targets a
    /// position with no line.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove(index);
            return Ok(());
        }

        let item = self
            .items
            .get_mut(index)
            .ok_or(CartError::LineNotFound { index })?;
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        Ok(())
    }
}

/// Reads and writes the cart slot of a shopper's [`Storage`].
///
/// Each mutation is a complete read-modify-write: load the stored cart,
/// change it, write it back.
pub struct CartStore<'a, S: Storage + ?Sized> {
    storage: &'a mut S,
}

impl<'a, S: Storage + ?Sized> CartStore<'a, S> {
    /// Wrap a shopper's storage.
    pub const fn new(storage: &'a mut S) -> Self {
        Self { storage }
    }

    /// Load the stored cart.
    ///
    /// A missing slot is an empty cart. So is a slot that fails to decode;
    /// that case is logged and otherwise ignored.
    #[must_use]
    pub fn get(&self) -> Cart {
        read_cart(&*self.storage)
    }

    /// Replace the stored cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Encode`] if the cart cannot be serialized.
    pub fn save(&mut self, cart: &Cart) -> Result<(), CartError> {
        let encoded = serde_json::to_string(cart)?;
        self.storage.set_item(keys::CART, encoded);
        Ok(())
    }

    /// Add one unit of a product and persist. Returns the updated cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Encode`] if the cart cannot be serialized.
    pub fn add(&mut self, name: &str, price: Price) -> Result<Cart, CartError> {
        let mut cart = self.get();
        let quantity = cart.add(name, price);
        tracing::debug!(name, quantity, "Cart line added");
        self.save(&cart)?;
        Ok(cart)
    }

    /// Remove the line at `index` and persist.
    ///
    /// Returns the removed line, or `None` (and writes nothing) when no line
    /// sits at that position.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Encode`] if the cart cannot be serialized.
    pub fn remove(&mut self, index: usize) -> Result<Option<LineItem>, CartError> {
        let mut cart = self.get();
        let removed = cart.remove(index);
        if removed.is_some() {
            self.save(&cart)?;
        }
        Ok(removed)
    }

    /// Set the quantity at `index` and persist. Zero or below removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] for a positive quantity at an empty
    /// position, or [`CartError::Encode`] if the cart cannot be serialized.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Result<Cart, CartError> {
        if quantity <= 0 {
            self.remove(index)?;
            return Ok(self.get());
        }

        let mut cart = self.get();
        cart.set_quantity(index, quantity)?;
        self.save(&cart)?;
        Ok(cart)
    }

    /// Total number of units in the stored cart.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.get().item_count()
    }

    /// Erase the stored cart entirely.
    pub fn clear(&mut self) {
        self.storage.remove_item(keys::CART);
    }
}

/// Decode the cart slot of read-only storage.
///
/// Same degradation rules as [`CartStore::get`].
#[must_use]
pub fn read_cart<S: Storage + ?Sized>(storage: &S) -> Cart {
    let Some(raw) = storage.get_item(keys::CART) else {
        return Cart::default();
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Stored cart is unreadable, treating it as empty");
        Cart::default()
    })
}
