//! Demo Shop Core - cart, catalog and checkout logic.
//!
//! This crate holds everything the storefront pages share:
//! - [`storage`] - the shopper's key-value slot map and its well-known keys
//! - [`cart`] - line items, the cart, and the `CartStore` that persists it
//! - [`catalog`] - the fixed product list and substring search
//! - [`checkout`] - billing details, order ids, and simulated order placement
//! - [`account`] - the demo login flag and remembered email
//! - [`types`] - `Price` and `Email` newtypes
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no HTTP, no sessions.
//! Every operation takes the shopper's [`Storage`] explicitly, so the
//! storefront decides where the slots live and when they are committed.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod storage;
pub mod types;

pub use account::{DemoCredentials, LoginError};
pub use cart::{Cart, CartError, CartStore, LineItem};
pub use catalog::{Catalog, Category, Product, SearchMessage, SearchResults};
pub use checkout::{BillingDetails, CheckoutError, LastOrder, OrderId, PlacedOrder};
pub use storage::{MemoryStorage, Storage};
pub use types::*;
