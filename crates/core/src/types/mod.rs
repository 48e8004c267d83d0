//! Value types shared by the storefront.

pub mod email;
pub mod price;

pub use email::{Email, EmailError};
pub use price::Price;
