//! Types stored in the shopper's session.

pub mod session;

pub use session::{Notice, NoticeLevel, keys as session_keys};
