//! Session-related types.
//!
//! The session holds exactly two things: the shopper's storage slots and a
//! one-shot notice for the next rendered page.

use serde::{Deserialize, Serialize};

/// Session keys.
pub mod keys {
    /// Key for the shopper's storage slot map.
    pub const SHOPPER_STORAGE: &str = "shopper_storage";

    /// Key for the notice shown on the next rendered page.
    pub const NOTICE: &str = "notice";
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Danger,
    Info,
}

/// A message for the shopper, displayed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Danger,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// CSS classes for the alert box, e.g. `alert alert-success`.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.level {
            NoticeLevel::Success => "alert alert-success",
            NoticeLevel::Danger => "alert alert-danger",
            NoticeLevel::Info => "alert alert-info",
        }
    }
}
