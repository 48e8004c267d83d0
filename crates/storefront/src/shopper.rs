//! Per-shopper storage backed by the session.
//!
//! A [`Shopper`] is loaded once per request: the whole slot map is read from
//! the session, handlers mutate it synchronously through the core crate, and
//! [`Shopper::commit`] writes it back if anything changed. Two overlapping
//! requests from the same browser can lose an update; the last commit wins.

use axum::{extract::FromRequestParts, http::request::Parts};
use demo_shop_core::{CartStore, MemoryStorage, Storage, account, cart::read_cart};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::models::{Notice, session_keys};

/// The shopper's storage for the duration of one request.
pub struct Shopper {
    session: Session,
    slots: MemoryStorage,
    dirty: bool,
}

/// Data every page layout needs: the cart badge, login state, and a notice.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub cart_count: u32,
    pub logged_in: bool,
    pub notice: Option<Notice>,
}

impl Shopper {
    /// Read the shopper's slots from the session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] if the session store fails.
    pub async fn load(session: Session) -> Result<Self> {
        let slots = session
            .get::<MemoryStorage>(session_keys::SHOPPER_STORAGE)
            .await?
            .unwrap_or_default();

        Ok(Self {
            session,
            slots,
            dirty: false,
        })
    }

    /// Write the slots back to the session if they changed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] if the session store fails.
    pub async fn commit(self) -> Result<()> {
        if self.dirty {
            self.session
                .insert(session_keys::SHOPPER_STORAGE, &self.slots)
                .await?;
        }
        Ok(())
    }

    /// Cart view over this shopper's storage.
    pub const fn cart(&mut self) -> CartStore<'_, Self> {
        CartStore::new(self)
    }

    /// Queue a notice for the next rendered page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] if the session store fails.
    pub async fn notify(&self, notice: Notice) -> Result<()> {
        self.session.insert(session_keys::NOTICE, notice).await?;
        Ok(())
    }

    /// Build the layout context, consuming any queued notice.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] if the session store fails.
    pub async fn page(&self) -> Result<PageContext> {
        let notice = self.session.remove::<Notice>(session_keys::NOTICE).await?;
        Ok(PageContext {
            cart_count: read_cart(self).item_count(),
            logged_in: account::is_logged_in(self),
            notice,
        })
    }
}

impl Storage for Shopper {
    fn get_item(&self, key: &str) -> Option<String> {
        self.slots.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.dirty = true;
        self.slots.set_item(key, value);
    }

    fn remove_item(&mut self, key: &str) {
        self.dirty = true;
        self.slots.remove_item(key);
    }
}

impl<S> FromRequestParts<S> for Shopper
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Internal("session layer is not installed".to_string()))?;
        Self::load(session).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use demo_shop_core::{Price, storage::keys};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_commit_persists_changes() {
        let session = session();

        let mut shopper = Shopper::load(session.clone()).await.unwrap();
        shopper.cart().add("Mouse", Price::from_cents(4999)).unwrap();
        shopper.commit().await.unwrap();

        let shopper = Shopper::load(session).await.unwrap();
        assert_eq!(read_cart(&shopper).item_count(), 1);
    }

    #[tokio::test]
    async fn test_untouched_shopper_writes_nothing() {
        let session = session();

        let shopper = Shopper::load(session.clone()).await.unwrap();
        assert!(shopper.get_item(keys::CART).is_none());
        shopper.commit().await.unwrap();

        let stored = session
            .get::<MemoryStorage>(session_keys::SHOPPER_STORAGE)
            .await
            .unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_notice_is_shown_once() {
        let session = session();
        let shopper = Shopper::load(session).await.unwrap();

        shopper.notify(Notice::success("MacBook added to cart!")).await.unwrap();

        let first = shopper.page().await.unwrap();
        assert_eq!(
            first.notice.map(|n| n.message).as_deref(),
            Some("MacBook added to cart!")
        );
        assert!(shopper.page().await.unwrap().notice.is_none());
    }

    #[tokio::test]
    async fn test_page_context_reflects_storage() {
        let mut shopper = Shopper::load(session()).await.unwrap();
        shopper.cart().add("Mouse", Price::from_cents(4999)).unwrap();
        shopper.cart().add("Mouse", Price::from_cents(4999)).unwrap();
        shopper.set_item(keys::LOGGED_IN, "true".to_string());

        let page = shopper.page().await.unwrap();
        assert_eq!(page.cart_count, 2);
        assert!(page.logged_in);
    }
}
