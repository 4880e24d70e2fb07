//! # Session State
//!
//! The in-memory copy of the three persisted collections.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` so commands can share it. Each
//! command takes the lock, replaces whole collections through the pure core
//! functions, and releases the lock before any storage `await`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Command              Core call                   Session change        │
//! │  ───────              ─────────                   ──────────────        │
//! │  upload ────────────► ListingDraft::into_listing ► listings = [new, ..] │
//! │  cart add ──────────► add_or_increment ─────────► cart = ...           │
//! │  cart set ──────────► set_quantity ─────────────► cart = ...           │
//! │  cart remove ───────► remove_line ──────────────► cart = ...           │
//! │  checkout ──────────► settle_checkout ──────────► listings, cart = []  │
//! │  login / register ──► Account::sign_in/register ► account = Some(..)   │
//! │  logout ────────────► (none) ───────────────────► account, cart clear  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use artvault_core::catalog::{merge_with_samples, sample_listings};
use artvault_core::{Account, CartLine, CoreError, Listing};
use tracing::info;

use crate::error::ApiError;
use crate::state::StoreState;

/// Everything the marketplace remembers between commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Catalog, newest uploads first, samples after saved listings.
    pub listings: Vec<Listing>,
    pub cart: Vec<CartLine>,
    pub account: Option<Account>,
}

impl Session {
    /// Returns the signed-in account or a `NotSignedIn` error for `action`.
    pub fn require_account(&self, action: &str) -> Result<&Account, CoreError> {
        self.account
            .as_ref()
            .ok_or_else(|| CoreError::not_signed_in(action))
    }

    /// Looks up a listing by id.
    pub fn find_listing(&self, listing_id: &str) -> Result<&Listing, CoreError> {
        self.listings
            .iter()
            .find(|l| l.id == listing_id)
            .ok_or_else(|| CoreError::ListingNotFound(listing_id.to_string()))
    }
}

/// Thread-safe session wrapper.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    /// Wraps an already-loaded session.
    pub fn new(session: Session) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Loads the session from storage.
    ///
    /// ## Startup Merge
    /// Saved listings come first, then every built-in sample that is not
    /// already saved. The merged catalog is written back when it grew.
    pub async fn load(store: &StoreState) -> Result<Self, ApiError> {
        let marketplace = store.marketplace();

        let saved = marketplace.load_listings().await?;
        let saved_count = saved.len();
        let listings = merge_with_samples(saved, sample_listings());

        if listings.len() != saved_count {
            marketplace.save_listings(&listings).await?;
        }

        let cart = marketplace.load_cart().await?;
        let account = marketplace.load_account().await?;

        info!(
            listings = listings.len(),
            cart_lines = cart.len(),
            signed_in = account.is_some(),
            "Session loaded"
        );

        Ok(SessionState::new(Session {
            listings,
            cart,
            account,
        }))
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let cart = session.with_session_mut(|s| {
    ///     s.cart = remove_line(&s.cart, &id);
    ///     s.cart.clone()
    /// });
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    /// Clones the current session.
    pub fn snapshot(&self) -> Session {
        self.with_session(Session::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artvault_store::{Storage, StorageConfig};
    use chrono::Utc;

    async fn store() -> StoreState {
        StoreState::new(Storage::new(StorageConfig::in_memory()).await.unwrap())
    }

    #[tokio::test]
    async fn test_first_load_seeds_samples() {
        let store = store().await;
        let session = SessionState::load(&store).await.unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.listings.len(), 6);
        assert!(snapshot.cart.is_empty());
        assert!(snapshot.account.is_none());

        assert_eq!(store.marketplace().load_listings().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_load_keeps_saved_listings_first() {
        let store = store().await;
        let mut mine = sample_listings()[0].clone();
        mine.id = "mine".to_string();
        let mut sold_sample = sample_listings()[5].clone();
        sold_sample.sold = true;
        store
            .marketplace()
            .save_listings(&[mine, sold_sample])
            .await
            .unwrap();

        let listings = SessionState::load(&store).await.unwrap().snapshot().listings;
        assert_eq!(listings.len(), 7);
        assert_eq!(listings[0].id, "mine");
        assert!(listings[1].sold);
    }

    #[test]
    fn test_require_account() {
        let mut session = Session::default();
        let err = session.require_account("view your profile").unwrap_err();
        assert_eq!(err.to_string(), "Please login to view your profile");

        session.account = Some(Account::sign_in("a".into(), "a@b.co", Utc::now()));
        assert!(session.require_account("view your profile").is_ok());
    }

    #[test]
    fn test_find_listing() {
        let session = Session {
            listings: sample_listings(),
            ..Session::default()
        };
        let id = session.listings[2].id.clone();
        assert_eq!(session.find_listing(&id).unwrap().title, "Serenity");
        assert!(matches!(
            session.find_listing("missing"),
            Err(CoreError::ListingNotFound(_))
        ));
    }
}
