//! # Marketplace Store
//!
//! Typed load/save of the three records the marketplace persists.
//!
//! ## Keys
//! ```text
//! ┌──────────────┬──────────────────┬─────────────────────────────────────┐
//! │ Key          │ Rust type        │ Written after                       │
//! ├──────────────┼──────────────────┼─────────────────────────────────────┤
//! │ artworks     │ Vec<Listing>     │ upload, checkout (with cartItems)   │
//! │ cartItems    │ Vec<CartLine>    │ every cart edit, checkout, logout   │
//! │ currentUser  │ Account          │ login, register (removed at logout) │
//! └──────────────┴──────────────────┴─────────────────────────────────────┘
//! ```
//!
//! A missing key loads as an empty list (or `None` for the account). A
//! present but malformed value is an error rather than silently empty.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use artvault_core::{Account, CartLine, Listing};

use crate::error::{StoreError, StoreResult};
use crate::repository::local_storage::LocalStorageRepository;

/// Storage key for the listing catalog.
pub const KEY_LISTINGS: &str = "artworks";

/// Storage key for the shopping cart.
pub const KEY_CART: &str = "cartItems";

/// Storage key for the signed-in account.
pub const KEY_ACCOUNT: &str = "currentUser";

/// Typed wrapper over [`LocalStorageRepository`].
#[derive(Debug, Clone)]
pub struct MarketplaceStore {
    storage: LocalStorageRepository,
}

impl MarketplaceStore {
    pub fn new(storage: LocalStorageRepository) -> Self {
        MarketplaceStore { storage }
    }

    // =========================================================================
    // Listings
    // =========================================================================

    pub async fn load_listings(&self) -> StoreResult<Vec<Listing>> {
        Ok(self.load_json(KEY_LISTINGS).await?.unwrap_or_default())
    }

    pub async fn save_listings(&self, listings: &[Listing]) -> StoreResult<()> {
        self.save_json(KEY_LISTINGS, &listings).await
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub async fn load_cart(&self) -> StoreResult<Vec<CartLine>> {
        Ok(self.load_json(KEY_CART).await?.unwrap_or_default())
    }

    pub async fn save_cart(&self, cart: &[CartLine]) -> StoreResult<()> {
        self.save_json(KEY_CART, &cart).await
    }

    pub async fn remove_cart(&self) -> StoreResult<()> {
        self.storage.remove_item(KEY_CART).await
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Writes the settled catalog and the remaining cart together.
    ///
    /// Both keys change in one transaction, so a failed write never leaves
    /// listings sold on disk next to the cart that bought them.
    pub async fn save_checkout(&self, listings: &[Listing], cart: &[CartLine]) -> StoreResult<()> {
        let listings_raw =
            serde_json::to_string(listings).map_err(|e| StoreError::serialization(KEY_LISTINGS, e))?;
        let cart_raw =
            serde_json::to_string(cart).map_err(|e| StoreError::serialization(KEY_CART, e))?;

        debug!(listings = listings.len(), cart_lines = cart.len(), "Saving checkout");
        self.storage
            .set_items(&[
                (KEY_LISTINGS, listings_raw.as_str()),
                (KEY_CART, cart_raw.as_str()),
            ])
            .await
    }

    // =========================================================================
    // Account
    // =========================================================================

    pub async fn load_account(&self) -> StoreResult<Option<Account>> {
        self.load_json(KEY_ACCOUNT).await
    }

    pub async fn save_account(&self, account: &Account) -> StoreResult<()> {
        self.save_json(KEY_ACCOUNT, account).await
    }

    pub async fn remove_account(&self) -> StoreResult<()> {
        self.storage.remove_item(KEY_ACCOUNT).await
    }

    // =========================================================================
    // JSON helpers
    // =========================================================================

    async fn load_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.storage.get_item(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::serialization(key, e)),
            None => Ok(None),
        }
    }

    async fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::serialization(key, e))?;
        debug!(key = %key, "Saving record");
        self.storage.set_item(key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Storage, StorageConfig};
    use artvault_core::cart::add_or_increment;
    use artvault_core::catalog::sample_listings;
    use chrono::Utc;

    async fn store() -> (Storage, MarketplaceStore) {
        let storage = Storage::new(StorageConfig::in_memory()).await.unwrap();
        let store = storage.marketplace();
        (storage, store)
    }

    #[tokio::test]
    async fn test_missing_keys_load_empty() {
        let (_storage, store) = store().await;
        assert!(store.load_listings().await.unwrap().is_empty());
        assert!(store.load_cart().await.unwrap().is_empty());
        assert!(store.load_account().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_round_trip_all_three_keys() {
        let (storage, store) = store().await;

        let mut listings = sample_listings();
        listings[3].sold = true;
        let cart = add_or_increment(&add_or_increment(&[], &listings[0]), &listings[0]);
        let account = artvault_core::Account::sign_in("acct-1".into(), "lisa@example.com", Utc::now());

        store.save_listings(&listings).await.unwrap();
        store.save_cart(&cart).await.unwrap();
        store.save_account(&account).await.unwrap();

        assert_eq!(store.load_listings().await.unwrap(), listings);
        assert_eq!(store.load_cart().await.unwrap(), cart);
        assert_eq!(store.load_account().await.unwrap(), Some(account));

        let keys = storage.local_storage().keys().await.unwrap();
        assert_eq!(keys, vec![KEY_LISTINGS, KEY_CART, KEY_ACCOUNT]);
    }

    #[tokio::test]
    async fn test_remove_account_and_cart() {
        let (_storage, store) = store().await;
        let listings = sample_listings();
        store.save_cart(&add_or_increment(&[], &listings[1])).await.unwrap();
        store
            .save_account(&artvault_core::Account::sign_in("a".into(), "a@b.co", Utc::now()))
            .await
            .unwrap();

        store.remove_account().await.unwrap();
        store.remove_cart().await.unwrap();

        assert!(store.load_account().await.unwrap().is_none());
        assert!(store.load_cart().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_checkout_writes_catalog_and_cart() {
        let (_storage, store) = store().await;
        let mut listings = sample_listings();
        store
            .save_cart(&add_or_increment(&[], &listings[0]))
            .await
            .unwrap();

        listings[0].sold = true;
        let remaining = add_or_increment(&[], &listings[2]);
        store.save_checkout(&listings, &remaining).await.unwrap();

        assert_eq!(store.load_listings().await.unwrap(), listings);
        assert_eq!(store.load_cart().await.unwrap(), remaining);
    }

    #[tokio::test]
    async fn test_malformed_value_is_an_error() {
        let (storage, store) = store().await;
        storage
            .local_storage()
            .set_item(KEY_LISTINGS, "{not json")
            .await
            .unwrap();

        let err = store.load_listings().await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization { ref key, .. } if key == KEY_LISTINGS));
    }

    #[tokio::test]
    async fn test_stored_json_uses_camel_case_keys() {
        let (storage, store) = store().await;
        store.save_listings(&sample_listings()[..1]).await.unwrap();

        let raw = storage.local_storage().get_item(KEY_LISTINGS).await.unwrap().unwrap();
        assert!(raw.contains("\"artistName\":\"Sarah Johnson\""));
        assert!(raw.contains("\"uploadedAt\""));
    }
}
