//! # Store State
//!
//! Wraps [`Storage`] for use in commands.
//!
//! ## Thread Safety
//! `Storage` holds a `SqlitePool`, which is already shareable across tasks;
//! no extra locking is needed here.

use artvault_store::{LocalStorageRepository, MarketplaceStore, Storage};

/// Wrapper around `Storage` handed to commands.
#[derive(Debug, Clone)]
pub struct StoreState {
    storage: Storage,
}

impl StoreState {
    pub fn new(storage: Storage) -> Self {
        StoreState { storage }
    }

    /// Returns a reference to the inner Storage.
    pub fn inner(&self) -> &Storage {
        &self.storage
    }

    /// Typed access to listings, cart and account.
    pub fn marketplace(&self) -> MarketplaceStore {
        self.storage.marketplace()
    }

    /// Raw key/value access.
    pub fn local_storage(&self) -> LocalStorageRepository {
        self.storage.local_storage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artvault_store::{StorageConfig, KEY_CART};

    #[tokio::test]
    async fn test_marketplace_writes_through_local_storage() {
        let store = StoreState::new(Storage::new(StorageConfig::in_memory()).await.unwrap());

        store.marketplace().save_cart(&[]).await.unwrap();

        let raw = store.local_storage().get_item(KEY_CART).await.unwrap();
        assert_eq!(raw.as_deref(), Some("[]"));
        assert!(store.inner().health_check().await);
    }
}
