//! # Marketplace Commands
//!
//! Every user action the marketplace supports.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── gallery.rs  ◄─── Browse/filter, artist view
//! ├── upload.rs   ◄─── New listings
//! ├── account.rs  ◄─── Register, login, logout
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── checkout.rs ◄─── Simulated payment + settlement
//! ├── profile.rs  ◄─── Artist profile and stats
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  1. Read the session (short lock)                                       │
//! │  2. Validate input, call a pure artvault-core function                  │
//! │  3. Replace the changed collection in the session                       │
//! │  4. Save that collection to local storage (lock released)               │
//! │  5. Raise a notification                                                │
//! │  6. Return a serializable response or ApiError                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the session
//! fn list_gallery(session: &SessionState, ...)
//!
//! // Needs storage, the session and a notifier
//! async fn add_to_cart(store: &StoreState, session: &SessionState, notifier: &dyn Notifier, ...)
//! ```

pub mod account;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod gallery;
pub mod profile;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing {
    use artvault_core::Account;
    use artvault_store::{Storage, StorageConfig};
    use chrono::Utc;

    use crate::notify::RecordingNotifier;
    use crate::state::{ConfigState, SessionState, StoreState};

    /// Fresh in-memory marketplace with the sample catalog loaded.
    pub struct Fixture {
        pub store: StoreState,
        pub session: SessionState,
        pub config: ConfigState,
        pub notifier: RecordingNotifier,
    }

    impl Fixture {
        pub async fn new() -> Self {
            let store = StoreState::new(Storage::new(StorageConfig::in_memory()).await.unwrap());
            let session = SessionState::load(&store).await.unwrap();
            Fixture {
                store,
                session,
                config: ConfigState {
                    payment_delay_ms: 0,
                    ..ConfigState::default()
                },
                notifier: RecordingNotifier::new(),
            }
        }

        /// Same as `new`, with an account already signed in.
        pub async fn signed_in() -> Self {
            let fixture = Self::new().await;
            let account = Account::sign_in("buyer-1".to_string(), "buyer@example.com", Utc::now());
            fixture
                .store
                .marketplace()
                .save_account(&account)
                .await
                .unwrap();
            fixture.session.with_session_mut(|s| s.account = Some(account));
            fixture
        }

        /// Id of the first unsold listing in the catalog.
        pub fn first_listing_id(&self) -> String {
            self.session.with_session(|s| s.listings[0].id.clone())
        }
    }
}
