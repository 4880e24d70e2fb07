//! # artvault-store: Local Storage for ArtVault
//!
//! This crate persists the marketplace state between runs. It models the
//! browser's `localStorage`: a flat map from string keys to JSON strings,
//! kept in a SQLite table and accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ArtVault Data Flow                               │
//! │                                                                         │
//! │  Page controller (upload, add to cart, checkout, ...)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  artvault-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌──────────────────────┐  ┌────────────┐ │   │
//! │  │   │   Storage     │   │  MarketplaceStore    │  │ Migrations │ │   │
//! │  │   │   (pool.rs)   │   │  artworks            │  │ (embedded) │ │   │
//! │  │   │               │◄──│  cartItems           │  │            │ │   │
//! │  │   │  SqlitePool   │   │  currentUser         │  │ 001_local_ │ │   │
//! │  │   │               │   ├──────────────────────┤  │  storage   │ │   │
//! │  │   │               │◄──│ LocalStorageRepository│ │            │ │   │
//! │  │   └───────────────┘   └──────────────────────┘  └────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: <data dir>/artvault.db, table local_storage           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Raw key/value access and the typed marketplace store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use artvault_store::{Storage, StorageConfig};
//!
//! let storage = Storage::new(StorageConfig::new("artvault.db")).await?;
//! let listings = storage.marketplace().load_listings().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{Storage, StorageConfig};

pub use repository::local_storage::LocalStorageRepository;
pub use repository::marketplace::{MarketplaceStore, KEY_ACCOUNT, KEY_CART, KEY_LISTINGS};
