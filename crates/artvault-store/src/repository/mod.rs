//! # Repository Module
//!
//! Storage repositories for ArtVault.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Page controller                                                       │
//! │       │  storage.marketplace().load_cart()                             │
//! │       ▼                                                                 │
//! │  MarketplaceStore        Vec<CartLine> ⇄ JSON text                     │
//! │       │  get_item("cartItems")                                         │
//! │       ▼                                                                 │
//! │  LocalStorageRepository  key ⇄ value rows                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (local_storage table)                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`local_storage::LocalStorageRepository`] - raw key/value access
//! - [`marketplace::MarketplaceStore`] - typed listings, cart and account

pub mod local_storage;
pub mod marketplace;
