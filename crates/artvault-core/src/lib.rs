//! # artvault-core: Pure Marketplace Logic for ArtVault
//!
//! This crate is the **heart** of ArtVault. It contains the catalog filter,
//! the cart aggregator and the checkout settlement as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ArtVault Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (browser / CLI)                    │   │
//! │  │    Gallery ──► Upload ──► Cart ──► Payment ──► Profile          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Page Controller (apps/artvault)                 │   │
//! │  │    load ─► call core ─► save ─► notify                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ artvault-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │   money   │  │ validation│  │   │
//! │  │   │  filter   │  │ add/remove│  │  Money    │  │   rules   │  │   │
//! │  │   │  samples  │  │  totals   │  │  TaxRate  │  │  parsing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO TIMERS • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 artvault-store (Local Storage)                  │   │
//! │  │          artworks / cartItems / currentUser as JSON             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Listing, CartLine, Account, Category)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Catalog filter, price buckets, sample catalog
//! - [`cart`] - Cart aggregator and checkout settlement
//! - [`profile`] - Artist statistics
//! - [`error`] - Domain error types
//! - [`validation`] - Upload and account form validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output
//! 2. **Whole-Value Replacement**: every edit returns a new collection
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: validation errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use artvault_core::cart::{add_or_increment, compute_total};
//! use artvault_core::catalog::{filter_catalog, sample_listings, CatalogCriteria};
//!
//! let listings = sample_listings();
//! let visible = filter_catalog(&listings, &CatalogCriteria::from_raw("", "painting", ""));
//!
//! let cart = add_or_increment(&[], &visible[0]);
//! let totals = compute_total(&cart);
//! assert_eq!(totals.total, totals.subtotal + totals.tax);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod profile;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::CartTotals;
pub use catalog::{CatalogCriteria, Facet, PriceBucket};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use profile::ArtistStats;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Marketplace sales tax: 800 bps = 8%, applied to the cart subtotal.
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Maximum accepted image size for uploads (10 MB).
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;
