//! # Cart Aggregator
//!
//! Cart edits and totals as pure functions over a slice of [`CartLine`]s.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   []  ── add_or_increment(A) ──► [A×1] ── add_or_increment(A) ──► [A×2] │
//! │                                    │                                    │
//! │                          set_quantity(A, 5)                             │
//! │                                    ▼                                    │
//! │                                  [A×5] ── remove_line(A) ──► []         │
//! │                                                                         │
//! │   compute_total(cart) ──► CartTotals { subtotal, tax, total }           │
//! │   settle_checkout(listings, cart) ──► listings with cart ids sold       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every edit returns a new `Vec`; the input slice is never touched. There is
//! at most one line per listing id.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLine, Listing, TaxRate};

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals calculated for display and payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Σ price × quantity.
    pub subtotal: Money,
    pub tax: Money,
    /// subtotal + tax.
    pub total: Money,
    /// Number of distinct lines (the navbar badge).
    pub line_count: usize,
    /// Σ quantity.
    pub total_quantity: i64,
}

// =============================================================================
// Edits
// =============================================================================

/// Adds `listing` to the cart, or bumps the existing line by one.
///
/// A new line snapshots the listing's title, price, image and artist name.
pub fn add_or_increment(cart: &[CartLine], listing: &Listing) -> Vec<CartLine> {
    if cart.iter().any(|line| line.listing_id == listing.id) {
        return cart
            .iter()
            .map(|line| {
                if line.listing_id == listing.id {
                    CartLine {
                        quantity: line.quantity + 1,
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect();
    }

    let mut next = cart.to_vec();
    next.push(CartLine::from_listing(listing));
    next
}

/// Replaces the quantity of the line for `listing_id`.
///
/// No bounds are applied: zero and negative quantities are stored as given.
pub fn set_quantity(cart: &[CartLine], listing_id: &str, quantity: i64) -> Vec<CartLine> {
    cart.iter()
        .map(|line| {
            if line.listing_id == listing_id {
                CartLine {
                    quantity,
                    ..line.clone()
                }
            } else {
                line.clone()
            }
        })
        .collect()
}

/// Drops the line for `listing_id`. Absent ids leave the cart unchanged.
pub fn remove_line(cart: &[CartLine], listing_id: &str) -> Vec<CartLine> {
    cart.iter()
        .filter(|line| line.listing_id != listing_id)
        .cloned()
        .collect()
}

// =============================================================================
// Totals
// =============================================================================

/// Computes totals at the marketplace rate (8%).
///
/// ## Example
/// ```rust
/// use artvault_core::cart::compute_total;
///
/// let totals = compute_total(&[]);
/// assert!(totals.total.is_zero());
/// assert_eq!(totals.line_count, 0);
/// ```
pub fn compute_total(cart: &[CartLine]) -> CartTotals {
    compute_total_with_rate(cart, TaxRate::default())
}

/// Computes totals with an explicit tax rate.
///
/// Tax is rounded once, on the subtotal, never per line. Every sum saturates
/// at the `i64` bounds, so any quantity yields totals without panicking; use
/// [`checked_total_with_rate`] to detect that case.
pub fn compute_total_with_rate(cart: &[CartLine], rate: TaxRate) -> CartTotals {
    let subtotal: Money = cart.iter().map(CartLine::line_total).sum();
    let tax = subtotal.calculate_tax(rate);

    CartTotals {
        subtotal,
        tax,
        total: subtotal + tax,
        line_count: cart.len(),
        total_quantity: cart
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.quantity)),
    }
}

/// Computes totals, or `None` if any product or sum overflows `i64`.
///
/// ## Example
/// ```rust
/// use artvault_core::cart::{add_or_increment, checked_total_with_rate, set_quantity};
/// use artvault_core::catalog::sample_listings;
/// use artvault_core::TaxRate;
///
/// let listing = &sample_listings()[0];
/// let cart = set_quantity(&add_or_increment(&[], listing), &listing.id, i64::MAX);
/// assert!(checked_total_with_rate(&cart, TaxRate::default()).is_none());
/// ```
pub fn checked_total_with_rate(cart: &[CartLine], rate: TaxRate) -> Option<CartTotals> {
    let subtotal = cart.iter().try_fold(Money::zero(), |acc, line| {
        acc.checked_add(line.checked_line_total()?)
    })?;
    let tax = subtotal.calculate_tax(rate);
    let total_quantity = cart
        .iter()
        .try_fold(0_i64, |acc, line| acc.checked_add(line.quantity))?;

    Some(CartTotals {
        subtotal,
        tax,
        total: subtotal.checked_add(tax)?,
        line_count: cart.len(),
        total_quantity,
    })
}

// =============================================================================
// Checkout
// =============================================================================

/// Marks every listing referenced by the cart as sold.
///
/// ## User Workflow
/// ```text
/// Payment succeeds
///      │
///      ▼
/// settle_checkout(listings, cart) ← THIS FUNCTION
///      │
///      ▼
/// Controller saves listings, clears cart
/// ```
///
/// Listings not in the cart are returned untouched, in the same order.
pub fn settle_checkout(listings: &[Listing], cart: &[CartLine]) -> Vec<Listing> {
    let purchased: HashSet<&str> = cart.iter().map(|line| line.listing_id.as_str()).collect();

    listings
        .iter()
        .map(|listing| {
            if purchased.contains(listing.id.as_str()) {
                Listing {
                    sold: true,
                    ..listing.clone()
                }
            } else {
                listing.clone()
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
