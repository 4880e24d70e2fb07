//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payment  │────►│  Sold    │       │
//! │  │  Cart    │     │          │     │  Form    │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart        checkout                          │
//! │                   update_cart_item   (checkout.rs)                     │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   logout ──────────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every edit replaces the whole cart and saves it under `cartItems`.

use serde::Serialize;
use tracing::{debug, warn};

use artvault_core::cart::{
    add_or_increment, checked_total_with_rate, compute_total_with_rate, remove_line, set_quantity,
};
use artvault_core::{CartLine, CartTotals, CoreError, TaxRate};

use crate::error::ApiError;
use crate::notify::{notify_outcome, Notifier};
use crate::state::{ConfigState, SessionState, StoreState};

/// Totals rendered with the configured currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    pub formatted: FormattedTotals,
}

impl CartResponse {
    pub fn new(items: Vec<CartLine>, config: &ConfigState) -> Self {
        let totals = compute_total_with_rate(&items, config.tax_rate());
        CartResponse {
            formatted: FormattedTotals {
                subtotal: config.format_currency(totals.subtotal.cents()),
                tax: config.format_currency(totals.tax.cents()),
                total: config.format_currency(totals.total.cents()),
            },
            items,
            totals,
        }
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CART                                                   2 items        │
/// ├─────────────────────────────────────────────────────────────────────────┤
/// │  Abstract Sunset   Sarah Johnson     x1            $450.00             │
/// │  City Lights       Mike Chen         x1            $320.00             │
/// ├─────────────────────────────────────────────────────────────────────────┤
/// │  Subtotal                                          $770.00             │
/// │  Tax (8%)                                           $61.60             │
/// │  TOTAL                                             $831.60             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(session: &SessionState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    let items = session.with_session(|s| s.cart.clone());
    CartResponse::new(items, config)
}

/// Adds a listing to the cart.
///
/// ## Behavior
/// - Requires a signed-in account
/// - Already in cart: quantity increases by one
/// - Not in cart: added with title, price, image and artist frozen
/// - Sold listings are refused
pub async fn add_to_cart(
    store: &StoreState,
    session: &SessionState,
    config: &ConfigState,
    notifier: &dyn Notifier,
    listing_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(listing_id = %listing_id, "add_to_cart command");

    let result = add_line(store, session, config, listing_id).await;
    notify_outcome(notifier, &result, "Added to cart!");
    result
}

/// Accepts an edited cart only if its totals fit in `Money`.
fn within_limits(cart: Vec<CartLine>, rate: TaxRate) -> Result<Vec<CartLine>, CoreError> {
    match checked_total_with_rate(&cart, rate) {
        Some(_) => Ok(cart),
        None => Err(CoreError::TotalOverflow),
    }
}

async fn add_line(
    store: &StoreState,
    session: &SessionState,
    config: &ConfigState,
    listing_id: &str,
) -> Result<CartResponse, ApiError> {
    let cart = session.with_session_mut(|s| {
        s.require_account("add items to cart")?;
        let listing = s.find_listing(listing_id)?.clone();
        if listing.sold {
            return Err(CoreError::ListingSold(listing_id.to_string()));
        }
        s.cart = within_limits(add_or_increment(&s.cart, &listing), config.tax_rate())?;
        Ok(s.cart.clone())
    })?;

    store.marketplace().save_cart(&cart).await?;
    Ok(CartResponse::new(cart, config))
}

/// Sets the quantity of a cart line.
///
/// Zero and negative quantities stay in the cart and count toward the
/// totals as-is. A quantity whose totals would not fit in `Money` is refused
/// with `CART_ERROR` and the cart is left unchanged.
pub async fn update_cart_item(
    store: &StoreState,
    session: &SessionState,
    config: &ConfigState,
    listing_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(listing_id = %listing_id, quantity = %quantity, "update_cart_item command");

    if quantity < 1 {
        warn!(listing_id = %listing_id, quantity, "Cart quantity below one");
    }

    let cart = session.with_session_mut(|s| {
        s.cart = within_limits(set_quantity(&s.cart, listing_id, quantity), config.tax_rate())?;
        Ok::<_, CoreError>(s.cart.clone())
    })?;

    store.marketplace().save_cart(&cart).await?;
    Ok(CartResponse::new(cart, config))
}

/// Removes a line from the cart. Removing an absent id is a no-op.
pub async fn remove_from_cart(
    store: &StoreState,
    session: &SessionState,
    config: &ConfigState,
    notifier: &dyn Notifier,
    listing_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(listing_id = %listing_id, "remove_from_cart command");

    let cart = session.with_session_mut(|s| {
        s.cart = remove_line(&s.cart, listing_id);
        s.cart.clone()
    });

    let result = store
        .marketplace()
        .save_cart(&cart)
        .await
        .map(|()| CartResponse::new(cart, config))
        .map_err(ApiError::from);

    notify_outcome(notifier, &result, "Item removed from cart");
    result
}
