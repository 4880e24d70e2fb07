//! # Checkout Command
//!
//! Pays for the cart and marks the purchased listings sold.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout                                             │
//! │                                                                         │
//! │  1. Snapshot cart ───── empty ──► CART_ERROR "Your cart is empty"       │
//! │  2. compute_total_with_rate(cart, config tax)                           │
//! │  3. SimulatedPaymentGateway::charge(total, details)                     │
//! │        (session unlocked while the payment delay runs)                  │
//! │  4. settle_checkout(listings, cart) ──► purchased listings sold = true  │
//! │  5. drop the paid lines from the cart (lines added meanwhile stay)      │
//! │  6. save "artworks" + "cartItems" in one transaction                    │
//! │  7. apply 4-5 to the session                                            │
//! │  8. notify "Payment successful! Thank you for your purchase!"           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use artvault_core::cart::{compute_total_with_rate, remove_line, settle_checkout};
use artvault_core::{CartLine, CartTotals, CoreError};

use crate::error::ApiError;
use crate::notify::{notify_outcome, Notifier};
use crate::payment::{PaymentDetails, PaymentReceipt, SimulatedPaymentGateway};
use crate::state::{ConfigState, SessionState, StoreState};

/// Result of a successful checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub receipt: PaymentReceipt,
    pub totals: CartTotals,
    /// Ids of the listings now marked sold.
    pub purchased: Vec<String>,
}

/// Pays for everything in the cart.
pub async fn checkout(
    store: &StoreState,
    session: &SessionState,
    config: &ConfigState,
    notifier: &dyn Notifier,
    details: PaymentDetails,
) -> Result<CheckoutResponse, ApiError> {
    debug!("checkout command");

    let result = pay_and_settle(store, session, config, &details).await;
    notify_outcome(
        notifier,
        &result,
        "Payment successful! Thank you for your purchase!",
    );
    result
}

async fn pay_and_settle(
    store: &StoreState,
    session: &SessionState,
    config: &ConfigState,
    details: &PaymentDetails,
) -> Result<CheckoutResponse, ApiError> {
    let cart = session.with_session(|s| s.cart.clone());
    if cart.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let totals = compute_total_with_rate(&cart, config.tax_rate());
    let receipt = SimulatedPaymentGateway::from_config(config)
        .charge(totals.total, details)
        .await?;

    let (listings, remaining) = session.with_session(|s| {
        (
            settle_checkout(&s.listings, &cart),
            without_paid_lines(&s.cart, &cart),
        )
    });
    store
        .marketplace()
        .save_checkout(&listings, &remaining)
        .await?;

    session.with_session_mut(|s| {
        s.listings = settle_checkout(&s.listings, &cart);
        s.cart = without_paid_lines(&s.cart, &cart);
    });

    let purchased: Vec<String> = cart.into_iter().map(|line| line.listing_id).collect();
    info!(
        reference = %receipt.reference,
        total = %totals.total,
        items = purchased.len(),
        "Checkout completed"
    );

    Ok(CheckoutResponse {
        receipt,
        totals,
        purchased,
    })
}

/// `current` minus every listing that was paid for.
fn without_paid_lines(current: &[CartLine], paid: &[CartLine]) -> Vec<CartLine> {
    paid.iter()
        .fold(current.to_vec(), |cart, line| remove_line(&cart, &line.listing_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, get_cart};
    use crate::commands::gallery::list_gallery;
    use crate::commands::testing::Fixture;
    use crate::error::ErrorCode;
    use crate::notify::{Level, Notification};
    use crate::payment::test_payment_details;
    use artvault_core::cart::add_or_increment;
    use artvault_core::Money;

    #[tokio::test]
    async fn test_checkout_marks_sold_and_clears_cart() {
        let fx = Fixture::signed_in().await;
        let (first, second) = fx
            .session
            .with_session(|s| (s.listings[0].id.clone(), s.listings[1].id.clone()));
        for id in [&first, &second] {
            add_to_cart(&fx.store, &fx.session, &fx.config, &fx.notifier, id)
                .await
                .unwrap();
        }

        let done = checkout(
            &fx.store,
            &fx.session,
            &fx.config,
            &fx.notifier,
            test_payment_details(),
        )
        .await
        .unwrap();

        // 450 + 320 = 770, tax 61.60
        assert_eq!(done.totals.total, Money::from_cents(83_160));
        assert_eq!(done.receipt.amount, done.totals.total);
        assert_eq!(done.purchased, vec![first.clone(), second.clone()]);

        assert!(get_cart(&fx.session, &fx.config).items.is_empty());
        assert_eq!(list_gallery(&fx.session, "", "", "").count, 4);

        let marketplace = fx.store.marketplace();
        assert!(marketplace.load_cart().await.unwrap().is_empty());
        let saved = marketplace.load_listings().await.unwrap();
        assert_eq!(saved.iter().filter(|l| l.sold).count(), 2);

        assert_eq!(
            fx.notifier.last(),
            Some(Notification::new(
                Level::Success,
                "Payment successful! Thank you for your purchase!"
            ))
        );
    }

    #[tokio::test]
    async fn test_empty_cart_refused() {
        let fx = Fixture::signed_in().await;

        let err = checkout(
            &fx.store,
            &fx.session,
            &fx.config,
            &fx.notifier,
            test_payment_details(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(
            fx.notifier.last(),
            Some(Notification::new(Level::Error, "Your cart is empty"))
        );
    }

    #[tokio::test]
    async fn test_invalid_payment_keeps_cart() {
        let fx = Fixture::signed_in().await;
        let id = fx.first_listing_id();
        add_to_cart(&fx.store, &fx.session, &fx.config, &fx.notifier, &id)
            .await
            .unwrap();

        let err = checkout(
            &fx.store,
            &fx.session,
            &fx.config,
            &fx.notifier,
            PaymentDetails::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_cart(&fx.session, &fx.config).items.len(), 1);
        assert!(fx.session.snapshot().listings.iter().all(|l| !l.sold));
    }

    #[tokio::test]
    async fn test_storage_failure_leaves_session_untouched() {
        let fx = Fixture::signed_in().await;
        let id = fx.first_listing_id();
        add_to_cart(&fx.store, &fx.session, &fx.config, &fx.notifier, &id)
            .await
            .unwrap();
        fx.store.inner().close().await;

        let err = checkout(
            &fx.store,
            &fx.session,
            &fx.config,
            &fx.notifier,
            test_payment_details(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(get_cart(&fx.session, &fx.config).items.len(), 1);
        assert!(fx.session.snapshot().listings.iter().all(|l| !l.sold));
        assert_eq!(fx.notifier.last().map(|n| n.level), Some(Level::Error));
    }

    #[test]
    fn test_lines_added_during_payment_survive() {
        let listings = artvault_core::catalog::sample_listings();
        let paid = add_or_increment(&[], &listings[0]);
        let current = add_or_increment(&paid, &listings[2]);

        let remaining = without_paid_lines(&current, &paid);

        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].listing_id, listings[2].id);
        assert!(without_paid_lines(&paid, &paid).is_empty());
    }
}
