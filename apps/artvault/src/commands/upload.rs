//! # Upload Command
//!
//! Adds a new listing to the catalog for the signed-in artist.
//!
//! ## Upload Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UploadForm (raw strings)                                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  require account ─── none ──► UNAUTHORIZED "Please login to upload..."  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  validate title / price / category ─── bad ──► VALIDATION_ERROR        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  resolve image (URL as-is, file → data URL)                            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ListingDraft::into_listing(uuid v4, account, now)                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  listings = [new, ..listings] ──► save "artworks" ──► notify success   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use artvault_core::validation::{parse_category, parse_price, validate_price, validate_title};
use artvault_core::{Listing, ListingDraft};

use crate::error::ApiError;
use crate::image::resolve_image;
use crate::notify::{notify_outcome, Notifier};
use crate::state::{SessionState, StoreState};

/// The upload form as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadForm {
    pub title: String,
    pub description: String,
    /// Decimal string, e.g. "450.00"
    pub price: String,
    /// One of the category slugs, e.g. "mixed-media"
    pub category: String,
    pub medium: String,
    pub dimensions: String,
    /// URL, data URL, or local file path
    pub image: String,
}

impl UploadForm {
    /// Validates the form and resolves the image.
    pub fn into_draft(self) -> Result<ListingDraft, ApiError> {
        let title = validate_title(&self.title)?;
        let price = parse_price(&self.price)?;
        validate_price(price)?;
        let category = parse_category(&self.category)?;
        let image = resolve_image(&self.image)?;

        Ok(ListingDraft {
            title,
            description: self.description.trim().to_string(),
            price,
            category,
            medium: self.medium.trim().to_string(),
            dimensions: self.dimensions.trim().to_string(),
            image,
        })
    }
}

/// Creates a listing owned by the signed-in account.
///
/// ## Returns
/// The new listing, which is now first in the catalog.
pub async fn upload_listing(
    store: &StoreState,
    session: &SessionState,
    notifier: &dyn Notifier,
    form: UploadForm,
) -> Result<Listing, ApiError> {
    debug!(title = %form.title, "upload_listing command");

    let result = create_listing(store, session, form).await;
    notify_outcome(notifier, &result, "Artwork uploaded successfully!");
    result
}

async fn create_listing(
    store: &StoreState,
    session: &SessionState,
    form: UploadForm,
) -> Result<Listing, ApiError> {
    let artist = session.with_session(|s| s.require_account("upload artwork").cloned())?;
    let draft = form.into_draft()?;
    let listing = draft.into_listing(Uuid::new_v4().to_string(), &artist, Utc::now());

    let listings = session.with_session_mut(|s| {
        s.listings.insert(0, listing.clone());
        s.listings.clone()
    });
    store.marketplace().save_listings(&listings).await?;

    info!(listing_id = %listing.id, artist = %listing.artist_name, "Listing uploaded");
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::gallery::list_gallery;
    use crate::commands::testing::Fixture;
    use crate::error::ErrorCode;
    use crate::notify::{Level, Notification};
    use artvault_core::{Category, Money};

    fn form() -> UploadForm {
        UploadForm {
            title: "  Night Garden ".to_string(),
            description: "Moonlit flowers".to_string(),
            price: "1250.50".to_string(),
            category: "mixed-media".to_string(),
            medium: "Collage".to_string(),
            dimensions: "12x12 inches".to_string(),
            image: "https://example.com/garden.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upload_prepends_and_persists() {
        let fx = Fixture::signed_in().await;

        let listing = upload_listing(&fx.store, &fx.session, &fx.notifier, form())
            .await
            .unwrap();

        assert_eq!(listing.title, "Night Garden");
        assert_eq!(listing.price, Money::from_cents(125_050));
        assert_eq!(listing.category, Category::MixedMedia);
        assert_eq!(listing.artist_id, "buyer-1");
        assert_eq!(listing.artist_name, "buyer");
        assert!(!listing.sold);

        let saved = fx.store.marketplace().load_listings().await.unwrap();
        assert_eq!(saved.len(), 7);
        assert_eq!(saved[0], listing);

        let expensive = list_gallery(&fx.session, "", "", "over-1000");
        assert_eq!(expensive.count, 1);

        assert_eq!(
            fx.notifier.last(),
            Some(Notification::new(Level::Success, "Artwork uploaded successfully!"))
        );
    }

    #[tokio::test]
    async fn test_upload_requires_account() {
        let fx = Fixture::new().await;

        let err = upload_listing(&fx.store, &fx.session, &fx.notifier, form())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.message, "Please login to upload artwork");
        assert_eq!(fx.notifier.last().map(|n| n.level), Some(Level::Error));
        assert_eq!(fx.session.snapshot().listings.len(), 6);
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_fields() {
        let fx = Fixture::signed_in().await;

        let cases = [
            UploadForm { title: " ".into(), ..form() },
            UploadForm { price: "12.345".into(), ..form() },
            UploadForm { price: "-3".into(), ..form() },
            UploadForm { category: "ceramics".into(), ..form() },
            UploadForm { image: "sketch.bmp".into(), ..form() },
        ];

        for case in cases {
            let err = upload_listing(&fx.store, &fx.session, &fx.notifier, case)
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }
        assert_eq!(fx.session.snapshot().listings.len(), 6);
    }
}
