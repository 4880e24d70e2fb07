//! # Gallery Commands
//!
//! Browsing the catalog and looking at one artist's work.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Search: [ sun        ]  Category: [ painting ▾ ]  Price: [ 100-500 ▾ ] │
//! │                                                                         │
//! │  ┌───────────────┐  ┌───────────────┐                                   │
//! │  │ Abstract      │  │ Ocean Waves   │      2 artworks                   │
//! │  │ Sunset  $450  │  │         $520  │                                   │
//! │  └───────────────┘  └───────────────┘                                   │
//! │                                                                         │
//! │  list_gallery(search, category, price) → { count, listings }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use artvault_core::catalog::{filter_catalog, listings_by_artist};
use artvault_core::{CatalogCriteria, Category, Listing};

use crate::error::ApiError;
use crate::notify::Notifier;
use crate::state::SessionState;

/// Visible listings for the current criteria.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResponse {
    pub count: usize,
    pub listings: Vec<Listing>,
}

impl From<Vec<Listing>> for GalleryResponse {
    fn from(listings: Vec<Listing>) -> Self {
        GalleryResponse {
            count: listings.len(),
            listings,
        }
    }
}

/// One entry of the category select box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    /// Value accepted by `--category` and the upload form
    pub value: &'static str,
    pub label: &'static str,
}

/// Filters the catalog.
///
/// ## Arguments
/// Raw form values; empty means "any". The search text is matched as typed.
/// An unknown category or price bucket matches nothing rather than failing.
pub fn list_gallery(
    session: &SessionState,
    search: &str,
    category: &str,
    price: &str,
) -> GalleryResponse {
    debug!(search = %search, category = %category, price = %price, "list_gallery command");

    let criteria = CatalogCriteria::from_raw(search, category, price);
    let visible = session.with_session(|s| filter_catalog(&s.listings, &criteria));
    GalleryResponse::from(visible)
}

/// The categories offered by the gallery filter and the upload form.
pub fn list_categories() -> Vec<CategoryOption> {
    Category::ALL
        .iter()
        .map(|category| CategoryOption {
            value: category.as_str(),
            label: category.label(),
        })
        .collect()
}

/// Shows every listing uploaded by `artist_id`, sold ones included.
///
/// The full artist page does not exist yet; an info notification says so.
pub fn view_artist(
    session: &SessionState,
    notifier: &dyn Notifier,
    artist_id: &str,
) -> Result<GalleryResponse, ApiError> {
    debug!(artist_id = %artist_id, "view_artist command");

    let listings = session.with_session(|s| listings_by_artist(&s.listings, artist_id));
    notifier.info("Artist profile feature coming soon!");

    if listings.is_empty() {
        return Err(ApiError::not_found("Artist", artist_id));
    }
    Ok(GalleryResponse::from(listings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Fixture;
    use crate::error::ErrorCode;
    use crate::notify::Level;
    use artvault_core::catalog::sample_artist_id;

    #[tokio::test]
    async fn test_empty_filters_show_whole_catalog() {
        let fx = Fixture::new().await;
        let gallery = list_gallery(&fx.session, "", "", "");
        assert_eq!(gallery.count, 6);
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let fx = Fixture::new().await;

        let photos = list_gallery(&fx.session, "", "photography", "");
        assert_eq!(photos.count, 2);

        let cheap_photos = list_gallery(&fx.session, "", "photography", "100-500");
        assert_eq!(cheap_photos.count, 2);

        let by_artist = list_gallery(&fx.session, "EMMA", "", "");
        assert_eq!(by_artist.count, 1);
        assert_eq!(by_artist.listings[0].title, "Serenity");

        let nothing = list_gallery(&fx.session, "", "ceramics", "");
        assert_eq!(nothing.count, 0);
    }

    #[tokio::test]
    async fn test_sold_listings_hidden() {
        let fx = Fixture::new().await;
        fx.session.with_session_mut(|s| s.listings[0].sold = true);

        let gallery = list_gallery(&fx.session, "", "", "");
        assert_eq!(gallery.count, 5);
        assert!(gallery.listings.iter().all(|l| !l.sold));
    }

    #[tokio::test]
    async fn test_search_text_is_matched_as_typed() {
        let fx = Fixture::new().await;

        let long = list_gallery(&fx.session, &"x".repeat(500), "", "");
        assert_eq!(long.count, 0);

        // surrounding spaces are part of the needle
        let padded = list_gallery(&fx.session, "  EMMA ", "", "");
        assert_eq!(padded.count, 0);
    }

    #[test]
    fn test_categories_have_labels() {
        let categories = list_categories();

        assert_eq!(categories.len(), 6);
        assert_eq!(
            categories[5],
            CategoryOption {
                value: "mixed-media",
                label: "Mixed Media"
            }
        );
        assert_eq!(categories[2].label, "Digital Art");
    }

    #[tokio::test]
    async fn test_view_artist() {
        let fx = Fixture::new().await;

        let work = view_artist(&fx.session, &fx.notifier, &sample_artist_id(3)).unwrap();
        assert_eq!(work.count, 1);
        assert_eq!(work.listings[0].artist_name, "Emma Rodriguez");
        assert_eq!(fx.notifier.last().map(|n| n.level), Some(Level::Info));

        let err = view_artist(&fx.session, &fx.notifier, "nobody").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
