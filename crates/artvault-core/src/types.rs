//! # Domain Types
//!
//! Core domain types used throughout ArtVault.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Listing      │   │    CartLine     │   │    Account      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  listing_id (FK)│   │  id (UUID)      │       │
//! │  │  title          │   │  title   (snap) │   │  name           │       │
//! │  │  price          │   │  price   (snap) │   │  email          │       │
//! │  │  category       │   │  quantity       │   │  artist_name    │       │
//! │  │  artist_id ─────┼───┼─────────────────┼──►│  bio            │       │
//! │  │  sold           │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Category     │   │    TaxRate      │                              │
//! │  │  painting, ...  │   │  bps (u32)      │                              │
//! │  │  mixed-media    │   │  800 = 8%       │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `CartLine` freezes the listing's display fields at add time. The cart
//! keeps rendering the same title and price even if the listing changes.
//!
//! All records serialize with camelCase keys; that is the JSON shape kept in
//! local storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    /// The marketplace rate, 8%.
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Category
// =============================================================================

/// The fixed set of artwork categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Painting,
    Photography,
    Digital,
    Sculpture,
    Drawing,
    MixedMedia,
}

impl Category {
    /// Every category, in the order the gallery lists them.
    pub const ALL: [Category; 6] = [
        Category::Painting,
        Category::Photography,
        Category::Digital,
        Category::Sculpture,
        Category::Drawing,
        Category::MixedMedia,
    ];

    /// The wire/form value (`"mixed-media"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Painting => "painting",
            Category::Photography => "photography",
            Category::Digital => "digital",
            Category::Sculpture => "sculpture",
            Category::Drawing => "drawing",
            Category::MixedMedia => "mixed-media",
        }
    }

    /// Human label for select boxes (`"Mixed Media"`).
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Painting => "Painting",
            Category::Photography => "Photography",
            Category::Digital => "Digital Art",
            Category::Sculpture => "Sculpture",
            Category::Drawing => "Drawing",
            Category::MixedMedia => "Mixed Media",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Parses the exact form value. Matching is case-sensitive, as the
    /// category filter uses exact equality.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Listing
// =============================================================================

/// A single artwork offered for sale.
///
/// Created by the upload flow. After creation the only mutation is the
/// `sold` flip on a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique identifier (UUID v4 for uploads).
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Asking price (non-negative).
    pub price: Money,

    pub category: Category,

    /// Free text, e.g. "Oil on canvas".
    #[serde(default)]
    pub medium: String,

    /// Free text, e.g. "24x36 inches".
    #[serde(default)]
    pub dimensions: String,

    /// Image reference: an http(s) URL or a `data:` URL.
    pub image: String,

    /// Account id of the uploading artist.
    pub artist_id: String,

    /// Artist display name at upload time.
    pub artist_name: String,

    #[ts(as = "String")]
    pub uploaded_at: DateTime<Utc>,

    #[serde(default)]
    pub sold: bool,
}

/// Form input for a new listing, already validated and coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: Money,
    pub category: Category,
    pub medium: String,
    pub dimensions: String,
    pub image: String,
}

impl ListingDraft {
    /// Turns the draft into an unsold listing owned by `artist`.
    ///
    /// The id and timestamp are supplied by the caller so this stays pure.
    pub fn into_listing(self, id: String, artist: &Account, uploaded_at: DateTime<Utc>) -> Listing {
        Listing {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            medium: self.medium,
            dimensions: self.dimensions,
            image: self.image,
            artist_id: artist.id.clone(),
            artist_name: artist.artist_name.clone(),
            uploaded_at,
            sold: false,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One listing's entry in a shopping cart.
///
/// `listing_id` is unique within a cart; re-adding increments `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The listing this line refers to.
    pub listing_id: String,
    /// Title at time of adding (frozen).
    pub title: String,
    /// Price at time of adding (frozen).
    pub price: Money,
    /// Image at time of adding (frozen).
    pub image: String,
    /// Artist display name at time of adding (frozen).
    pub artist_name: String,
    pub quantity: i64,
}

impl CartLine {
    /// Creates a line for `listing` with quantity 1, snapshotting its
    /// display fields.
    pub fn from_listing(listing: &Listing) -> Self {
        CartLine {
            listing_id: listing.id.clone(),
            title: listing.title.clone(),
            price: listing.price,
            image: listing.image.clone(),
            artist_name: listing.artist_name.clone(),
            quantity: 1,
        }
    }

    /// Line total (price × quantity), saturating at the `Money` bounds.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Line total, or `None` if price × quantity overflows.
    #[inline]
    pub fn checked_line_total(&self) -> Option<Money> {
        self.price.checked_multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Account
// =============================================================================

/// The signed-in user.
///
/// There is no password hash here: credentials are never verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Display name shown on listings. Defaults to `name`.
    pub artist_name: String,
    #[serde(default)]
    pub bio: String,
    #[ts(as = "String")]
    pub joined_at: DateTime<Utc>,
}

/// Bio given to accounts created through the sign-in form.
pub const DEFAULT_BIO: &str = "Art enthusiast and creator";

impl Account {
    /// Builds an account from the registration form.
    ///
    /// An empty artist name falls back to the full name.
    pub fn register(
        id: String,
        name: &str,
        email: &str,
        artist_name: Option<&str>,
        bio: Option<&str>,
        joined_at: DateTime<Utc>,
    ) -> Self {
        let name = name.trim().to_string();
        let artist_name = artist_name
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| name.clone());

        Account {
            id,
            name,
            email: email.trim().to_string(),
            artist_name,
            bio: bio.map(|b| b.trim().to_string()).unwrap_or_default(),
            joined_at,
        }
    }

    /// Builds an account from the sign-in form.
    ///
    /// Both names are taken from the local part of the email address.
    pub fn sign_in(id: String, email: &str, joined_at: DateTime<Utc>) -> Self {
        let email = email.trim();
        let local = email.split('@').next().unwrap_or_default().to_string();

        Account {
            id,
            name: local.clone(),
            email: email.to_string(),
            artist_name: local,
            bio: DEFAULT_BIO.to_string(),
            joined_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_default_is_eight_percent() {
        let rate = TaxRate::default();
        assert_eq!(rate.bps(), 800);
        assert!((rate.percentage() - 8.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
    }

    #[test]
    fn test_category_round_trip_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("Painting".parse::<Category>().is_err());
        assert!("ceramics".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_kebab_case() {
        let json = serde_json::to_string(&Category::MixedMedia).unwrap();
        assert_eq!(json, "\"mixed-media\"");
    }

    #[test]
    fn test_register_falls_back_to_name() {
        let now = Utc::now();
        let account = Account::register("1".into(), "Sarah Johnson", "s@x.io", Some("  "), None, now);
        assert_eq!(account.artist_name, "Sarah Johnson");
        assert_eq!(account.bio, "");

        let account = Account::register("2".into(), "Sarah", "s@x.io", Some("SJ"), Some("Painter"), now);
        assert_eq!(account.artist_name, "SJ");
        assert_eq!(account.bio, "Painter");
    }

    #[test]
    fn test_sign_in_uses_email_local_part() {
        let account = Account::sign_in("1".into(), "mike.chen@example.com", Utc::now());
        assert_eq!(account.name, "mike.chen");
        assert_eq!(account.artist_name, "mike.chen");
        assert_eq!(account.bio, DEFAULT_BIO);
    }

    #[test]
    fn test_listing_json_uses_camel_case() {
        let artist = Account::sign_in("artist-1".into(), "a@b.c", Utc::now());
        let draft = ListingDraft {
            title: "Serenity".into(),
            description: String::new(),
            price: Money::from_major(680),
            category: Category::Painting,
            medium: "Oil on canvas".into(),
            dimensions: "30x40 inches".into(),
            image: "https://example.com/a.jpg".into(),
        };
        let listing = draft.into_listing("l-1".into(), &artist, Utc::now());
        let json = serde_json::to_value(&listing).unwrap();

        assert_eq!(json["artistId"], "artist-1");
        assert_eq!(json["price"], 68000);
        assert_eq!(json["sold"], false);
    }
}
