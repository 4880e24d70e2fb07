//! # Catalog Filter
//!
//! Produces the visible subset of the catalog for the gallery view.
//!
//! ## Filter Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  listings (in storage order)                                            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ┌──────────┐   ┌──────────────┐   ┌────────────┐   ┌──────────────┐   │
//! │  │ unsold?  │──►│ text matches │──►│ category = │──►│ price bucket │   │
//! │  │ (always) │   │ title|artist │   │  selected  │   │   contains   │   │
//! │  └──────────┘   └──────────────┘   └────────────┘   └──────────────┘   │
//! │                                                            │            │
//! │                                                            ▼            │
//! │                                         visible listings (same order)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every predicate is ANDed and the filter is stable. Nothing here can fail:
//! criteria the catalog does not recognize simply match no listing.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, Listing};

// =============================================================================
// Facet
// =============================================================================

/// One filter dimension.
///
/// `Unknown` is what an unrecognized form value becomes. It matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet<T> {
    /// No constraint.
    Any,
    /// Only values equal to (or contained in) this one.
    Only(T),
    /// A value that was supplied but not recognized.
    Unknown,
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::Any
    }
}

impl<T> Facet<T> {
    /// Parses a raw form value. Blank means unconstrained.
    fn from_raw(raw: &str) -> Self
    where
        T: FromStr,
    {
        let raw = raw.trim();
        if raw.is_empty() {
            return Facet::Any;
        }
        match raw.parse() {
            Ok(value) => Facet::Only(value),
            Err(_) => Facet::Unknown,
        }
    }

    fn test(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Facet::Any => true,
            Facet::Only(value) => predicate(value),
            Facet::Unknown => false,
        }
    }
}

// =============================================================================
// Price Bucket
// =============================================================================

/// Coarse price range used as a filter facet.
///
/// ```text
///   0 ──────── 100 ──────────── 500 ──────────── 1000 ────────── ∞
///   │ under-100 │                │                 │  over-1000
///   │           ├─── 100-500 ────┤                 │
///   │           │                ├─── 500-1000 ────┤
/// ```
///
/// The middle buckets are inclusive at both ends, so a price of exactly 500
/// falls in both `100-500` and `500-1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PriceBucket {
    #[serde(rename = "under-100")]
    Under100,
    #[serde(rename = "100-500")]
    From100To500,
    #[serde(rename = "500-1000")]
    From500To1000,
    #[serde(rename = "over-1000")]
    Over1000,
}

impl PriceBucket {
    pub const ALL: [PriceBucket; 4] = [
        PriceBucket::Under100,
        PriceBucket::From100To500,
        PriceBucket::From500To1000,
        PriceBucket::Over1000,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PriceBucket::Under100 => "under-100",
            PriceBucket::From100To500 => "100-500",
            PriceBucket::From500To1000 => "500-1000",
            PriceBucket::Over1000 => "over-1000",
        }
    }

    /// Checks whether `price` falls inside this bucket.
    pub fn contains(&self, price: Money) -> bool {
        const HUNDRED: Money = Money::from_major(100);
        const FIVE_HUNDRED: Money = Money::from_major(500);
        const THOUSAND: Money = Money::from_major(1000);

        match self {
            PriceBucket::Under100 => price < HUNDRED,
            PriceBucket::From100To500 => price >= HUNDRED && price <= FIVE_HUNDRED,
            PriceBucket::From500To1000 => price >= FIVE_HUNDRED && price <= THOUSAND,
            PriceBucket::Over1000 => price > THOUSAND,
        }
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceBucket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceBucket::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "price".to_string(),
                allowed: PriceBucket::ALL.iter().map(|b| b.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Criteria
// =============================================================================

/// Gallery filter criteria.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogCriteria {
    /// Search text, lowercased once. Empty matches everything.
    text: String,
    pub category: Facet<Category>,
    pub price: Facet<PriceBucket>,
}

impl CatalogCriteria {
    /// Criteria that only exclude sold listings.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds criteria from the raw strings the gallery form produces.
    ///
    /// ## Example
    /// ```rust
    /// use artvault_core::catalog::{CatalogCriteria, Facet, PriceBucket};
    ///
    /// let criteria = CatalogCriteria::from_raw("Dreams", "", "100-500");
    /// assert_eq!(criteria.category, Facet::Any);
    /// assert_eq!(criteria.price, Facet::Only(PriceBucket::From100To500));
    ///
    /// let criteria = CatalogCriteria::from_raw("", "ceramics", "");
    /// assert_eq!(criteria.category, Facet::Unknown);
    /// ```
    pub fn from_raw(text: &str, category: &str, price_bucket: &str) -> Self {
        CatalogCriteria {
            text: text.to_lowercase(),
            category: Facet::from_raw(category),
            price: Facet::from_raw(price_bucket),
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_lowercase();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Facet::Only(category);
        self
    }

    pub fn with_price(mut self, bucket: PriceBucket) -> Self {
        self.price = Facet::Only(bucket);
        self
    }

    /// The lowercased search text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Checks one listing against every predicate.
    pub fn matches(&self, listing: &Listing) -> bool {
        if listing.sold {
            return false;
        }

        let text_ok = self.text.is_empty()
            || listing.title.to_lowercase().contains(&self.text)
            || listing.artist_name.to_lowercase().contains(&self.text);

        text_ok
            && self.category.test(|c| *c == listing.category)
            && self.price.test(|b| b.contains(listing.price))
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Returns the listings visible under `criteria`, in input order.
pub fn filter_catalog(listings: &[Listing], criteria: &CatalogCriteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| criteria.matches(listing))
        .cloned()
        .collect()
}

/// Startup merge: saved listings first, then every sample not already saved.
pub fn merge_with_samples(saved: Vec<Listing>, samples: Vec<Listing>) -> Vec<Listing> {
    let known: HashSet<String> = saved.iter().map(|l| l.id.clone()).collect();
    let mut merged = saved;
    merged.extend(samples.into_iter().filter(|s| !known.contains(&s.id)));
    merged
}

/// Every listing uploaded by `artist_id`, sold ones included.
pub fn listings_by_artist(listings: &[Listing], artist_id: &str) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| l.artist_id == artist_id)
        .cloned()
        .collect()
}

// =============================================================================
// Sample Catalog
// =============================================================================

struct Sample {
    title: &'static str,
    description: &'static str,
    price: i64,
    category: Category,
    medium: &'static str,
    dimensions: &'static str,
    photo: &'static str,
    artist: &'static str,
    uploaded: (i32, u32, u32),
}

const SAMPLES: [Sample; 6] = [
    Sample {
        title: "Abstract Dreams",
        description: "A vibrant abstract painting exploring the realm of dreams and imagination.",
        price: 450,
        category: Category::Painting,
        medium: "Acrylic on canvas",
        dimensions: "24x36 inches",
        photo: "1541961017774-22349e4a1262",
        artist: "Sarah Johnson",
        uploaded: (2024, 1, 15),
    },
    Sample {
        title: "City Lights",
        description: "A stunning photograph capturing the energy of urban nightlife.",
        price: 320,
        category: Category::Photography,
        medium: "Digital photography",
        dimensions: "20x30 inches",
        photo: "1514905552197-0610a4d8fd73",
        artist: "Mike Chen",
        uploaded: (2024, 1, 20),
    },
    Sample {
        title: "Serenity",
        description: "A peaceful landscape painting of a mountain lake at sunrise.",
        price: 680,
        category: Category::Painting,
        medium: "Oil on canvas",
        dimensions: "30x40 inches",
        photo: "1506905925346-21bda4d32df4",
        artist: "Emma Rodriguez",
        uploaded: (2024, 1, 25),
    },
    Sample {
        title: "Digital Harmony",
        description: "A modern digital art piece exploring color and form.",
        price: 280,
        category: Category::Digital,
        medium: "Digital art",
        dimensions: "16x20 inches print",
        photo: "1549490349-8643362247b5",
        artist: "Alex Thompson",
        uploaded: (2024, 2, 1),
    },
    Sample {
        title: "Ocean Waves",
        description: "A dynamic seascape capturing the power and beauty of ocean waves.",
        price: 520,
        category: Category::Painting,
        medium: "Watercolor",
        dimensions: "18x24 inches",
        photo: "1439066615861-d1af74d74000",
        artist: "David Kim",
        uploaded: (2024, 2, 5),
    },
    Sample {
        title: "Urban Portrait",
        description: "A striking black and white portrait photography.",
        price: 380,
        category: Category::Photography,
        medium: "Black & white photography",
        dimensions: "16x24 inches",
        photo: "1494790108755-2616c047884c",
        artist: "Lisa Park",
        uploaded: (2024, 2, 10),
    },
];

/// Stable id for the n-th sample listing.
///
/// Samples keep the same ids across runs so the startup merge can tell them
/// apart from saved copies.
pub fn sample_listing_id(n: u128) -> String {
    Uuid::from_u128(0x5a3b_1e00_0000_4000_8000_0000_0000_0000 | n).to_string()
}

/// Stable id for the n-th sample artist.
pub fn sample_artist_id(n: u128) -> String {
    Uuid::from_u128(0x5a3b_a000_0000_4000_8000_0000_0000_0000 | n).to_string()
}

/// The six artworks the marketplace ships with.
pub fn sample_listings() -> Vec<Listing> {
    SAMPLES
        .iter()
        .zip(1u128..)
        .map(|(sample, n)| Listing {
            id: sample_listing_id(n),
            title: sample.title.to_string(),
            description: sample.description.to_string(),
            price: Money::from_major(sample.price),
            category: sample.category,
            medium: sample.medium.to_string(),
            dimensions: sample.dimensions.to_string(),
            image: format!(
                "https://images.unsplash.com/photo-{}?w=400&h=400&fit=crop",
                sample.photo
            ),
            artist_id: sample_artist_id(n),
            artist_name: sample.artist.to_string(),
            uploaded_at: midnight_utc(sample.uploaded),
            sold: false,
        })
        .collect()
}

fn midnight_utc((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
