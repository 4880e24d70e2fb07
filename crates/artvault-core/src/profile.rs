//! Artist statistics for the profile view.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Listing;

/// Summary numbers shown on an artist's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ArtistStats {
    pub artwork_count: usize,
    pub sold_count: usize,
    /// Sum of prices of sold listings.
    pub total_earnings: Money,
}

impl ArtistStats {
    /// Builds stats from the artist's own listings (see
    /// [`crate::catalog::listings_by_artist`]).
    pub fn from_listings(listings: &[Listing]) -> Self {
        let sold = listings.iter().filter(|l| l.sold);

        ArtistStats {
            artwork_count: listings.len(),
            sold_count: sold.clone().count(),
            total_earnings: sold.map(|l| l.price).sum(),
        }
    }

    /// Listings still for sale.
    pub fn available_count(&self) -> usize {
        self.artwork_count - self.sold_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_listings;

    #[test]
    fn test_stats_count_sold_earnings() {
        let mut listings = sample_listings();
        listings[0].sold = true; // 450
        listings[2].sold = true; // 680

        let stats = ArtistStats::from_listings(&listings);
        assert_eq!(stats.artwork_count, 6);
        assert_eq!(stats.sold_count, 2);
        assert_eq!(stats.available_count(), 4);
        assert_eq!(stats.total_earnings, Money::from_major(1130));
    }

    #[test]
    fn test_no_listings() {
        assert_eq!(ArtistStats::from_listings(&[]), ArtistStats::default());
    }
}
