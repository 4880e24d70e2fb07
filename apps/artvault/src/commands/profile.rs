//! # Profile Command
//!
//! The signed-in artist's page: account details, their listings, and sales
//! numbers.

use serde::Serialize;
use tracing::debug;

use artvault_core::catalog::listings_by_artist;
use artvault_core::{Account, ArtistStats, Listing};

use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

/// Everything shown on the profile page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub account: Account,
    pub stats: ArtistStats,
    /// Listings still for sale.
    pub available: usize,
    /// Every listing the account uploaded, sold ones included.
    pub listings: Vec<Listing>,
    pub formatted_earnings: String,
}

/// Builds the profile for the signed-in account.
pub fn get_profile(session: &SessionState, config: &ConfigState) -> Result<ProfileResponse, ApiError> {
    debug!("get_profile command");

    let (account, listings) = session.with_session(|s| {
        let account = s.require_account("view your profile")?.clone();
        let listings = listings_by_artist(&s.listings, &account.id);
        Ok::<_, ApiError>((account, listings))
    })?;

    let stats = ArtistStats::from_listings(&listings);
    Ok(ProfileResponse {
        formatted_earnings: config.format_currency(stats.total_earnings.cents()),
        available: stats.available_count(),
        account,
        stats,
        listings,
    })
}
