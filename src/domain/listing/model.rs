//! Listing domain entity

use chrono::{NaiveDate, Utc};

/// Listing availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Available,
    Unlisted,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unlisted => "Unlisted",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Available" => Self::Available,
            _ => Self::Unlisted,
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A property offered for rent by a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: i64,
    /// Host who owns the listing
    pub host_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Flat rate per night, in minor currency units
    pub nightly_rate: i64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub room_type: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub available_to: Option<NaiveDate>,
    pub status: ListingStatus,
    pub created_at: NaiveDate,
}

impl Listing {
    pub fn new(host_id: i64, title: impl Into<String>, nightly_rate: i64) -> Self {
        Self {
            id: 0,
            host_id,
            title: title.into(),
            description: None,
            nightly_rate,
            address: None,
            city: None,
            state: None,
            zipcode: None,
            room_type: None,
            available_from: None,
            available_to: None,
            status: ListingStatus::Available,
            created_at: Utc::now().date_naive(),
        }
    }

    /// Price for a stay of `nights` nights at the flat nightly rate
    pub fn price_for(&self, nights: i64) -> i64 {
        nights * self.nightly_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_is_nights_times_rate() {
        let l = Listing::new(1, "Ocean view studio", 120);
        assert_eq!(l.price_for(4), 480);
        assert_eq!(l.price_for(0), 0);
    }

    #[test]
    fn new_listing_is_available() {
        let l = Listing::new(1, "Loft", 90);
        assert_eq!(l.status, ListingStatus::Available);
    }
}
