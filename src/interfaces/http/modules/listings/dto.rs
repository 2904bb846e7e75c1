//! Listing DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::NewListing;
use crate::domain::Listing;

/// Request to publish a new listing
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateListingRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    /// Rate per night, in minor currency units (must be positive)
    #[validate(range(min = 1))]
    pub nightly_rate: i64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub room_type: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub available_to: Option<NaiveDate>,
}

impl From<CreateListingRequest> for NewListing {
    fn from(r: CreateListingRequest) -> Self {
        NewListing {
            title: r.title,
            description: r.description,
            nightly_rate: r.nightly_rate,
            address: r.address,
            city: r.city,
            state: r.state,
            zipcode: r.zipcode,
            room_type: r.room_type,
            available_from: r.available_from,
            available_to: r.available_to,
        }
    }
}

/// Listing details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ListingDto {
    pub id: i64,
    pub host_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub nightly_rate: i64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub room_type: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub available_to: Option<NaiveDate>,
    pub status: String,
    pub created_at: NaiveDate,
}

impl From<Listing> for ListingDto {
    fn from(l: Listing) -> Self {
        Self {
            id: l.id,
            host_id: l.host_id,
            title: l.title,
            description: l.description,
            nightly_rate: l.nightly_rate,
            address: l.address,
            city: l.city,
            state: l.state,
            zipcode: l.zipcode,
            room_type: l.room_type,
            available_from: l.available_from,
            available_to: l.available_to,
            status: l.status.as_str().to_string(),
            created_at: l.created_at,
        }
    }
}
