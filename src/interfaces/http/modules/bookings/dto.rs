//! Booking DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::ProposedStay;
use crate::domain::Booking;

/// Request to reserve a stay on a listing
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub listing_id: i64,
    /// First night of the stay
    pub check_in: NaiveDate,
    /// Morning of departure; not part of the stay
    pub check_out: NaiveDate,
    #[validate(range(min = 1, max = 16))]
    #[serde(default = "default_guests")]
    pub guests: i32,
}

/// Request to move an existing booking to new dates
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ModifyBookingRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, max = 16))]
    #[serde(default = "default_guests")]
    pub guests: i32,
}

fn default_guests() -> i32 {
    1
}

impl CreateBookingRequest {
    pub fn stay(&self) -> ProposedStay {
        ProposedStay {
            check_in: self.check_in,
            check_out: self.check_out,
            guests: self.guests,
        }
    }
}

impl ModifyBookingRequest {
    pub fn stay(&self) -> ProposedStay {
        ProposedStay {
            check_in: self.check_in,
            check_out: self.check_out,
            guests: self.guests,
        }
    }
}

/// Booking details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: i64,
    pub user_id: i64,
    pub listing_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    /// Nights times the listing's nightly rate, in minor currency units
    pub total_price: i64,
    pub nights: i64,
    pub status: String,
    pub created_at: NaiveDate,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            listing_id: b.listing_id,
            check_in: b.check_in,
            check_out: b.check_out,
            guests: b.guests,
            total_price: b.total_price,
            nights: b.nights(),
            status: b.status.as_str().to_string(),
            created_at: b.created_at,
        }
    }
}
