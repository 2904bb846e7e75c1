//! Booking domain entity

use chrono::{NaiveDate, Utc};

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Dates are held for the guest
    Reserved,
    /// Cancelled by the guest; record is kept but no longer blocks dates
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "Reserved",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Reserved" => Self::Reserved,
            "Cancelled" => Self::Cancelled,
            // The SQL overlap filter only excludes `Cancelled`, so an
            // unrecognized stored status must keep blocking its dates.
            _ => Self::Reserved,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A guest's stay on a listing over `[check_in, check_out)`.
///
/// Dates are half-open: a check-out on day D does not conflict with a
/// check-in on the same day D.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Unique booking ID, assigned by the store on insert
    pub id: i64,
    /// Guest who owns the booking
    pub user_id: i64,
    /// Listing being booked
    pub listing_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Number of guests staying (informational)
    pub guests: i32,
    /// Flat nightly rate times number of nights
    pub total_price: i64,
    pub status: BookingStatus,
    pub created_at: NaiveDate,
}

impl Booking {
    pub fn new(
        user_id: i64,
        listing_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i32,
        total_price: i64,
    ) -> Self {
        Self {
            id: 0,
            user_id,
            listing_id,
            check_in,
            check_out,
            guests,
            total_price,
            status: BookingStatus::Reserved,
            created_at: Utc::now().date_naive(),
        }
    }

    /// Number of nights covered by this booking
    pub fn nights(&self) -> i64 {
        nights(self.check_in, self.check_out)
    }

    /// Cancel this booking (dates stay on record)
    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }

    /// Whether this booking still blocks its dates
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// Whether this booking's date interval overlaps `[check_in, check_out)`
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        intervals_overlap(self.check_in, self.check_out, check_in, check_out)
    }
}

/// Half-open interval overlap test: `[a_start, a_end)` vs `[b_start, b_end)`.
///
/// Back-to-back stays (one checks out the day the other checks in) do not
/// overlap.
pub fn intervals_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Number of nights between check-in and check-out
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_booking() -> Booking {
        Booking::new(1, 10, d("2024-06-01"), d("2024-06-05"), 2, 400)
    }

    #[test]
    fn new_booking_is_reserved() {
        let b = sample_booking();
        assert!(b.is_active());
        assert_eq!(b.status, BookingStatus::Reserved);
        assert_eq!(b.nights(), 4);
    }

    #[test]
    fn cancel_sets_cancelled() {
        let mut b = sample_booking();
        b.cancel();
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert!(!b.is_active());
    }

    #[test]
    fn overlapping_ranges_conflict() {
        let b = sample_booking();
        assert!(b.overlaps(d("2024-06-04"), d("2024-06-06")));
        assert!(b.overlaps(d("2024-05-30"), d("2024-06-02")));
        assert!(b.overlaps(d("2024-06-02"), d("2024-06-03")));
    }

    #[test]
    fn checkout_day_checkin_is_not_a_conflict() {
        let b = sample_booking();
        assert!(!b.overlaps(d("2024-06-05"), d("2024-06-08")));
        assert!(!b.overlaps(d("2024-05-28"), d("2024-06-01")));
    }

    #[test]
    fn disjoint_ranges_do_not_conflict() {
        let b = sample_booking();
        assert!(!b.overlaps(d("2024-06-10"), d("2024-06-12")));
        assert!(!b.overlaps(d("2024-05-01"), d("2024-05-04")));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            ("2024-06-01", "2024-06-05", "2024-06-04", "2024-06-06"),
            ("2024-06-01", "2024-06-05", "2024-06-05", "2024-06-08"),
            ("2024-06-01", "2024-06-05", "2024-06-02", "2024-06-03"),
        ];
        for (a1, a2, b1, b2) in cases {
            assert_eq!(
                intervals_overlap(d(a1), d(a2), d(b1), d(b2)),
                intervals_overlap(d(b1), d(b2), d(a1), d(a2)),
            );
        }
    }

    #[test]
    fn nights_counts_days() {
        assert_eq!(nights(d("2024-06-01"), d("2024-06-05")), 4);
        assert_eq!(nights(d("2024-06-01"), d("2024-06-02")), 1);
    }

    #[test]
    fn status_display_roundtrip() {
        for status in &[BookingStatus::Reserved, BookingStatus::Cancelled] {
            assert_eq!(&BookingStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_keeps_blocking_dates() {
        // Must agree with the store-level filter, which treats every
        // non-cancelled row as active.
        assert_eq!(BookingStatus::from_str("Pending"), BookingStatus::Reserved);
    }
}
