//! Booking admission — decides whether a proposed stay may be accepted.
//!
//! All booking writes go through this service: it runs the validation
//! sequence (date ordering, past check-in, duplicate short-circuit,
//! overlap check), computes the price, and performs exactly one store
//! write per accepted proposal. Business rejections travel in
//! [`Decision`]; only infrastructure failures surface as errors.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::booking::{nights, Booking, BookingKey};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Why a proposal was turned down.
///
/// Reasons carry stable, user-facing messages; callers match on the
/// variant for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// `check_out <= check_in`
    InvalidDateOrder,
    /// Check-in before today (enforced on creation only)
    PastCheckIn,
    /// Dates overlap an active booking, or the store's uniqueness
    /// constraint rejected the commit
    Conflict,
    /// Booking or listing does not exist
    NotFound,
    /// Booking belongs to another user
    Forbidden,
}

impl RejectReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidDateOrder => "Check-out date must be after check-in date.",
            Self::PastCheckIn => "Check-in date cannot be in the past.",
            Self::Conflict => {
                "This room is already booked for the selected dates. Please choose different dates."
            }
            Self::NotFound => "Booking or listing not found.",
            Self::Forbidden => "This booking belongs to another user.",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Outcome of an admission request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Proposal passed every check and was persisted
    Accepted(Booking),
    /// An identical active booking already exists; nothing was written.
    /// Retried identical requests (double-submitted forms) land here.
    AlreadyBooked(Booking),
    /// Proposal turned down; nothing was written
    Rejected(RejectReason),
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_) | Self::AlreadyBooked(_))
    }
}

/// A candidate stay submitted by a guest
#[derive(Debug, Clone)]
pub struct ProposedStay {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
}

/// Admission component — the single gatekeeper for booking writes.
pub struct AdmissionService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AdmissionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Propose a new booking for `user_id` on `listing_id`.
    ///
    /// Validation order: listing exists, date ordering, no past check-in,
    /// exact-duplicate short-circuit, overlap check. The store's unique
    /// constraint remains the authoritative backstop: a constraint
    /// violation at commit time becomes `Rejected(Conflict)` even though
    /// the pre-checks passed.
    pub async fn reserve(&self, user_id: i64, listing_id: i64, stay: ProposedStay) -> DomainResult<Decision> {
        let Some(listing) = self.repos.listings().find_by_id(listing_id).await? else {
            return Ok(Decision::Rejected(RejectReason::NotFound));
        };

        if stay.check_out <= stay.check_in {
            return Ok(Decision::Rejected(RejectReason::InvalidDateOrder));
        }
        if stay.check_in < Utc::now().date_naive() {
            return Ok(Decision::Rejected(RejectReason::PastCheckIn));
        }

        let key = BookingKey {
            user_id,
            listing_id,
            check_in: stay.check_in,
            check_out: stay.check_out,
        };

        // Double-submitted identical request: succeed without writing
        if let Some(existing) = self.repos.bookings().find_exact_active(&key, stay.guests).await? {
            info!(booking_id = existing.id, "Identical booking already exists, no-op");
            return Ok(Decision::AlreadyBooked(existing));
        }

        let overlapping = self
            .repos
            .bookings()
            .find_active_overlapping(listing_id, stay.check_in, stay.check_out, None)
            .await?;
        if !overlapping.is_empty() {
            return Ok(Decision::Rejected(RejectReason::Conflict));
        }

        let total_price = listing.price_for(nights(stay.check_in, stay.check_out));
        let booking = Booking::new(
            user_id,
            listing_id,
            stay.check_in,
            stay.check_out,
            stay.guests,
            total_price,
        );

        match self.repos.bookings().insert(booking).await {
            Ok(saved) => {
                info!(booking_id = saved.id, listing_id, user_id, "Booking accepted");
                Ok(Decision::Accepted(saved))
            }
            // Pre-check passed but a concurrent writer got there first;
            // the constraint is the enforcement point.
            Err(DomainError::Conflict(msg)) => {
                warn!(listing_id, user_id, %msg, "Booking rejected by store constraint");
                Ok(Decision::Rejected(RejectReason::Conflict))
            }
            Err(e) => Err(e),
        }
    }

    /// Change the dates and guest count of an existing booking.
    ///
    /// The booking must belong to `user_id`. The overlap check excludes
    /// the booking itself so it never conflicts with its own dates.
    /// Past check-ins are deliberately not rejected here, matching the
    /// creation/modification asymmetry of the original flow.
    pub async fn modify(
        &self,
        booking_id: i64,
        user_id: i64,
        stay: ProposedStay,
    ) -> DomainResult<Decision> {
        let Some(mut booking) = self.repos.bookings().find_by_id(booking_id).await? else {
            return Ok(Decision::Rejected(RejectReason::NotFound));
        };
        if booking.user_id != user_id {
            return Ok(Decision::Rejected(RejectReason::Forbidden));
        }

        if stay.check_out <= stay.check_in {
            return Ok(Decision::Rejected(RejectReason::InvalidDateOrder));
        }

        let overlapping = self
            .repos
            .bookings()
            .find_active_overlapping(
                booking.listing_id,
                stay.check_in,
                stay.check_out,
                Some(booking_id),
            )
            .await?;
        if !overlapping.is_empty() {
            return Ok(Decision::Rejected(RejectReason::Conflict));
        }

        let Some(listing) = self.repos.listings().find_by_id(booking.listing_id).await? else {
            return Ok(Decision::Rejected(RejectReason::NotFound));
        };

        booking.check_in = stay.check_in;
        booking.check_out = stay.check_out;
        booking.guests = stay.guests;
        booking.total_price = listing.price_for(nights(stay.check_in, stay.check_out));

        match self.repos.bookings().update(booking.clone()).await {
            Ok(()) => {
                info!(booking_id, user_id, "Booking modified");
                Ok(Decision::Accepted(booking))
            }
            Err(DomainError::Conflict(msg)) => {
                warn!(booking_id, user_id, %msg, "Modification rejected by store constraint");
                Ok(Decision::Rejected(RejectReason::Conflict))
            }
            Err(e) => Err(e),
        }
    }

    /// Cancel a booking owned by `user_id`.
    ///
    /// Sets status to Cancelled and keeps the record; the dates stop
    /// blocking new bookings. Cancelling an already-cancelled booking
    /// succeeds without a write.
    pub async fn cancel(&self, booking_id: i64, user_id: i64) -> DomainResult<Decision> {
        let Some(mut booking) = self.repos.bookings().find_by_id(booking_id).await? else {
            return Ok(Decision::Rejected(RejectReason::NotFound));
        };
        if booking.user_id != user_id {
            return Ok(Decision::Rejected(RejectReason::Forbidden));
        }

        if !booking.is_active() {
            return Ok(Decision::Accepted(booking));
        }

        booking.cancel();
        self.repos.bookings().update(booking.clone()).await?;
        info!(booking_id, user_id, "Booking cancelled");
        Ok(Decision::Accepted(booking))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingStatus;
    use crate::domain::Listing;
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;
    use chrono::Duration;

    fn days_from_now(days: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(days)
    }

    fn stay(check_in: NaiveDate, check_out: NaiveDate) -> ProposedStay {
        ProposedStay {
            check_in,
            check_out,
            guests: 2,
        }
    }

    async fn setup() -> (Arc<InMemoryRepositoryProvider>, AdmissionService, i64) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let listing = repos
            .listing_store()
            .seed(Listing::new(99, "Ocean view studio", 100));
        let service = AdmissionService::new(repos.clone());
        (repos, service, listing.id)
    }

    #[tokio::test]
    async fn reserve_valid_stay_is_accepted() {
        let (_, service, listing_id) = setup().await;
        let decision = service
            .reserve(1, listing_id, stay(days_from_now(10), days_from_now(14)))
            .await
            .unwrap();

        let Decision::Accepted(booking) = decision else {
            panic!("expected accepted decision");
        };
        assert!(booking.id > 0);
        assert_eq!(booking.status, BookingStatus::Reserved);
        assert_eq!(booking.total_price, 400); // 4 nights * 100
    }

    #[tokio::test]
    async fn reserve_rejects_inverted_dates() {
        let (_, service, listing_id) = setup().await;
        let decision = service
            .reserve(1, listing_id, stay(days_from_now(14), days_from_now(10)))
            .await
            .unwrap();
        assert_eq!(decision, Decision::Rejected(RejectReason::InvalidDateOrder));

        // Equal dates are just as invalid
        let decision = service
            .reserve(1, listing_id, stay(days_from_now(10), days_from_now(10)))
            .await
            .unwrap();
        assert_eq!(decision, Decision::Rejected(RejectReason::InvalidDateOrder));
    }

    #[tokio::test]
    async fn reserve_rejects_past_check_in() {
        let (_, service, listing_id) = setup().await;
        let decision = service
            .reserve(1, listing_id, stay(days_from_now(-2), days_from_now(3)))
            .await
            .unwrap();
        assert_eq!(decision, Decision::Rejected(RejectReason::PastCheckIn));
    }

    #[tokio::test]
    async fn reserve_unknown_listing_is_not_found() {
        let (_, service, _) = setup().await;
        let decision = service
            .reserve(1, 12345, stay(days_from_now(10), days_from_now(12)))
            .await
            .unwrap();
        assert_eq!(decision, Decision::Rejected(RejectReason::NotFound));
    }

    #[tokio::test]
    async fn identical_resubmission_is_a_no_op() {
        let (repos, service, listing_id) = setup().await;
        let s = stay(days_from_now(10), days_from_now(14));

        let first = service.reserve(1, listing_id, s.clone()).await.unwrap();
        let Decision::Accepted(booking) = first else {
            panic!("expected accepted decision");
        };

        let second = service.reserve(1, listing_id, s).await.unwrap();
        let Decision::AlreadyBooked(existing) = second else {
            panic!("expected already-booked decision");
        };
        assert_eq!(existing.id, booking.id);

        // Exactly one booking persisted
        assert_eq!(repos.booking_store().len(), 1);
    }

    #[tokio::test]
    async fn overlapping_stay_is_rejected() {
        let (_, service, listing_id) = setup().await;
        service
            .reserve(1, listing_id, stay(days_from_now(10), days_from_now(14)))
            .await
            .unwrap();

        // Other guest, overlapping on the second-to-last night
        let decision = service
            .reserve(2, listing_id, stay(days_from_now(13), days_from_now(15)))
            .await
            .unwrap();
        assert_eq!(decision, Decision::Rejected(RejectReason::Conflict));
    }

    #[tokio::test]
    async fn back_to_back_stays_do_not_conflict() {
        let (_, service, listing_id) = setup().await;
        service
            .reserve(1, listing_id, stay(days_from_now(10), days_from_now(14)))
            .await
            .unwrap();

        // Checks in the day the other guest checks out
        let decision = service
            .reserve(2, listing_id, stay(days_from_now(14), days_from_now(17)))
            .await
            .unwrap();
        assert!(matches!(decision, Decision::Accepted(_)));
    }

    #[tokio::test]
    async fn cancelled_booking_does_not_block_new_ones() {
        let (_, service, listing_id) = setup().await;
        let decision = service
            .reserve(1, listing_id, stay(days_from_now(10), days_from_now(14)))
            .await
            .unwrap();
        let Decision::Accepted(booking) = decision else {
            panic!("expected accepted decision");
        };

        service.cancel(booking.id, 1).await.unwrap();

        // Overlapping range, different guest: admitted now
        let decision = service
            .reserve(2, listing_id, stay(days_from_now(11), days_from_now(13)))
            .await
            .unwrap();
        assert!(matches!(decision, Decision::Accepted(_)));
    }

    #[tokio::test]
    async fn constraint_backstop_surfaces_conflict() {
        let (_, service, listing_id) = setup().await;
        let s = stay(days_from_now(10), days_from_now(14));
        let decision = service.reserve(1, listing_id, s.clone()).await.unwrap();
        let Decision::Accepted(booking) = decision else {
            panic!("expected accepted decision");
        };

        // Cancelling frees the dates for the overlap pre-check, but the
        // unique (user, listing, check_in, check_out) row is still there,
        // so the commit itself is refused.
        service.cancel(booking.id, 1).await.unwrap();
        let decision = service.reserve(1, listing_id, s).await.unwrap();
        assert_eq!(decision, Decision::Rejected(RejectReason::Conflict));
    }

    #[tokio::test]
    async fn modify_excludes_itself_from_overlap_check() {
        let (_, service, listing_id) = setup().await;
        let decision = service
            .reserve(1, listing_id, stay(days_from_now(10), days_from_now(14)))
            .await
            .unwrap();
        let Decision::Accepted(booking) = decision else {
            panic!("expected accepted decision");
        };

        // Shift by one day; new range overlaps the booking's own old range
        let decision = service
            .modify(booking.id, 1, stay(days_from_now(11), days_from_now(15)))
            .await
            .unwrap();
        let Decision::Accepted(updated) = decision else {
            panic!("expected accepted decision");
        };
        assert_eq!(updated.check_in, days_from_now(11));
        assert_eq!(updated.total_price, 400); // still 4 nights
    }

    #[tokio::test]
    async fn modify_allows_past_check_in() {
        let (_, service, listing_id) = setup().await;
        let decision = service
            .reserve(1, listing_id, stay(days_from_now(10), days_from_now(14)))
            .await
            .unwrap();
        let Decision::Accepted(booking) = decision else {
            panic!("expected accepted decision");
        };

        // The past-date rule only gates new reservations; an existing
        // booking may be amended onto dates that have already started.
        let decision = service
            .modify(booking.id, 1, stay(days_from_now(-3), days_from_now(2)))
            .await
            .unwrap();
        let Decision::Accepted(updated) = decision else {
            panic!("expected accepted decision");
        };
        assert_eq!(updated.check_in, days_from_now(-3));
        assert_eq!(updated.total_price, 500); // 5 nights * 100
    }

    #[tokio::test]
    async fn modify_rejects_conflict_with_other_booking() {
        let (_, service, listing_id) = setup().await;
        service
            .reserve(1, listing_id, stay(days_from_now(10), days_from_now(14)))
            .await
            .unwrap();
        let decision = service
            .reserve(2, listing_id, stay(days_from_now(14), days_from_now(17)))
            .await
            .unwrap();
        let Decision::Accepted(second) = decision else {
            panic!("expected accepted decision");
        };

        // Second guest tries to move onto the first guest's nights
        let decision = service
            .modify(second.id, 2, stay(days_from_now(13), days_from_now(17)))
            .await
            .unwrap();
        assert_eq!(decision, Decision::Rejected(RejectReason::Conflict));
    }

    #[tokio::test]
    async fn modify_requires_ownership() {
        let (_, service, listing_id) = setup().await;
        let decision = service
            .reserve(1, listing_id, stay(days_from_now(10), days_from_now(14)))
            .await
            .unwrap();
        let Decision::Accepted(booking) = decision else {
            panic!("expected accepted decision");
        };

        let decision = service
            .modify(booking.id, 2, stay(days_from_now(20), days_from_now(22)))
            .await
            .unwrap();
        assert_eq!(decision, Decision::Rejected(RejectReason::Forbidden));
    }

    #[tokio::test]
    async fn cancel_is_idempotent() {
        let (repos, service, listing_id) = setup().await;
        let decision = service
            .reserve(1, listing_id, stay(days_from_now(10), days_from_now(14)))
            .await
            .unwrap();
        let Decision::Accepted(booking) = decision else {
            panic!("expected accepted decision");
        };

        let first = service.cancel(booking.id, 1).await.unwrap();
        assert!(first.is_accepted());
        let writes_after_first = repos.booking_store().update_count();

        let second = service.cancel(booking.id, 1).await.unwrap();
        assert!(second.is_accepted());
        // No second write happened
        assert_eq!(repos.booking_store().update_count(), writes_after_first);
    }

    #[tokio::test]
    async fn cancel_unknown_or_foreign_booking_is_rejected() {
        let (_, service, listing_id) = setup().await;
        let decision = service.cancel(777, 1).await.unwrap();
        assert_eq!(decision, Decision::Rejected(RejectReason::NotFound));

        let decision = service
            .reserve(1, listing_id, stay(days_from_now(10), days_from_now(14)))
            .await
            .unwrap();
        let Decision::Accepted(booking) = decision else {
            panic!("expected accepted decision");
        };
        let decision = service.cancel(booking.id, 2).await.unwrap();
        assert_eq!(decision, Decision::Rejected(RejectReason::Forbidden));
    }

    #[tokio::test]
    async fn listing_exclusivity_holds_after_admissions() {
        let (repos, service, listing_id) = setup().await;
        // A mix of accepted and rejected proposals
        for (user, from, to) in [
            (1, 10, 14),
            (2, 14, 17), // back-to-back, accepted
            (3, 12, 15), // overlap, rejected
            (4, 17, 20), // accepted
            (5, 9, 11),  // overlap, rejected
        ] {
            let _ = service
                .reserve(user, listing_id, stay(days_from_now(from), days_from_now(to)))
                .await
                .unwrap();
        }

        let all = repos.booking_store().all();
        let active: Vec<_> = all.iter().filter(|b| b.is_active()).collect();
        for (i, a) in active.iter().enumerate() {
            for b in active.iter().skip(i + 1) {
                assert!(
                    !a.overlaps(b.check_in, b.check_out),
                    "active bookings {} and {} overlap",
                    a.id,
                    b.id
                );
            }
        }
    }
}
