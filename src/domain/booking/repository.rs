//! Booking repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::Booking;
use crate::domain::DomainResult;

/// Grouping key for logically-identical bookings.
///
/// Two bookings with the same key are duplicates regardless of status;
/// the store enforces uniqueness on this tuple going forward.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingKey {
    pub user_id: i64,
    pub listing_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking and return it with its assigned ID.
    ///
    /// Returns `DomainError::Conflict` if the store's uniqueness constraint
    /// on `(user, listing, check_in, check_out)` rejects the write.
    async fn insert(&self, booking: Booking) -> DomainResult<Booking>;

    /// Update an existing booking's mutable fields
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>>;

    /// All bookings for a user, newest first
    async fn find_for_user(&self, user_id: i64) -> DomainResult<Vec<Booking>>;

    /// All bookings, newest first
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Active bookings on `listing_id` whose `[check_in, check_out)` interval
    /// overlaps the given range, excluding `exclude_id` if set.
    ///
    /// Overlap predicate: `existing.check_in < check_out AND
    /// existing.check_out > check_in`. Cancelled bookings never match.
    async fn find_active_overlapping(
        &self,
        listing_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_id: Option<i64>,
    ) -> DomainResult<Vec<Booking>>;

    /// Active booking identical in `(user, listing, check_in, check_out,
    /// guests)`, if one exists — the duplicate-submit short-circuit.
    async fn find_exact_active(
        &self,
        key: &BookingKey,
        guests: i32,
    ) -> DomainResult<Option<Booking>>;

    /// Keys that identify more than one booking (any status), with the
    /// number of bookings sharing each key.
    async fn duplicate_groups(&self) -> DomainResult<Vec<(BookingKey, u64)>>;

    /// All bookings sharing a key, ordered by ascending ID
    async fn find_by_key(&self, key: &BookingKey) -> DomainResult<Vec<Booking>>;

    /// Delete the given bookings in a single transaction: either every
    /// row is removed or, on failure, none are.
    async fn delete_batch(&self, ids: &[i64]) -> DomainResult<u64>;
}
