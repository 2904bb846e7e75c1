//! In-memory repository implementations for development and testing.
//!
//! Mirrors the SeaORM repositories' observable behavior, including the
//! unique `(user, listing, check_in, check_out)` booking constraint and
//! the all-or-nothing delete batch. Service tests also use the call
//! counters to assert on write/transaction behavior.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::booking::{Booking, BookingKey, BookingRepository};
use crate::domain::listing::{Listing, ListingRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

fn key_of(b: &Booking) -> BookingKey {
    BookingKey {
        user_id: b.user_id,
        listing_id: b.listing_id,
        check_in: b.check_in,
        check_out: b.check_out,
    }
}

// ── Bookings ───────────────────────────────────────────────────

pub struct InMemoryBookingStore {
    rows: RwLock<Vec<Booking>>,
    next_id: AtomicI64,
    updates: AtomicU64,
    delete_batches: AtomicU64,
    fail_next_delete: AtomicBool,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            updates: AtomicU64::new(0),
            delete_batches: AtomicU64::new(0),
            fail_next_delete: AtomicBool::new(false),
        }
    }
}

impl Default for InMemoryBookingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBookingStore {

    /// Insert a row directly, bypassing the uniqueness constraint —
    /// stands in for rows that predate the constraint.
    pub fn seed(&self, mut booking: Booking) -> Booking {
        if booking.id == 0 {
            booking.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        } else {
            let next = self.next_id.load(Ordering::SeqCst).max(booking.id + 1);
            self.next_id.store(next, Ordering::SeqCst);
        }
        self.rows.write().unwrap().push(booking.clone());
        booking
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn all(&self) -> Vec<Booking> {
        self.rows.read().unwrap().clone()
    }

    /// Number of `update` calls that reached the store
    pub fn update_count(&self) -> u64 {
        self.updates.load(Ordering::SeqCst)
    }

    /// Number of transactional delete batches executed
    pub fn delete_batch_calls(&self) -> u64 {
        self.delete_batches.load(Ordering::SeqCst)
    }

    /// Make the next `delete_batch` fail before touching any row
    pub fn fail_next_delete_batch(&self) {
        self.fail_next_delete.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingStore {
    async fn insert(&self, mut booking: Booking) -> DomainResult<Booking> {
        let mut rows = self.rows.write().unwrap();
        let key = key_of(&booking);
        if rows.iter().any(|b| key_of(b) == key) {
            return Err(DomainError::Conflict(
                "booking with identical user, listing and dates already exists".into(),
            ));
        }
        booking.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.push(booking.clone());
        Ok(booking)
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        let mut rows = self.rows.write().unwrap();
        let key = key_of(&booking);
        if rows.iter().any(|b| b.id != booking.id && key_of(b) == key) {
            return Err(DomainError::Conflict(
                "booking with identical user, listing and dates already exists".into(),
            ));
        }
        let Some(slot) = rows.iter_mut().find(|b| b.id == booking.id) else {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking.id.to_string(),
            });
        };
        *slot = booking;
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        Ok(self.rows.read().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn find_for_user(&self, user_id: i64) -> DomainResult<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .rows
            .read()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by_key(|b| std::cmp::Reverse(b.id));
        Ok(found)
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let mut found = self.all();
        found.sort_by_key(|b| std::cmp::Reverse(b.id));
        Ok(found)
    }

    async fn find_active_overlapping(
        &self,
        listing_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_id: Option<i64>,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .iter()
            .filter(|b| {
                b.listing_id == listing_id
                    && b.is_active()
                    && b.overlaps(check_in, check_out)
                    && exclude_id != Some(b.id)
            })
            .cloned()
            .collect())
    }

    async fn find_exact_active(
        &self,
        key: &BookingKey,
        guests: i32,
    ) -> DomainResult<Option<Booking>> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .iter()
            .find(|b| b.is_active() && key_of(b) == *key && b.guests == guests)
            .cloned())
    }

    async fn duplicate_groups(&self) -> DomainResult<Vec<(BookingKey, u64)>> {
        let mut counts: HashMap<BookingKey, u64> = HashMap::new();
        for b in self.rows.read().unwrap().iter() {
            *counts.entry(key_of(b)).or_default() += 1;
        }
        let mut groups: Vec<(BookingKey, u64)> =
            counts.into_iter().filter(|(_, n)| *n > 1).collect();
        groups.sort_by_key(|(k, _)| (k.user_id, k.listing_id, k.check_in));
        Ok(groups)
    }

    async fn find_by_key(&self, key: &BookingKey) -> DomainResult<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .rows
            .read()
            .unwrap()
            .iter()
            .filter(|b| key_of(b) == *key)
            .cloned()
            .collect();
        found.sort_by_key(|b| b.id);
        Ok(found)
    }

    async fn delete_batch(&self, ids: &[i64]) -> DomainResult<u64> {
        if self.fail_next_delete.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Storage("simulated transaction failure".into()));
        }
        let mut rows = self.rows.write().unwrap();
        let before = rows.len();
        rows.retain(|b| !ids.contains(&b.id));
        self.delete_batches.fetch_add(1, Ordering::SeqCst);
        Ok((before - rows.len()) as u64)
    }
}

// ── Listings ───────────────────────────────────────────────────

pub struct InMemoryListingStore {
    rows: RwLock<Vec<Listing>>,
    next_id: AtomicI64,
}

impl Default for InMemoryListingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryListingStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn seed(&self, mut listing: Listing) -> Listing {
        if listing.id == 0 {
            listing.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        }
        self.rows.write().unwrap().push(listing.clone());
        listing
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingStore {
    async fn insert(&self, mut listing: Listing) -> DomainResult<Listing> {
        listing.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.rows.write().unwrap().push(listing.clone());
        Ok(listing)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Listing>> {
        Ok(self.rows.read().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn find_page(&self, offset: u64, limit: u64) -> DomainResult<Vec<Listing>> {
        let mut all = self.rows.read().unwrap().clone();
        all.sort_by_key(|l| std::cmp::Reverse(l.id));
        Ok(all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.rows.read().unwrap().len() as u64)
    }

    async fn find_by_host(&self, host_id: i64) -> DomainResult<Vec<Listing>> {
        let mut found: Vec<Listing> = self
            .rows
            .read()
            .unwrap()
            .iter()
            .filter(|l| l.host_id == host_id)
            .cloned()
            .collect();
        found.sort_by_key(|l| std::cmp::Reverse(l.id));
        Ok(found)
    }
}

// ── Users ──────────────────────────────────────────────────────

pub struct InMemoryUserStore {
    rows: RwLock<Vec<User>>,
    next_id: AtomicI64,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn seed(&self, mut user: User) -> User {
        if user.id == 0 {
            user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        }
        self.rows.write().unwrap().push(user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn insert(&self, mut user: User) -> DomainResult<User> {
        let mut rows = self.rows.write().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }
        user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> DomainResult<()> {
        let mut rows = self.rows.write().unwrap();
        let Some(slot) = rows.iter_mut().find(|u| u.id == user.id) else {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user.id.to_string(),
            });
        };
        *slot = user;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.rows.read().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_page(&self, offset: u64, limit: u64) -> DomainResult<Vec<User>> {
        let mut all = self.rows.read().unwrap().clone();
        all.sort_by_key(|u| std::cmp::Reverse(u.id));
        Ok(all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.rows.read().unwrap().len() as u64)
    }
}

// ── Provider ───────────────────────────────────────────────────

/// In-memory repository provider for development and testing
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    bookings: InMemoryBookingStore,
    listings: InMemoryListingStore,
    users: InMemoryUserStore,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct access for test seeding and assertions
    pub fn booking_store(&self) -> &InMemoryBookingStore {
        &self.bookings
    }

    pub fn listing_store(&self) -> &InMemoryListingStore {
        &self.listings
    }

    pub fn user_store(&self) -> &InMemoryUserStore {
        &self.users
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn listings(&self) -> &dyn ListingRepository {
        &self.listings
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
