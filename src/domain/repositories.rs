//! Repository provider interface
//!
//! Bundles the per-aggregate repositories behind one object so services
//! and handlers receive a single `Arc<dyn RepositoryProvider>`.

use crate::domain::booking::BookingRepository;
use crate::domain::listing::ListingRepository;
use crate::domain::user::UserRepository;

pub trait RepositoryProvider: Send + Sync {
    fn bookings(&self) -> &dyn BookingRepository;

    fn listings(&self) -> &dyn ListingRepository;

    fn users(&self) -> &dyn UserRepository;
}
