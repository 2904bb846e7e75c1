//! Listing repository interface

use async_trait::async_trait;

use super::model::Listing;
use crate::domain::DomainResult;

#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Insert a new listing and return it with its assigned ID
    async fn insert(&self, listing: Listing) -> DomainResult<Listing>;

    /// Find listing by ID
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Listing>>;

    /// Page of listings, newest first
    async fn find_page(&self, offset: u64, limit: u64) -> DomainResult<Vec<Listing>>;

    /// Total number of listings
    async fn count(&self) -> DomainResult<u64>;

    /// All listings owned by a host, newest first
    async fn find_by_host(&self, host_id: i64) -> DomainResult<Vec<Listing>>;
}
