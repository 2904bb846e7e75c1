//! Listing use-cases: hosts publish properties, guests browse them.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{DomainResult, Listing, RepositoryProvider};
use crate::shared::{PaginatedResult, PaginationParams};

/// Fields a host supplies when publishing a property
#[derive(Debug, Clone, Default)]
pub struct NewListing {
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
}

pub struct ListingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ListingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Publish a new listing owned by `host_id`
    pub async fn create(&self, host_id: i64, new: NewListing) -> DomainResult<Listing> {
        let mut listing = Listing::new(host_id, new.title, new.nightly_rate);
        listing.description = new.description;
        listing.address = new.address;
        listing.city = new.city;
        listing.state = new.state;
        listing.zipcode = new.zipcode;
        listing.room_type = new.room_type;
        listing.available_from = new.available_from;
        listing.available_to = new.available_to;

        let listing = self.repos.listings().insert(listing).await?;
        info!(listing_id = listing.id, host_id, "Listing created");
        Ok(listing)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Option<Listing>> {
        self.repos.listings().find_by_id(id).await
    }

    /// Page of listings, newest first
    pub async fn list(&self, params: PaginationParams) -> DomainResult<PaginatedResult<Listing>> {
        let total = self.repos.listings().count().await?;
        let items = self
            .repos
            .listings()
            .find_page(params.offset(), params.limit as u64)
            .await?;
        Ok(PaginatedResult::new(items, total, params.page, params.limit))
    }

    /// Listings owned by a host, newest first
    pub async fn list_by_host(&self, host_id: i64) -> DomainResult<Vec<Listing>> {
        self.repos.listings().find_by_host(host_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;

    #[tokio::test]
    async fn create_and_page_listings() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let svc = ListingService::new(repos);

        for i in 0..3 {
            svc.create(
                7,
                NewListing {
                    title: format!("Listing {}", i),
                    nightly_rate: 100 + i,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }

        let page = svc
            .list(PaginationParams { page: 1, limit: 2 })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, 2);
        // Newest first
        assert_eq!(page.items[0].title, "Listing 2");

        let mine = svc.list_by_host(7).await.unwrap();
        assert_eq!(mine.len(), 3);
    }
}
