//! Duplicate-booking reconciliation.
//!
//! Historic data (from before the store enforced uniqueness on
//! `(user, listing, check_in, check_out)`) can contain several rows for
//! the same logical booking. This service collapses each duplicate group
//! to its earliest-created row and deletes the rest in one transaction.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::booking::BookingKey;
use crate::domain::{DomainResult, RepositoryProvider};

/// What happened to one duplicate group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutcome {
    pub key: BookingKey,
    /// The booking kept — always the smallest ID in the group, so the
    /// earliest-created record wins over retried or racing copies.
    pub survivor_id: i64,
    /// IDs removed from the group
    pub deleted_ids: Vec<i64>,
}

/// Summary of one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    pub groups_found: u64,
    pub groups: Vec<GroupOutcome>,
    pub total_deleted: u64,
}

/// Reconciliation component — offline/maintenance repair of the
/// logical-uniqueness invariant.
pub struct ReconciliationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReconciliationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Find duplicate groups and collapse each to its smallest-id row.
    ///
    /// Grouping ignores status: a Cancelled and a Reserved booking with
    /// identical key are the same logical booking and one is removed.
    /// All deletions run in a single transaction; with zero duplicate
    /// groups no transaction is opened at all. The scan is read-only, so
    /// a failed run is safe to retry from scratch, and a clean store
    /// makes the whole operation a no-op — running twice deletes nothing
    /// the second time.
    pub async fn reconcile(&self) -> DomainResult<ReconciliationReport> {
        let duplicates = self.repos.bookings().duplicate_groups().await?;

        if duplicates.is_empty() {
            info!("No duplicate bookings found, nothing to clean");
            return Ok(ReconciliationReport::default());
        }

        info!(groups = duplicates.len(), "Found duplicate booking groups");

        let mut groups = Vec::with_capacity(duplicates.len());
        let mut doomed: Vec<i64> = Vec::new();

        for (key, count) in &duplicates {
            // Ascending ID: the first member is the earliest-created row
            let members = self.repos.bookings().find_by_key(key).await?;
            let Some(survivor) = members.first() else {
                // Group vanished between the scan and the read
                warn!(?key, "Duplicate group disappeared before cleanup");
                continue;
            };
            if members.len() < 2 {
                continue;
            }

            let deleted_ids: Vec<i64> = members[1..].iter().map(|b| b.id).collect();
            info!(
                survivor_id = survivor.id,
                duplicates = count,
                user_id = key.user_id,
                listing_id = key.listing_id,
                "Keeping earliest booking of duplicate group"
            );
            doomed.extend_from_slice(&deleted_ids);
            groups.push(GroupOutcome {
                key: key.clone(),
                survivor_id: survivor.id,
                deleted_ids,
            });
        }

        // One transaction for the whole batch: an interrupted run never
        // leaves a group partially cleaned.
        let total_deleted = if doomed.is_empty() {
            0
        } else {
            self.repos.bookings().delete_batch(&doomed).await?
        };

        info!(
            groups = groups.len(),
            total_deleted, "Duplicate booking cleanup complete"
        );

        Ok(ReconciliationReport {
            groups_found: groups.len() as u64,
            groups,
            total_deleted,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{Booking, BookingStatus};
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn booking(id: i64, user_id: i64, listing_id: i64, check_in: &str, check_out: &str) -> Booking {
        Booking {
            id,
            user_id,
            listing_id,
            check_in: d(check_in),
            check_out: d(check_out),
            guests: 2,
            total_price: 300,
            status: BookingStatus::Reserved,
            created_at: d("2024-01-01"),
        }
    }

    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;

    fn setup() -> (Arc<InMemoryRepositoryProvider>, ReconciliationService) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let service = ReconciliationService::new(repos.clone());
        (repos, service)
    }

    #[tokio::test]
    async fn clean_store_reports_zero_and_opens_no_transaction() {
        let (repos, service) = setup();
        repos
            .booking_store()
            .seed(booking(1, 1, 10, "2024-06-01", "2024-06-05"));
        repos
            .booking_store()
            .seed(booking(2, 2, 10, "2024-06-05", "2024-06-08"));

        let report = service.reconcile().await.unwrap();

        assert_eq!(report.groups_found, 0);
        assert_eq!(report.total_deleted, 0);
        assert_eq!(repos.booking_store().delete_batch_calls(), 0);
        assert_eq!(repos.booking_store().len(), 2);
    }

    #[tokio::test]
    async fn smallest_id_survives() {
        let (repos, service) = setup();
        // Same logical booking stored under ids 5, 2, 9
        for id in [5, 2, 9] {
            repos
                .booking_store()
                .seed(booking(id, 1, 10, "2024-06-01", "2024-06-05"));
        }

        let report = service.reconcile().await.unwrap();

        assert_eq!(report.groups_found, 1);
        assert_eq!(report.groups[0].survivor_id, 2);
        assert_eq!(report.groups[0].deleted_ids, vec![5, 9]);
        assert_eq!(report.total_deleted, 2);

        let remaining = repos.booking_store().all();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 2);
    }

    #[tokio::test]
    async fn multiple_groups_cleaned_in_one_batch() {
        let (repos, service) = setup();
        // Group A: user 1, two copies
        repos
            .booking_store()
            .seed(booking(1, 1, 10, "2024-06-01", "2024-06-05"));
        repos
            .booking_store()
            .seed(booking(3, 1, 10, "2024-06-01", "2024-06-05"));
        // Group B: user 2 on another listing, three copies
        for id in [2, 4, 6] {
            repos
                .booking_store()
                .seed(booking(id, 2, 20, "2024-07-01", "2024-07-03"));
        }
        // Unrelated singleton
        repos
            .booking_store()
            .seed(booking(7, 3, 10, "2024-08-01", "2024-08-02"));

        let report = service.reconcile().await.unwrap();

        assert_eq!(report.groups_found, 2);
        assert_eq!(report.total_deleted, 3);
        // Whole batch went through a single transactional call
        assert_eq!(repos.booking_store().delete_batch_calls(), 1);
        assert_eq!(repos.booking_store().len(), 3);
    }

    #[tokio::test]
    async fn grouping_ignores_status() {
        let (repos, service) = setup();
        let mut cancelled = booking(1, 1, 10, "2024-06-01", "2024-06-05");
        cancelled.status = BookingStatus::Cancelled;
        repos.booking_store().seed(cancelled);
        repos
            .booking_store()
            .seed(booking(2, 1, 10, "2024-06-01", "2024-06-05"));

        let report = service.reconcile().await.unwrap();

        // Cancelled + Reserved with the same key are one logical booking;
        // the earlier (cancelled) row wins.
        assert_eq!(report.groups_found, 1);
        assert_eq!(report.groups[0].survivor_id, 1);
        assert_eq!(repos.booking_store().len(), 1);
    }

    #[tokio::test]
    async fn reconcile_is_idempotent() {
        let (repos, service) = setup();
        for id in [1, 2, 3] {
            repos
                .booking_store()
                .seed(booking(id, 1, 10, "2024-06-01", "2024-06-05"));
        }

        let first = service.reconcile().await.unwrap();
        assert_eq!(first.total_deleted, 2);

        let second = service.reconcile().await.unwrap();
        assert_eq!(second.groups_found, 0);
        assert_eq!(second.total_deleted, 0);
        assert_eq!(repos.booking_store().len(), 1);
    }

    #[tokio::test]
    async fn failed_batch_rolls_back_everything() {
        let (repos, service) = setup();
        for id in [1, 2] {
            repos
                .booking_store()
                .seed(booking(id, 1, 10, "2024-06-01", "2024-06-05"));
        }
        for id in [3, 4] {
            repos
                .booking_store()
                .seed(booking(id, 2, 20, "2024-07-01", "2024-07-04"));
        }
        repos.booking_store().fail_next_delete_batch();

        let err = service.reconcile().await.unwrap_err();
        assert!(err.is_transient());

        // Nothing was deleted: the batch is all-or-nothing
        assert_eq!(repos.booking_store().len(), 4);

        // Retry from scratch succeeds
        let report = service.reconcile().await.unwrap();
        assert_eq!(report.total_deleted, 2);
        assert_eq!(repos.booking_store().len(), 2);
    }
}
