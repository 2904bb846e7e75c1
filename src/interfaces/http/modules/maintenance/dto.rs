//! Maintenance DTOs

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::booking::reconciliation::{GroupOutcome, ReconciliationReport};

/// One collapsed duplicate group
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupOutcomeDto {
    pub user_id: i64,
    pub listing_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Booking kept (smallest ID in the group)
    pub survivor_id: i64,
    pub deleted_ids: Vec<i64>,
}

impl From<GroupOutcome> for GroupOutcomeDto {
    fn from(g: GroupOutcome) -> Self {
        Self {
            user_id: g.key.user_id,
            listing_id: g.key.listing_id,
            check_in: g.key.check_in,
            check_out: g.key.check_out,
            survivor_id: g.survivor_id,
            deleted_ids: g.deleted_ids,
        }
    }
}

/// Result of a duplicate-booking reconciliation run
#[derive(Debug, Serialize, ToSchema)]
pub struct ReconciliationReportDto {
    pub groups_found: u64,
    pub total_deleted: u64,
    pub groups: Vec<GroupOutcomeDto>,
}

impl From<ReconciliationReport> for ReconciliationReportDto {
    fn from(r: ReconciliationReport) -> Self {
        Self {
            groups_found: r.groups_found,
            total_deleted: r.total_deleted,
            groups: r.groups.into_iter().map(GroupOutcomeDto::from).collect(),
        }
    }
}
