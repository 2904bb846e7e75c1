//! Maintenance API handlers (admin only)

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::dto::ReconciliationReportDto;
use crate::application::ReconciliationService;
use crate::interfaces::http::common::{error_response, ApiResponse};

/// Maintenance handlers state
#[derive(Clone)]
pub struct MaintenanceHandlerState {
    pub reconciliation: Arc<ReconciliationService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/maintenance/reconcile-bookings",
    tag = "Maintenance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reconciliation report", body = ApiResponse<ReconciliationReportDto>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn reconcile_bookings(
    State(state): State<MaintenanceHandlerState>,
) -> Result<
    Json<ApiResponse<ReconciliationReportDto>>,
    (StatusCode, Json<ApiResponse<ReconciliationReportDto>>),
> {
    let report = state
        .reconciliation
        .reconcile()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(report.into())))
}
