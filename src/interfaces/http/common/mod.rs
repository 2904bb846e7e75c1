//! Common API response types

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::shared::PaginatedResult;

/// Standard API response envelope.
///
/// Every REST endpoint wraps its payload in this.
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload, `null` on error
    pub data: Option<T>,
    /// Error description, `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Pagination query parameters for list endpoints
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (1-100). Default: 20
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl PaginationQuery {
    pub fn clamped(&self) -> crate::shared::PaginationParams {
        crate::shared::PaginationParams {
            page: self.page.max(1),
            limit: self.limit.clamp(1, 100),
        }
    }
}

/// A page of items with paging metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total items across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Map a domain page into a response page, converting each item.
    pub fn from_result<U>(result: PaginatedResult<U>, f: impl Fn(U) -> T) -> Self {
        Self {
            items: result.items.into_iter().map(f).collect(),
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

/// Map a domain error onto an HTTP status + error envelope.
pub fn error_response<T>(e: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_maps_status_codes() {
        let (status, _) = error_response::<EmptyData>(DomainError::NotFound {
            entity: "Booking",
            field: "id",
            value: "7".into(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = error_response::<EmptyData>(DomainError::Conflict("dup".into()));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = error_response::<EmptyData>(DomainError::Storage("db gone".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn pagination_query_clamps_out_of_range_values() {
        let q = PaginationQuery { page: 0, limit: 500 };
        let params = q.clamped();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 100);
    }
}
