//! Listing API handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{CreateListingRequest, ListingDto};
use crate::application::ListingService;
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, PaginationQuery, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Listing handlers state
#[derive(Clone)]
pub struct ListingHandlerState {
    pub listings: Arc<ListingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/listings",
    tag = "Listings",
    security(("bearer_auth" = [])),
    request_body = CreateListingRequest,
    responses(
        (status = 201, description = "Listing published", body = ApiResponse<ListingDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_listing(
    State(state): State<ListingHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateListingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ListingDto>>), (StatusCode, Json<ApiResponse<ListingDto>>)>
{
    let listing = state
        .listings
        .create(auth_user.user_id, request.into())
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(listing.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/listings",
    tag = "Listings",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of listings", body = ApiResponse<PaginatedResponse<ListingDto>>)
    )
)]
pub async fn list_listings(
    State(state): State<ListingHandlerState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<ListingDto>>>,
    (StatusCode, Json<ApiResponse<PaginatedResponse<ListingDto>>>),
> {
    let page = state
        .listings
        .list(pagination.clamped())
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        page,
        ListingDto::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    tag = "Listings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing details", body = ApiResponse<ListingDto>),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn get_listing(
    State(state): State<ListingHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ListingDto>>, (StatusCode, Json<ApiResponse<ListingDto>>)> {
    let listing = state.listings.get(id).await.map_err(error_response)?;

    let Some(listing) = listing else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Listing not found")),
        ));
    };

    Ok(Json(ApiResponse::success(listing.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/listings/mine",
    tag = "Listings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Listings owned by the caller", body = ApiResponse<Vec<ListingDto>>)
    )
)]
pub async fn my_listings(
    State(state): State<ListingHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<ListingDto>>>, (StatusCode, Json<ApiResponse<Vec<ListingDto>>>)> {
    let listings = state
        .listings
        .list_by_host(auth_user.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(
        listings.into_iter().map(ListingDto::from).collect(),
    )))
}
