//! Booking API handlers
//!
//! Thin wrappers over `AdmissionService`: handlers translate admission
//! decisions to HTTP statuses and never re-implement the checks.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{BookingDto, CreateBookingRequest, ModifyBookingRequest};
use crate::application::{AdmissionService, Decision, RejectReason};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Booking handlers state
#[derive(Clone)]
pub struct BookingHandlerState {
    pub admission: Arc<AdmissionService>,
    pub repos: Arc<dyn RepositoryProvider>,
}

fn reject_status(reason: RejectReason) -> StatusCode {
    match reason {
        RejectReason::InvalidDateOrder | RejectReason::PastCheckIn => StatusCode::BAD_REQUEST,
        RejectReason::Conflict => StatusCode::CONFLICT,
        RejectReason::NotFound => StatusCode::NOT_FOUND,
        RejectReason::Forbidden => StatusCode::FORBIDDEN,
    }
}

/// Map an admission decision to a response.
///
/// `accepted_status` lets create return 201 while modify/cancel return 200;
/// a replayed identical request (`AlreadyBooked`) is always 200.
fn decision_response(
    decision: Decision,
    accepted_status: StatusCode,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), (StatusCode, Json<ApiResponse<BookingDto>>)>
{
    match decision {
        Decision::Accepted(booking) => Ok((
            accepted_status,
            Json(ApiResponse::success(booking.into())),
        )),
        Decision::AlreadyBooked(booking) => {
            Ok((StatusCode::OK, Json(ApiResponse::success(booking.into()))))
        }
        Decision::Rejected(reason) => Err((
            reject_status(reason),
            Json(ApiResponse::error(reason.message())),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking reserved", body = ApiResponse<BookingDto>),
        (status = 200, description = "Identical booking already exists", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid dates"),
        (status = 404, description = "Listing not found"),
        (status = 409, description = "Dates conflict with an existing booking")
    )
)]
pub async fn create_booking(
    State(state): State<BookingHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), (StatusCode, Json<ApiResponse<BookingDto>>)>
{
    let decision = state
        .admission
        .reserve(auth_user.user_id, request.listing_id, request.stay())
        .await
        .map_err(error_response)?;

    decision_response(decision, StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/my",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's bookings, newest first", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn my_bookings(
    State(state): State<BookingHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<Vec<BookingDto>>>)> {
    let bookings = state
        .repos
        .bookings()
        .find_for_user(auth_user.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state
        .repos
        .bookings()
        .find_by_id(id)
        .await
        .map_err(error_response)?;

    let Some(booking) = booking else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Booking not found")),
        ));
    };

    if booking.user_id != auth_user.user_id && !auth_user.is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("This booking belongs to another user.")),
        ));
    }

    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    request_body = ModifyBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid dates"),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "New dates conflict with an existing booking")
    )
)]
pub async fn modify_booking(
    State(state): State<BookingHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<ModifyBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), (StatusCode, Json<ApiResponse<BookingDto>>)>
{
    let decision = state
        .admission
        .modify(id, auth_user.user_id, request.stay())
        .await
        .map_err(error_response)?;

    decision_response(decision, StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingDto>),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), (StatusCode, Json<ApiResponse<BookingDto>>)>
{
    let decision = state
        .admission
        .cancel(id, auth_user.user_id)
        .await
        .map_err(error_response)?;

    decision_response(decision, StatusCode::OK)
}
