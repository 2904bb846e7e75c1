//! User administration API handlers (admin only)

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::SetRoleRequest;
use crate::application::IdentityService;
use crate::domain::UserRole;
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, PaginationQuery,
};
use crate::interfaces::http::modules::auth::UserInfo;

/// User administration state
#[derive(Clone)]
pub struct UserHandlerState {
    pub identity: Arc<IdentityService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of users", body = ApiResponse<PaginatedResponse<UserInfo>>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<UserInfo>>>,
    (StatusCode, Json<ApiResponse<PaginatedResponse<UserInfo>>>),
> {
    let page = state
        .identity
        .list(pagination.clamped())
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        page,
        UserInfo::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserInfo>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, Json<ApiResponse<UserInfo>>)> {
    let user = state.identity.get_by_id(id).await.map_err(error_response)?;

    let Some(user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    Ok(Json(ApiResponse::success(user.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/role",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<UserInfo>),
        (status = 400, description = "Unknown role"),
        (status = 404, description = "User not found")
    )
)]
pub async fn set_user_role(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<SetRoleRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, Json<ApiResponse<UserInfo>>)> {
    let role = match request.role.as_str() {
        "admin" => UserRole::Admin,
        "host" => UserRole::Host,
        "guest" => UserRole::Guest,
        other => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown role: {}", other))),
            ));
        }
    };

    let user = state
        .identity
        .set_role(id, role)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(user.into())))
}
