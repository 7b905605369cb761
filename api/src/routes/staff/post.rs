use axum::{Json, extract::State, http::StatusCode};
use util::state::AppState;

use db::models::user::Model as User;

use super::common::{CreateStaffReq, StaffResponse};
use crate::response::ApiResponse;
use crate::routes::common::error_response;

/// POST `/api/staff` (admin only)
///
/// Registers a staff member. `409` when the username is taken.
pub async fn create_staff(
    State(state): State<AppState>,
    Json(body): Json<CreateStaffReq>,
) -> (StatusCode, Json<ApiResponse<StaffResponse>>) {
    match User::create(state.db(), &body.username, &body.display_name, body.role).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(user.into(), "Staff member created")),
        ),
        Err(err) => error_response(err),
    }
}
