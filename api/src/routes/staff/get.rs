use axum::{Json, extract::State, http::StatusCode};
use util::state::AppState;

use db::models::user::Model as User;

use super::common::{StaffListResponse, StaffResponse};
use crate::response::ApiResponse;
use crate::routes::common::error_response;

/// GET `/api/staff`
///
/// Staff roster ordered by display name.
pub async fn list_staff(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<StaffListResponse>>) {
    match User::list(state.db()).await {
        Ok(staff) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StaffListResponse {
                    staff: staff.into_iter().map(StaffResponse::from).collect(),
                },
                "Staff retrieved",
            )),
        ),
        Err(err) => error_response(err),
    }
}
