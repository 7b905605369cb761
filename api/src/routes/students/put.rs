use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use db::models::authorized_pickup::Model as AuthorizedPickup;
use db::models::student::Model as Student;

use super::common::{PickupsReq, PickupsResponse, StudentReq, StudentResponse};
use crate::response::ApiResponse;
use crate::routes::common::error_response;

/// PUT `/api/students/{student_id}`
///
/// Full-field replace of the student's details.
pub async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    Json(body): Json<StudentReq>,
) -> (StatusCode, Json<ApiResponse<StudentResponse>>) {
    match Student::update_details(state.db(), student_id, body.into()).await {
        Ok(student) => (
            StatusCode::OK,
            Json(ApiResponse::success(student.into(), "Student updated")),
        ),
        Err(err) => error_response(err),
    }
}

/// PUT `/api/students/{student_id}/pickups`
///
/// Replaces the student's authorized-pickup list. At most three names;
/// blanks rejected; case-insensitive duplicates collapse to the first
/// spelling.
pub async fn set_pickups(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    Json(body): Json<PickupsReq>,
) -> (StatusCode, Json<ApiResponse<PickupsResponse>>) {
    match AuthorizedPickup::replace_for_student(state.db(), student_id, &body.names).await {
        Ok(names) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                PickupsResponse { names },
                "Authorized pickups updated",
            )),
        ),
        Err(err) => error_response(err),
    }
}
