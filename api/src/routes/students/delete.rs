use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use db::models::student::Model as Student;

use super::common::StudentResponse;
use crate::response::ApiResponse;
use crate::routes::common::error_response;

/// DELETE `/api/students/{student_id}`
///
/// Soft delete. The student drops off the roster and can no longer be
/// checked in, but all historical attendance records stay intact.
pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<StudentResponse>>) {
    match Student::soft_delete(state.db(), student_id).await {
        Ok(student) => (
            StatusCode::OK,
            Json(ApiResponse::success(student.into(), "Student removed")),
        ),
        Err(err) => error_response(err),
    }
}
