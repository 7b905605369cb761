use axum::{Json, extract::State, http::StatusCode};
use util::state::AppState;

use db::models::student::Model as Student;

use super::common::{StudentReq, StudentResponse};
use crate::response::ApiResponse;
use crate::routes::common::error_response;

/// POST `/api/students`
///
/// Registers a new student. `400` on a blank name.
pub async fn create_student(
    State(state): State<AppState>,
    Json(body): Json<StudentReq>,
) -> (StatusCode, Json<ApiResponse<StudentResponse>>) {
    match Student::create(state.db(), body.into()).await {
        Ok(student) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(student.into(), "Student created")),
        ),
        Err(err) => error_response(err),
    }
}
