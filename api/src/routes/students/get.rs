//! Student reads: roster listing, single-student detail, the pickup
//! registry, and the per-student frequency report.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use util::state::AppState;

use db::models::authorized_pickup::Model as AuthorizedPickup;
use db::models::student::Model as Student;
use db::reports;

use super::common::{
    FrequencyQuery, FrequencyResponse, ListStudentsQuery, PickupsResponse, StudentListResponse,
    StudentResponse,
};
use crate::response::ApiResponse;
use crate::routes::common::error_response;

const DEFAULT_FREQUENCY_WINDOW: u64 = 5;

/// GET `/api/students`
///
/// Alphabetical roster with each student's pickup names attached.
/// Soft-deleted students appear only with `?include_deleted=true`.
pub async fn list_students(
    State(state): State<AppState>,
    Query(q): Query<ListStudentsQuery>,
) -> (StatusCode, Json<ApiResponse<StudentListResponse>>) {
    let students = match Student::list(state.db(), q.include_deleted.unwrap_or(false)).await {
        Ok(students) => students,
        Err(err) => return error_response(err),
    };

    let mut pickups = match AuthorizedPickup::for_students(state.db()).await {
        Ok(pickups) => pickups,
        Err(err) => return error_response(err.into()),
    };

    let students = students
        .into_iter()
        .map(|s| {
            let names = pickups.remove(&s.id).unwrap_or_default();
            StudentResponse::from_with_pickups(s, names)
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            StudentListResponse { students },
            "Students retrieved",
        )),
    )
}

/// GET `/api/students/{student_id}`
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<StudentResponse>>) {
    let student = match Student::get(state.db(), student_id).await {
        Ok(student) => student,
        Err(err) => return error_response(err),
    };

    match AuthorizedPickup::for_student(state.db(), student_id).await {
        Ok(names) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentResponse::from_with_pickups(student, names),
                "Student retrieved",
            )),
        ),
        Err(err) => error_response(err.into()),
    }
}

/// GET `/api/students/{student_id}/pickups`
pub async fn get_pickups(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<PickupsResponse>>) {
    if let Err(err) = Student::get(state.db(), student_id).await {
        return error_response(err);
    }

    match AuthorizedPickup::for_student(state.db(), student_id).await {
        Ok(names) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                PickupsResponse { names },
                "Authorized pickups retrieved",
            )),
        ),
        Err(err) => error_response(err.into()),
    }
}

/// GET `/api/students/{student_id}/frequency?last=N`
///
/// Attendance over the student's most recent `last` ended sessions
/// (default 5). Works for soft-deleted students too, since their history
/// is kept.
pub async fn get_frequency(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    Query(q): Query<FrequencyQuery>,
) -> (StatusCode, Json<ApiResponse<FrequencyResponse>>) {
    let last = q.last.unwrap_or(DEFAULT_FREQUENCY_WINDOW).max(1);

    match reports::frequency(state.db(), student_id, last).await {
        Ok(report) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                report.into(),
                "Attendance frequency retrieved",
            )),
        ),
        Err(err) => error_response(err),
    }
}
