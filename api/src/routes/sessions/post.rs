//! Session mutations: start/end the single active session, and the
//! check-in/check-out ledger operations tied to it.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::warn;
use util::state::AppState;

use db::error::DomainError;
use db::models::attendance_record::Model as AttendanceRecord;
use db::models::class_session::Model as ClassSession;

use super::common::{
    AttendanceRecordResponse, CheckInReq, CheckOutReq, EndSessionResponse, SessionResponse,
    StartSessionReq,
};
use crate::response::ApiResponse;
use crate::routes::common::error_response;

/// POST `/api/sessions`
///
/// Opens a new class session. `409` when one is already in progress, `400`
/// on a blank topic.
pub async fn start_session(
    State(state): State<AppState>,
    Json(body): Json<StartSessionReq>,
) -> (StatusCode, Json<ApiResponse<SessionResponse>>) {
    match ClassSession::start(state.db(), &body.topic, &body.staff).await {
        Ok(session) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(session.into(), "Class session started")),
        ),
        Err(err) => error_response(err),
    }
}

/// POST `/api/sessions/active/end`
///
/// Closes the active session. Children still checked in are *not* checked
/// out; their count comes back as `open_records` so staff see the anomaly.
pub async fn end_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<EndSessionResponse>>) {
    let session = match ClassSession::end(state.db()).await {
        Ok(session) => session,
        Err(err) => return error_response(err),
    };

    let open_records = match AttendanceRecord::open_count(state.db(), session.id).await {
        Ok(count) => count,
        Err(err) => return error_response(err.into()),
    };

    let message = if open_records > 0 {
        format!("Class session ended; {open_records} student(s) were never checked out")
    } else {
        "Class session ended".to_owned()
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            EndSessionResponse {
                session: session.into(),
                open_records,
            },
            message,
        )),
    )
}

/// POST `/api/sessions/{session_id}/check-in`
///
/// Records a child's arrival. `404` when the session id is not the active
/// session or the student is unknown; `409` on a duplicate record.
pub async fn check_in(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(body): Json<CheckInReq>,
) -> (StatusCode, Json<ApiResponse<AttendanceRecordResponse>>) {
    match AttendanceRecord::check_in(state.db(), session_id, body.student_id).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(record.into(), "Student checked in")),
        ),
        Err(err) => error_response(err),
    }
}

/// POST `/api/sessions/{session_id}/check-out`
///
/// Releases a child to a named adult. The name is re-validated against the
/// student's own authorized-pickup list; `403` on any mismatch or when no
/// guardians are registered. Denials are logged without the attempted name.
pub async fn check_out(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(body): Json<CheckOutReq>,
) -> (StatusCode, Json<ApiResponse<AttendanceRecordResponse>>) {
    match AttendanceRecord::check_out(state.db(), session_id, body.student_id, &body.released_to)
        .await
    {
        Ok(record) => (
            StatusCode::OK,
            Json(ApiResponse::success(record.into(), "Student checked out")),
        ),
        Err(err) => {
            if matches!(err, DomainError::Authorization(_)) {
                warn!(session_id, student_id = body.student_id, "check-out denied");
            }
            error_response(err)
        }
    }
}
