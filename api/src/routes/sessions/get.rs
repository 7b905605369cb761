//! Session reads: the active session, history, presence lists, and the
//! per-session report. All read-only.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use util::state::AppState;

use db::models::attendance_record::Model as AttendanceRecord;
use db::models::class_session::Model as ClassSession;
use db::reports;

use super::common::{
    ListQuery, PresenceResponse, SessionListResponse, SessionReportResponse, SessionResponse,
};
use crate::response::ApiResponse;
use crate::routes::common::error_response;

/// GET `/api/sessions/active`
///
/// The currently open session, or `null` data when none is open.
pub async fn get_active_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Option<SessionResponse>>>) {
    match ClassSession::active(state.db()).await {
        Ok(Some(session)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(session.into()),
                "Active session retrieved",
            )),
        ),
        Ok(None) => (
            StatusCode::OK,
            Json(ApiResponse::success(None, "No session in progress")),
        ),
        Err(err) => error_response(err),
    }
}

/// GET `/api/sessions`
///
/// Session history, newest first. `page` defaults to 1, `per_page` to 20
/// (max 100).
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> (StatusCode, Json<ApiResponse<SessionListResponse>>) {
    let page = q.page.unwrap_or(1).max(1);
    let per_page = q.per_page.unwrap_or(20).clamp(1, 100);

    match ClassSession::list(state.db(), page, per_page).await {
        Ok((sessions, total)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SessionListResponse {
                    sessions: sessions.into_iter().map(Into::into).collect(),
                    page,
                    per_page,
                    total,
                },
                "Sessions retrieved",
            )),
        ),
        Err(err) => error_response(err),
    }
}

/// GET `/api/sessions/{session_id}/attendance`
///
/// Every attendance record for the session in arrival order, open and
/// closed, for "who is in class" views.
pub async fn list_attendance(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<PresenceResponse>>) {
    // Resolve the session first so an unknown id is a clean 404.
    if let Err(err) = ClassSession::get(state.db(), session_id).await {
        return error_response(err);
    }

    match AttendanceRecord::list_for_session(state.db(), session_id).await {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                PresenceResponse {
                    records: records.into_iter().map(Into::into).collect(),
                },
                "Attendance retrieved",
            )),
        ),
        Err(err) => error_response(err.into()),
    }
}

/// GET `/api/sessions/{session_id}/report`
///
/// The session joined with its records and student names. `404` on an
/// unknown session.
pub async fn session_report(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<SessionReportResponse>>) {
    match reports::session_report(state.db(), session_id).await {
        Ok(report) => (
            StatusCode::OK,
            Json(ApiResponse::success(report.into(), "Session report retrieved")),
        ),
        Err(err) => error_response(err),
    }
}
