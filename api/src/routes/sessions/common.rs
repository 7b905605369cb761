use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize)]
pub struct SessionResponse {
    pub id: i64,
    pub topic: String,
    pub staff_label: String,
    pub started_at: String,
    pub ended_at: Option<String>,
}

impl From<db::models::class_session::Model> for SessionResponse {
    fn from(m: db::models::class_session::Model) -> Self {
        Self {
            id: m.id,
            topic: m.topic,
            staff_label: m.staff_label,
            started_at: m.started_at.to_rfc3339(),
            ended_at: m.ended_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct AttendanceRecordResponse {
    pub session_id: i64,
    pub student_id: i64,
    pub entry_at: String,
    pub exit_at: Option<String>,
    pub released_to: Option<String>,
}

impl From<db::models::attendance_record::Model> for AttendanceRecordResponse {
    fn from(m: db::models::attendance_record::Model) -> Self {
        Self {
            session_id: m.session_id,
            student_id: m.student_id,
            entry_at: m.entry_at.to_rfc3339(),
            exit_at: m.exit_at.map(|t| t.to_rfc3339()),
            released_to: m.released_to,
        }
    }
}

#[derive(Deserialize)]
pub struct StartSessionReq {
    pub topic: String,
    /// Free-text "who taught" label shown on reports.
    #[serde(default)]
    pub staff: String,
}

#[derive(Deserialize)]
pub struct CheckInReq {
    pub student_id: i64,
}

#[derive(Deserialize)]
pub struct CheckOutReq {
    pub student_id: i64,
    pub released_to: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Default, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// Closing a session reports how many children were never checked out so the
/// UI can warn staff; the records themselves stay open.
#[derive(Debug, Default, Serialize)]
pub struct EndSessionResponse {
    pub session: SessionResponse,
    pub open_records: u64,
}

#[derive(Debug, Default, Serialize)]
pub struct PresenceResponse {
    pub records: Vec<AttendanceRecordResponse>,
}

#[derive(Debug, Default, Serialize)]
pub struct ReportRecordResponse {
    pub student_id: i64,
    pub student_name: String,
    pub entry_at: String,
    pub exit_at: Option<String>,
    pub released_to: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct SessionReportResponse {
    pub session: SessionResponse,
    pub records: Vec<ReportRecordResponse>,
    pub never_checked_out: u64,
}

impl From<db::reports::SessionReport> for SessionReportResponse {
    fn from(r: db::reports::SessionReport) -> Self {
        Self {
            session: r.session.into(),
            records: r
                .records
                .into_iter()
                .map(|rec| ReportRecordResponse {
                    student_id: rec.student_id,
                    student_name: rec.student_name,
                    entry_at: rec.entry_at.to_rfc3339(),
                    exit_at: rec.exit_at.map(|t| t.to_rfc3339()),
                    released_to: rec.released_to,
                })
                .collect(),
            never_checked_out: r.never_checked_out,
        }
    }
}
