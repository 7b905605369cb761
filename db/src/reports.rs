//! Read-only reporting projections over the attendance ledger.
//!
//! Everything here is derived state: recomputable at any time, never
//! writing back to the ledger.

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;
use util::config;

use crate::error::{DomainError, DomainResult};
use crate::models::{attendance_record, class_session, student};

/// One ledger row joined with the student's name for display.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    pub student_id: i64,
    pub student_name: String,
    pub entry_at: DateTime<Utc>,
    pub exit_at: Option<DateTime<Utc>>,
    pub released_to: Option<String>,
}

/// Per-session view: the session, its records in arrival order, and how many
/// children were never checked out (an operational anomaly staff should see).
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub session: class_session::Model,
    pub records: Vec<ReportRecord>,
    pub never_checked_out: u64,
}

pub async fn session_report(
    db: &DatabaseConnection,
    session_id: i64,
) -> DomainResult<SessionReport> {
    let session = class_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("session {session_id} not found")))?;

    let rows = attendance_record::Entity::find()
        .filter(attendance_record::Column::SessionId.eq(session_id))
        .find_also_related(student::Entity)
        .order_by_asc(attendance_record::Column::EntryAt)
        .all(db)
        .await?;

    let never_checked_out = rows
        .iter()
        .filter(|(record, _)| record.exit_at.is_none())
        .count() as u64;

    let records = rows
        .into_iter()
        .map(|(record, stu)| ReportRecord {
            student_id: record.student_id,
            student_name: stu.map(|s| s.name).unwrap_or_default(),
            entry_at: record.entry_at,
            exit_at: record.exit_at,
            released_to: record.released_to,
        })
        .collect();

    Ok(SessionReport {
        session,
        records,
        never_checked_out,
    })
}

/// Attendance frequency over the most recent `last_n` *ended* sessions.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyReport {
    pub student_id: i64,
    pub present: u64,
    pub total: u64,
    pub pct: f64,
    pub below_threshold: bool,
}

pub async fn frequency(
    db: &DatabaseConnection,
    student_id: i64,
    last_n: u64,
) -> DomainResult<FrequencyReport> {
    // Soft-deleted students keep their history, so no deleted filter here;
    // only a student that never existed is an error.
    student::Entity::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("student {student_id} not found")))?;

    let session_ids: Vec<i64> = class_session::Entity::find()
        .filter(class_session::Column::EndedAt.is_not_null())
        .order_by_desc(class_session::Column::StartedAt)
        .limit(last_n)
        .all(db)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();

    let total = session_ids.len() as u64;
    let present = if session_ids.is_empty() {
        0
    } else {
        attendance_record::Entity::find()
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .filter(attendance_record::Column::SessionId.is_in(session_ids))
            .count(db)
            .await?
    };

    let pct = if total == 0 {
        0.0
    } else {
        (present as f64 / total as f64 * 100.0).round()
    };
    let below_threshold = total > 0 && pct < config::low_attendance_threshold();

    Ok(FrequencyReport {
        student_id,
        present,
        total,
        pct,
        below_threshold,
    })
}
