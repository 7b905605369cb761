use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use db::models::student::StudentDetails;

#[derive(Debug, Default, Serialize)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub notes: Option<String>,
    pub deleted_at: Option<String>,
    /// Authorized pickup names; filled where the view loads them.
    pub pickups: Vec<String>,
}

impl From<db::models::student::Model> for StudentResponse {
    fn from(m: db::models::student::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            birth_date: m.birth_date.map(|d| d.to_string()),
            guardian_name: m.guardian_name,
            guardian_phone: m.guardian_phone,
            notes: m.notes,
            deleted_at: m.deleted_at.map(|t| t.to_rfc3339()),
            pickups: Vec::new(),
        }
    }
}

impl StudentResponse {
    pub fn from_with_pickups(m: db::models::student::Model, pickups: Vec<String>) -> Self {
        let mut base = Self::from(m);
        base.pickups = pickups;
        base
    }
}

#[derive(Debug, Deserialize)]
pub struct StudentReq {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub notes: Option<String>,
}

impl From<StudentReq> for StudentDetails {
    fn from(r: StudentReq) -> Self {
        Self {
            name: r.name,
            birth_date: r.birth_date,
            guardian_name: r.guardian_name,
            guardian_phone: r.guardian_phone,
            notes: r.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListStudentsQuery {
    pub include_deleted: Option<bool>,
}

#[derive(Debug, Default, Serialize)]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
}

#[derive(Debug, Deserialize)]
pub struct PickupsReq {
    pub names: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct PickupsResponse {
    pub names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FrequencyQuery {
    /// How many recent ended sessions to consider. Defaults to 5.
    pub last: Option<u64>,
}

#[derive(Debug, Default, Serialize)]
pub struct FrequencyResponse {
    pub student_id: i64,
    pub present: u64,
    pub total: u64,
    pub pct: f64,
    pub below_threshold: bool,
}

impl From<db::reports::FrequencyReport> for FrequencyResponse {
    fn from(r: db::reports::FrequencyReport) -> Self {
        Self {
            student_id: r.student_id,
            present: r.present,
            total: r.total,
            pct: r.pct,
            below_threshold: r.below_threshold,
        }
    }
}
