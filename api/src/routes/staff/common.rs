use serde::{Deserialize, Serialize};

use db::models::user::Role;

#[derive(Debug, Default, Serialize)]
pub struct StaffResponse {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub created_at: String,
}

impl From<db::models::user::Model> for StaffResponse {
    fn from(m: db::models::user::Model) -> Self {
        let role = match m.role {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Assistant => "assistant",
        };
        Self {
            id: m.id,
            username: m.username,
            display_name: m.display_name,
            role: role.to_owned(),
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct StaffListResponse {
    pub staff: Vec<StaffResponse>,
}

#[derive(Debug, Deserialize)]
pub struct CreateStaffReq {
    pub username: String,
    pub display_name: String,
    pub role: Role,
}
