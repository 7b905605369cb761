use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, is_unique_violation};

/// A staff member. The role is descriptive data attached to sessions and
/// rosters; permission enforcement happens at the API boundary, not here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "teacher")]
    Teacher,
    #[sea_orm(string_value = "assistant")]
    Assistant,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        username: &str,
        display_name: &str,
        role: Role,
    ) -> DomainResult<Model> {
        let username = username.trim();
        let display_name = display_name.trim();
        if username.is_empty() {
            return Err(DomainError::Validation("username is required".into()));
        }
        if display_name.is_empty() {
            return Err(DomainError::Validation("display name is required".into()));
        }

        let now = Utc::now();
        let result = ActiveModel {
            username: Set(username.to_owned()),
            display_name: Set(display_name.to_owned()),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await;

        result.map_err(|err| {
            if is_unique_violation(&err) {
                DomainError::Conflict(format!("username '{username}' is already taken"))
            } else {
                err.into()
            }
        })
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> DomainResult<Model> {
        Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("staff member {id} not found")))
    }

    pub async fn list(db: &DatabaseConnection) -> DomainResult<Vec<Model>> {
        Ok(Entity::find().order_by_asc(Column::DisplayName).all(db).await?)
    }
}
