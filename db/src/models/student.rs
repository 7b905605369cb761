use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryOrder, Set};

use crate::error::{DomainError, DomainResult};

/// A child on the roster. Soft-deleted (`deleted_at`) rather than removed,
/// so historical attendance records always resolve to a name.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub notes: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Records,
    #[sea_orm(has_many = "super::authorized_pickup::Entity")]
    Pickups,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
}

impl Related<super::authorized_pickup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pickups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Editable student fields, shared by create and update.
#[derive(Debug, Clone, Default)]
pub struct StudentDetails {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub notes: Option<String>,
}

impl StudentDetails {
    fn validated(mut self) -> DomainResult<Self> {
        self.name = self.name.trim().to_owned();
        if self.name.is_empty() {
            return Err(DomainError::Validation("student name is required".into()));
        }
        Ok(self)
    }
}

impl Model {
    pub async fn create(db: &DatabaseConnection, details: StudentDetails) -> DomainResult<Model> {
        let details = details.validated()?;
        let now = Utc::now();

        let student = ActiveModel {
            name: Set(details.name),
            birth_date: Set(details.birth_date),
            guardian_name: Set(details.guardian_name),
            guardian_phone: Set(details.guardian_phone),
            notes: Set(details.notes),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(student)
    }

    /// Fetches a student that has not been soft-deleted.
    pub async fn get(db: &DatabaseConnection, id: i64) -> DomainResult<Model> {
        Entity::find_by_id(id)
            .one(db)
            .await?
            .filter(|s| s.deleted_at.is_none())
            .ok_or_else(|| DomainError::NotFound(format!("student {id} not found")))
    }

    /// Active roster, alphabetical. Soft-deleted students are included only
    /// when `include_deleted` is set (used by historical report views).
    pub async fn list(db: &DatabaseConnection, include_deleted: bool) -> DomainResult<Vec<Model>> {
        let mut sel = Entity::find().order_by_asc(Column::Name);
        if !include_deleted {
            sel = sel.filter(Column::DeletedAt.is_null());
        }
        Ok(sel.all(db).await?)
    }

    /// Full-field update (PUT semantics).
    pub async fn update_details(
        db: &DatabaseConnection,
        id: i64,
        details: StudentDetails,
    ) -> DomainResult<Model> {
        let details = details.validated()?;
        let student = Self::get(db, id).await?;

        let mut active: ActiveModel = student.into();
        active.name = Set(details.name);
        active.birth_date = Set(details.birth_date);
        active.guardian_name = Set(details.guardian_name);
        active.guardian_phone = Set(details.guardian_phone);
        active.notes = Set(details.notes);
        active.updated_at = Set(Utc::now());

        Ok(active.update(db).await?)
    }

    /// Soft delete: hides the student from the roster and from check-in while
    /// keeping every historical attendance record intact.
    pub async fn soft_delete(db: &DatabaseConnection, id: i64) -> DomainResult<Model> {
        let student = Self::get(db, id).await?;

        let now = Utc::now();
        let mut active: ActiveModel = student.into();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        Ok(active.update(db).await?)
    }
}
