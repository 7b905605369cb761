use std::collections::HashMap;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, QueryOrder, Set, TransactionTrait};

use crate::error::{DomainError, DomainResult};
use crate::models::student;

/// A name pre-registered against one student as an acceptable `released_to`
/// value. Authorization is a membership test against that student's own
/// rows, never a global list.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "authorized_pickups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
}

/// Hard cap carried over from the registration form: three names per child.
pub const MAX_PICKUPS: usize = 3;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// All registered pickup names for one student (0 to [`MAX_PICKUPS`]).
    pub async fn for_student<C>(db: &C, student_id: i64) -> Result<Vec<String>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Name)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|r| r.name).collect())
    }

    /// Pickup names for a whole roster in one query, grouped by student.
    /// Students with no registered names are absent from the map.
    pub async fn for_students<C>(db: &C) -> Result<HashMap<i64, Vec<String>>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = Entity::find().order_by_asc(Column::Name).all(db).await?;
        let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
        for row in rows {
            grouped.entry(row.student_id).or_default().push(row.name);
        }
        Ok(grouped)
    }

    /// Replaces the student's pickup list atomically.
    ///
    /// Names are trimmed; blanks are rejected; duplicates (case-insensitive)
    /// collapse to the first spelling given; more than [`MAX_PICKUPS`]
    /// distinct names is a validation error.
    pub async fn replace_for_student(
        db: &DatabaseConnection,
        student_id: i64,
        names: &[String],
    ) -> DomainResult<Vec<String>> {
        let mut cleaned: Vec<String> = Vec::new();
        for raw in names {
            let name = raw.trim();
            if name.is_empty() {
                return Err(DomainError::Validation(
                    "pickup names must not be blank".into(),
                ));
            }
            let lowered = name.to_lowercase();
            if !cleaned.iter().any(|n| n.to_lowercase() == lowered) {
                cleaned.push(name.to_owned());
            }
        }
        if cleaned.len() > MAX_PICKUPS {
            return Err(DomainError::Validation(format!(
                "at most {MAX_PICKUPS} authorized pickups per student"
            )));
        }

        // 404 before touching the registry.
        student::Model::get(db, student_id).await?;

        let txn = db.begin().await.map_err(DomainError::from)?;

        Entity::delete_many()
            .filter(Column::StudentId.eq(student_id))
            .exec(&txn)
            .await?;

        if !cleaned.is_empty() {
            let rows: Vec<ActiveModel> = cleaned
                .iter()
                .map(|name| ActiveModel {
                    student_id: Set(student_id),
                    name: Set(name.clone()),
                })
                .collect();
            Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await.map_err(DomainError::from)?;
        Ok(cleaned)
    }
}
