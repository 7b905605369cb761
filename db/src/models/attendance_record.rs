use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, QueryOrder, Set, TransactionTrait};

use crate::error::{DomainError, DomainResult, is_unique_violation};
use crate::models::{active_session, authorized_pickup, student};

/// One child's attendance in one session: created at check-in, completed
/// once at check-out, immutable thereafter. This is the audit trail.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub session_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,
    pub entry_at: DateTime<Utc>,
    pub exit_at: Option<DateTime<Utc>>,
    pub released_to: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_session::Entity",
        from = "Column::SessionId",
        to = "super::class_session::Column::Id"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::class_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Asserts that `session_id` names the *currently* open session. A client
/// holding a stale id (the session ended under it) gets `NotFound` and must
/// refresh, never a write into closed history.
async fn require_active_session<C>(txn: &C, session_id: i64) -> DomainResult<()>
where
    C: ConnectionTrait,
{
    let flag = active_session::Entity::find_by_id(active_session::SINGLETON_ID)
        .one(txn)
        .await?;
    match flag {
        Some(f) if f.session_id == session_id => Ok(()),
        _ => Err(DomainError::NotFound(
            "session is not open for attendance".into(),
        )),
    }
}

impl Model {
    /// Records a child's arrival into the open session.
    ///
    /// Fails with `NotFound` when the session is not the active one or the
    /// student is unknown (or soft-deleted), and with `Conflict` when a
    /// record for the pair already exists. The composite primary key
    /// backstops the duplicate check under concurrent devices.
    pub async fn check_in(
        db: &DatabaseConnection,
        session_id: i64,
        student_id: i64,
    ) -> DomainResult<Model> {
        let txn = db.begin().await.map_err(DomainError::from)?;

        require_active_session(&txn, session_id).await?;

        let known = student::Entity::find_by_id(student_id)
            .one(&txn)
            .await?
            .map(|s| s.deleted_at.is_none())
            .unwrap_or(false);
        if !known {
            return Err(DomainError::NotFound(format!(
                "student {student_id} not found"
            )));
        }

        if let Some(existing) = Entity::find_by_id((session_id, student_id)).one(&txn).await? {
            let message = if existing.exit_at.is_none() {
                "student is already checked in"
            } else {
                "student was already checked out of this session"
            };
            return Err(DomainError::Conflict(message.into()));
        }

        let record = ActiveModel {
            session_id: Set(session_id),
            student_id: Set(student_id),
            entry_at: Set(Utc::now()),
            exit_at: Set(None),
            released_to: Set(None),
        }
        .insert(&txn)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DomainError::Conflict("student is already checked in".into())
            } else {
                DomainError::from(err)
            }
        })?;

        txn.commit().await.map_err(DomainError::from)?;
        Ok(record)
    }

    /// Releases a child to a named adult, closing the record.
    ///
    /// The safety-critical guard: `released_to` must match one of *this*
    /// student's registered pickup names, trimmed and case-insensitive,
    /// re-validated here no matter what the client claims. A student with no
    /// registered names can never be checked out.
    pub async fn check_out(
        db: &DatabaseConnection,
        session_id: i64,
        student_id: i64,
        released_to: &str,
    ) -> DomainResult<Model> {
        let name = released_to.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("released_to is required".into()));
        }

        let txn = db.begin().await.map_err(DomainError::from)?;

        require_active_session(&txn, session_id).await?;

        let record = Entity::find_by_id((session_id, student_id))
            .one(&txn)
            .await?
            .filter(|r| r.exit_at.is_none())
            .ok_or_else(|| {
                DomainError::NotFound("no open check-in for this student".into())
            })?;

        let authorized = authorized_pickup::Model::for_student(&txn, student_id).await?;
        if authorized.is_empty() {
            return Err(DomainError::Authorization("no guardians registered".into()));
        }
        let wanted = name.to_lowercase();
        if !authorized.iter().any(|a| a.trim().to_lowercase() == wanted) {
            return Err(DomainError::Authorization(
                "not an authorized pickup for this student".into(),
            ));
        }

        let mut active: ActiveModel = record.into();
        active.exit_at = Set(Some(Utc::now()));
        active.released_to = Set(Some(name.to_owned()));
        let closed = active.update(&txn).await?;

        txn.commit().await.map_err(DomainError::from)?;
        Ok(closed)
    }

    /// Every record for a session, open and closed, ordered by arrival.
    pub async fn list_for_session<C>(db: &C, session_id: i64) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .order_by_asc(Column::EntryAt)
            .all(db)
            .await
    }

    /// Children checked in but never checked out of the given session.
    pub async fn open_count<C>(db: &C, session_id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::ExitAt.is_null())
            .count(db)
            .await
    }
}
