use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait};

use crate::error::{DomainError, DomainResult, is_unique_violation};
use crate::models::active_session;

/// One teaching period. At most one row system-wide has `ended_at IS NULL`,
/// enforced through the `active_session` flag table. Sessions are permanent
/// history and are never deleted or reopened.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "class_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub topic: String,
    pub staff_label: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Records,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Opens a new session and claims the active-session flag.
    ///
    /// Fails with `Validation` on a blank topic and `Conflict` when a
    /// session is already open. The flag row's primary key backstops the
    /// read-then-insert against concurrent starters.
    pub async fn start(
        db: &DatabaseConnection,
        topic: &str,
        staff_label: &str,
    ) -> DomainResult<Model> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DomainError::Validation("topic is required".into()));
        }

        let txn = db.begin().await.map_err(DomainError::from)?;

        if active_session::Entity::find_by_id(active_session::SINGLETON_ID)
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "a class session is already in progress".into(),
            ));
        }

        let session = ActiveModel {
            topic: Set(topic.to_owned()),
            staff_label: Set(staff_label.trim().to_owned()),
            started_at: Set(Utc::now()),
            ended_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let flag = active_session::ActiveModel {
            id: Set(active_session::SINGLETON_ID),
            session_id: Set(session.id),
        };
        if let Err(err) = flag.insert(&txn).await {
            return Err(if is_unique_violation(&err) {
                DomainError::Conflict("a class session is already in progress".into())
            } else {
                err.into()
            });
        }

        txn.commit().await.map_err(DomainError::from)?;
        Ok(session)
    }

    /// Returns the currently open session, if any. Read-only.
    pub async fn active(db: &DatabaseConnection) -> DomainResult<Option<Model>> {
        let Some(flag) = active_session::Entity::find_by_id(active_session::SINGLETON_ID)
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        Ok(Entity::find_by_id(flag.session_id).one(db).await?)
    }

    /// Closes the open session and releases the active-session flag.
    ///
    /// Fails with `NotFound` when no session is open. Records still open at
    /// this point stay open permanently; callers surface that count to staff
    /// instead of silently closing them.
    pub async fn end(db: &DatabaseConnection) -> DomainResult<Model> {
        let txn = db.begin().await.map_err(DomainError::from)?;

        let Some(flag) = active_session::Entity::find_by_id(active_session::SINGLETON_ID)
            .one(&txn)
            .await?
        else {
            return Err(DomainError::NotFound("no class session is in progress".into()));
        };

        let session = Entity::find_by_id(flag.session_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                DomainError::Db(DbErr::RecordNotFound(format!(
                    "class session {} referenced by active_session",
                    flag.session_id
                )))
            })?;

        let mut active: ActiveModel = session.into();
        active.ended_at = Set(Some(Utc::now()));
        let closed = active.update(&txn).await?;

        active_session::Entity::delete_by_id(active_session::SINGLETON_ID)
            .exec(&txn)
            .await?;

        txn.commit().await.map_err(DomainError::from)?;
        Ok(closed)
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> DomainResult<Model> {
        Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("session {id} not found")))
    }

    /// Session history, newest first.
    pub async fn list(
        db: &DatabaseConnection,
        page: u64,
        per_page: u64,
    ) -> DomainResult<(Vec<Model>, u64)> {
        let paginator = Entity::find()
            .order_by_desc(Column::StartedAt)
            .paginate(db, per_page);
        let total = paginator.num_items().await?;
        let sessions = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((sessions, total))
    }
}
