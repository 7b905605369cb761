use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608200005_create_active_session"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Single-row flag table: the primary key plus the CHECK constraint
        // make "which session is open" an atomic, storage-level fact shared
        // by every server process. A second concurrent insert loses on the
        // primary key, which the session manager reports as a conflict.
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("active_session"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .primary_key()
                            .check(Expr::col(Alias::new("id")).eq(1)),
                    )
                    .col(
                        ColumnDef::new(Alias::new("session_id"))
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_active_session_session")
                            .from(Alias::new("active_session"), Alias::new("session_id"))
                            .to(Alias::new("class_sessions"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("active_session")).to_owned())
            .await
    }
}
