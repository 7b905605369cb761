use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202608200001_create_users::Migration),
            Box::new(migrations::m202608200002_create_students::Migration),
            Box::new(migrations::m202608200003_create_authorized_pickups::Migration),
            Box::new(migrations::m202608200004_create_class_sessions::Migration),
            Box::new(migrations::m202608200005_create_active_session::Migration),
            Box::new(migrations::m202608200006_create_attendance_records::Migration),
        ]
    }
}
