use migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// Populates the environment variables `AppConfig` treats as required, so
/// tests can run without a `.env` file. Call before anything touches
/// `util::config`.
pub fn init_test_env() {
    unsafe {
        std::env::set_var("DATABASE_PATH", "data/test.db");
        std::env::set_var("JWT_SECRET", "test-secret");
    }
}

/// Fresh in-memory SQLite database with all migrations applied.
///
/// A single pooled connection keeps every query in the same in-memory
/// database instance.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}
