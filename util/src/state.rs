//! Application state shared across Axum route handlers.
//!
//! Holds the shared database connection. Cloning is cheap; the underlying
//! SeaORM connection is a pooled handle.

use sea_orm::DatabaseConnection;

/// Central application state passed into handlers via Axum's `State<T>`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    /// Creates a new `AppState` wrapping the given database connection.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns a shared reference to the database connection.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
