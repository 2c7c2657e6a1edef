//! SQLite connection lifecycle

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::domain::error::DomainError;

/// Handle to the SQLite database with an explicit open/close lifecycle
///
/// Constructed once at startup and injected into the repository; closed
/// when the server shuts down.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database file, creating it if missing, and prepare the schema
    pub async fn connect(path: &str) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let database = Self { pool };
        database.initialize_schema().await?;
        Ok(database)
    }

    /// Private in-memory database, used by tests
    #[cfg(test)]
    pub async fn connect_in_memory() -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .create_if_missing(true);

        // A single connection so every query sees the same memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let database = Self { pool };
        database.initialize_schema().await?;
        Ok(database)
    }

    async fn initialize_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                avatar TEXT NOT NULL,
                attributes TEXT NOT NULL,
                inventory TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool, flushing outstanding work
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
