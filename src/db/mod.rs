//! Database connection management for the persistent session store.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Shared SeaORM connection pool.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to PostgreSQL.
    pub async fn new(database_url: &str, max_connections: u32) -> AppResult<Self> {
        let mut opts = ConnectOptions::new(database_url.to_string());
        opts.max_connections(max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(5))
            .sqlx_logging(false);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect: {}", e)))?;

        Ok(DbPool { conn })
    }

    /// Apply pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None).await?;
        info!("Database migrations complete");
        Ok(())
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}
