pub mod entities;
pub mod migrator;
pub mod repositories;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::PoolConfig;
use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./reservations.db?mode=rwc")
    pub url: String,
    pub pool: PoolConfig,
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut opts = ConnectOptions::new(config.url.clone());
    opts.max_connections(config.pool.max_connections)
        .min_connections(config.pool.min_connections)
        .connect_timeout(Duration::from_secs(config.pool.connect_timeout_secs))
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Apply all pending migrations
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    info!("Running database migrations...");
    Migrator::up(db, None).await?;
    info!("Migrations completed");
    Ok(())
}

/// Connect to a fresh in-memory database with the schema applied.
#[cfg(test)]
pub(crate) async fn test_database() -> DatabaseConnection {
    // each pooled connection would open its own empty database
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool: PoolConfig {
            max_connections: 1,
            min_connections: 1,
            ..PoolConfig::default()
        },
    };
    let db = init_database(&config).await.expect("in-memory database");
    run_migrations(&db).await.expect("migrations");
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, Statement};

    #[tokio::test]
    async fn migrations_create_reservation_table() {
        let db = test_database().await;

        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name IN ('reservation', 'transaction')",
            ))
            .await
            .unwrap()
            .unwrap();
        let n: i64 = row.try_get("", "n").unwrap();
        assert_eq!(n, 2);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_database().await;
        run_migrations(&db).await.unwrap();
    }
}
