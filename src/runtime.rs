//! Process bootstrap shared by binaries: tracing setup and store construction.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::ReservationRepository;
use crate::infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmReservationRepository};
use crate::shared::errors::InfraError;

/// Options for opening the reservation store.
pub struct StoreOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Takes precedence over both `DATABASE_URL` and `database.url`.
    pub database_url: Option<String>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            database_url: None,
        }
    }
}

impl StoreOptions {
    /// The url the store will connect to
    pub fn effective_database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| self.config.database.connection_url())
    }
}

/// An open database plus the reservation store built on it.
pub struct StoreHandle {
    pub reservations: Arc<dyn ReservationRepository>,
    db: DatabaseConnection,
}

impl StoreHandle {
    pub async fn open(opts: StoreOptions) -> Result<Self, InfraError> {
        let db_config = DatabaseConfig {
            url: opts.effective_database_url(),
            pool: opts.config.database.pool.clone(),
        };
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            run_migrations(&db).await?;
        }

        Ok(Self {
            reservations: Arc::new(SeaOrmReservationRepository::new(db.clone())),
            db,
        })
    }

    /// Apply pending migrations regardless of `auto_migrate`.
    pub async fn migrate(&self) -> Result<(), InfraError> {
        run_migrations(&self.db).await?;
        Ok(())
    }

    pub async fn close(self) -> Result<(), InfraError> {
        self.db.close().await?;
        info!("Database connection closed");
        Ok(())
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`;
/// `logging.format = "json"` selects JSON output.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewReservation, ReservationQuery};
    use chrono::{Duration, Utc};

    fn in_memory_options(auto_migrate: bool) -> StoreOptions {
        let mut config = AppConfig::default();
        config.database.pool.max_connections = 1;
        StoreOptions {
            config,
            auto_migrate,
            database_url: Some("sqlite::memory:".into()),
        }
    }

    #[test]
    fn explicit_url_beats_env_and_config() {
        std::env::set_var("DATABASE_URL", "sqlite://from-env.db");
        let mut config = AppConfig::default();
        config.database.url = "sqlite://from-config.db".into();
        let opts = StoreOptions {
            config,
            auto_migrate: true,
            database_url: Some("sqlite://from-flag.db".into()),
        };
        assert_eq!(opts.effective_database_url(), "sqlite://from-flag.db");
    }

    #[tokio::test]
    async fn open_with_migrations_gives_usable_store() {
        let handle = StoreHandle::open(in_memory_options(true)).await.unwrap();

        let now = Utc::now();
        let id = handle
            .reservations
            .insert(NewReservation::new("TAG-001", "CP001", now, now + Duration::hours(1)))
            .await
            .unwrap();
        let all = handle.reservations.list(&ReservationQuery::new()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);

        handle.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_without_migrations_then_migrate() {
        let handle = StoreHandle::open(in_memory_options(false)).await.unwrap();
        assert!(handle.reservations.list(&ReservationQuery::new()).await.is_err());

        handle.migrate().await.unwrap();
        assert!(handle
            .reservations
            .list(&ReservationQuery::new())
            .await
            .unwrap()
            .is_empty());
    }
}
