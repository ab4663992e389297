//! # CSMS Reservations
//!
//! Reservation store for an EV charging station management system.
//!
//! ## Architecture
//!
//! - **domain**: Reservation entity, status, query filters and the repository trait
//! - **infrastructure**: SeaORM entities, migrations and the repository implementation
//! - **config**: TOML application configuration
//! - **runtime**: tracing setup and store bootstrap for binaries
//! - **shared**: error types used across layers

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use domain::{
    DomainError, DomainResult, NewReservation, QueryPeriod, Reservation, ReservationQuery,
    ReservationRepository, ReservationStatus,
};

// Re-export database types for easy access
pub use infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmReservationRepository};

pub use runtime::{init_tracing, StoreHandle, StoreOptions};
