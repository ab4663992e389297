use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Updating reservation {id} to status {status} failed: {reason}")]
    UpdateFailed {
        id: i32,
        status: &'static str,
        reason: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
