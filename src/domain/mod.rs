pub mod reservation;

pub use reservation::{
    NewReservation, QueryPeriod, Reservation, ReservationQuery, ReservationRepository,
    ReservationStatus,
};

pub use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
