//! Reservation aggregate
//!
//! Contains the Reservation entity, query filters, and repository interface.

pub mod model;
pub mod query;
pub mod repository;

pub use model::{NewReservation, Reservation, ReservationStatus};
pub use query::{QueryPeriod, ReservationQuery};
pub use repository::ReservationRepository;
