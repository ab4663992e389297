//! Database entities module

pub mod reservation;
pub mod transaction;
