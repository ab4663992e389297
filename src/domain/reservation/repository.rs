//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{NewReservation, Reservation};
use super::query::ReservationQuery;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// List reservations matching `query`, ordered by expiry ascending
    async fn list(&self, query: &ReservationQuery) -> DomainResult<Vec<Reservation>>;

    /// Ids of accepted, unexpired reservations for a charge point
    async fn list_active_ids(&self, charge_box_id: &str) -> DomainResult<Vec<i32>>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// Insert a new `Waiting` reservation and return its generated id.
    ///
    /// Overlapping reservations on the same charge point are not rejected.
    async fn insert(&self, reservation: NewReservation) -> DomainResult<i32>;

    /// Delete by id. Deleting a missing id is not an error.
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Set status to `Accepted`; returns the number of rows changed
    async fn accept(&self, id: i32) -> DomainResult<u64>;

    /// Set status to `Cancelled`; returns the number of rows changed
    async fn cancel(&self, id: i32) -> DomainResult<u64>;

    /// Set status to `Used` and link the consuming transaction
    async fn mark_used(&self, id: i32, transaction_id: i32) -> DomainResult<u64>;

    /// Count reservations on `charge_box_id` whose window intersects `[start, expiry]`
    async fn count_overlapping(
        &self,
        charge_box_id: &str,
        start: DateTime<Utc>,
        expiry: DateTime<Utc>,
    ) -> DomainResult<u64>;
}
