//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::{debug, error, info};

use crate::domain::reservation::{
    NewReservation, QueryPeriod, Reservation, ReservationQuery, ReservationRepository,
    ReservationStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// UPDATE reservation SET status = ?[, transaction_pk = ?] WHERE reservation_pk = ?
    async fn update_status(
        &self,
        id: i32,
        status: ReservationStatus,
        transaction_id: Option<i32>,
    ) -> DomainResult<u64> {
        let mut update = reservation::Entity::update_many()
            .col_expr(reservation::Column::Status, Expr::value(status.as_str()));
        if let Some(tx) = transaction_id {
            update = update.col_expr(reservation::Column::TransactionPk, Expr::value(tx));
        }

        match update
            .filter(reservation::Column::ReservationPk.eq(id))
            .exec(&self.db)
            .await
        {
            Ok(result) => {
                info!(
                    reservation_id = id,
                    status = %status,
                    transaction_id = ?transaction_id,
                    rows = result.rows_affected,
                    "Reservation status updated"
                );
                metrics::counter!("reservation_status_updates_total", "status" => status.as_str())
                    .increment(1);
                Ok(result.rows_affected)
            }
            Err(e) => {
                error!(
                    reservation_id = id,
                    status = %status,
                    error = %e,
                    "Updating reservation status FAILED"
                );
                Err(DomainError::UpdateFailed {
                    id,
                    status: status.as_str(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    Ok(Reservation {
        id: m.reservation_pk,
        transaction_id: m.transaction_pk,
        id_tag: m.id_tag,
        charge_box_id: m.charge_box_id,
        start_datetime: m.start_datetime,
        expiry_datetime: m.expiry_datetime,
        status: m.status.parse()?,
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn list_condition(query: &ReservationQuery, now: DateTime<Utc>) -> Condition {
    let mut condition = Condition::all();

    if let Some(ref charge_box_id) = query.charge_box_id {
        condition = condition.add(reservation::Column::ChargeBoxId.eq(charge_box_id.as_str()));
    }
    if let Some(ref user_id) = query.user_id {
        condition = condition.add(reservation::Column::IdTag.eq(user_id.as_str()));
    }
    if let Some(status) = query.status {
        condition = condition.add(reservation::Column::Status.eq(status.as_str()));
    }

    match query.period {
        Some(QueryPeriod::Active) => {
            condition = condition.add(reservation::Column::ExpiryDatetime.gt(now));
        }
        Some(QueryPeriod::FromTo { from, to }) => {
            condition = condition
                .add(reservation::Column::StartDatetime.gte(from))
                .add(reservation::Column::ExpiryDatetime.lte(to));
        }
        None => {}
    }

    condition
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn list(&self, query: &ReservationQuery) -> DomainResult<Vec<Reservation>> {
        let query = query.clone().normalized();
        debug!(?query, "Listing reservations");

        let models = reservation::Entity::find()
            .filter(list_condition(&query, Utc::now()))
            .order_by_asc(reservation::Column::ExpiryDatetime)
            .order_by_asc(reservation::Column::ReservationPk)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        models.into_iter().map(model_to_domain).collect()
    }

    async fn list_active_ids(&self, charge_box_id: &str) -> DomainResult<Vec<i32>> {
        reservation::Entity::find()
            .select_only()
            .column(reservation::Column::ReservationPk)
            .filter(reservation::Column::ChargeBoxId.eq(charge_box_id))
            .filter(reservation::Column::ExpiryDatetime.gt(Utc::now()))
            .filter(reservation::Column::Status.eq(ReservationStatus::Accepted.as_str()))
            .order_by_asc(reservation::Column::ReservationPk)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn insert(&self, r: NewReservation) -> DomainResult<i32> {
        r.check()?;

        let model = reservation::ActiveModel {
            transaction_pk: Set(None),
            id_tag: Set(r.id_tag),
            charge_box_id: Set(r.charge_box_id),
            start_datetime: Set(r.start_datetime),
            expiry_datetime: Set(r.expiry_datetime),
            status: Set(ReservationStatus::Waiting.as_str().to_string()),
            ..Default::default()
        };
        let result = reservation::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        let reservation_id = result.last_insert_id;
        metrics::counter!("reservation_inserts_total").increment(1);
        debug!(reservation_id, "A new reservation is inserted");
        Ok(reservation_id)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = reservation::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        debug!(
            reservation_id = id,
            rows = result.rows_affected,
            "The reservation is deleted"
        );
        Ok(())
    }

    async fn accept(&self, id: i32) -> DomainResult<u64> {
        self.update_status(id, ReservationStatus::Accepted, None).await
    }

    async fn cancel(&self, id: i32) -> DomainResult<u64> {
        self.update_status(id, ReservationStatus::Cancelled, None).await
    }

    async fn mark_used(&self, id: i32, transaction_id: i32) -> DomainResult<u64> {
        self.update_status(id, ReservationStatus::Used, Some(transaction_id))
            .await
    }

    /// SELECT COUNT(*) FROM reservation
    /// WHERE ? <= expirydatetime AND ? >= startdatetime AND chargeboxid = ?
    async fn count_overlapping(
        &self,
        charge_box_id: &str,
        start: DateTime<Utc>,
        expiry: DateTime<Utc>,
    ) -> DomainResult<u64> {
        reservation::Entity::find()
            .filter(reservation::Column::ChargeBoxId.eq(charge_box_id))
            .filter(reservation::Column::ExpiryDatetime.gte(start))
            .filter(reservation::Column::StartDatetime.lte(expiry))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Tests ──────────────────────────────────────────────────────
