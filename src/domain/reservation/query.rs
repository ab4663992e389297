//! Reservation query filters

use chrono::{DateTime, Utc};

use super::model::ReservationStatus;

/// Time restriction applied to a reservation listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPeriod {
    /// Expiry is in the future
    Active,
    /// Start is at or after `from` and expiry is at or before `to`
    FromTo {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

/// Optional filters for [`ReservationRepository::list`](super::ReservationRepository::list).
///
/// Every unset field leaves the listing unrestricted on that column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationQuery {
    pub charge_box_id: Option<String>,
    /// Matches the reservation's id tag
    pub user_id: Option<String>,
    pub status: Option<ReservationStatus>,
    pub period: Option<QueryPeriod>,
}

impl ReservationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charge_box_id(mut self, charge_box_id: impl Into<String>) -> Self {
        self.charge_box_id = Some(charge_box_id.into());
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn active(mut self) -> Self {
        self.period = Some(QueryPeriod::Active);
        self
    }

    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.period = Some(QueryPeriod::FromTo { from, to });
        self
    }

    /// Empty strings count as unset, like blank form fields.
    pub fn normalized(mut self) -> Self {
        self.charge_box_id = self.charge_box_id.filter(|s| !s.trim().is_empty());
        self.user_id = self.user_id.filter(|s| !s.trim().is_empty());
        self
    }
}
