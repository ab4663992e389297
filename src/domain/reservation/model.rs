//! Reservation domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use crate::shared::errors::DomainError;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Created, not yet confirmed by the charge point
    Waiting,
    /// Confirmed by the charge point
    Accepted,
    /// Revoked by user or system
    Cancelled,
    /// Consumed by a charging transaction
    Used,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        Self::Waiting,
        Self::Accepted,
        Self::Cancelled,
        Self::Used,
    ];

    /// Text stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Accepted => "ACCEPTED",
            Self::Cancelled => "CANCELLED",
            Self::Used => "USED",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(Self::Waiting),
            "ACCEPTED" => Ok(Self::Accepted),
            "CANCELLED" => Ok(Self::Cancelled),
            "USED" => Ok(Self::Used),
            _ => Err(DomainError::Validation(format!(
                "Unknown reservation status: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reservation row as read from the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    pub id: i32,
    /// Transaction that consumed this reservation
    pub transaction_id: Option<i32>,
    pub id_tag: String,
    pub charge_box_id: String,
    pub start_datetime: DateTime<Utc>,
    pub expiry_datetime: DateTime<Utc>,
    pub status: ReservationStatus,
}

/// Input for inserting a reservation. New rows always start as `Waiting`.
#[derive(Debug, Clone, Validate)]
pub struct NewReservation {
    /// OCPP idTag (CiString20)
    #[validate(length(min = 1, max = 20))]
    pub id_tag: String,
    #[validate(length(min = 1, max = 255))]
    pub charge_box_id: String,
    pub start_datetime: DateTime<Utc>,
    pub expiry_datetime: DateTime<Utc>,
}

impl NewReservation {
    pub fn new(
        id_tag: impl Into<String>,
        charge_box_id: impl Into<String>,
        start_datetime: DateTime<Utc>,
        expiry_datetime: DateTime<Utc>,
    ) -> Self {
        Self {
            id_tag: id_tag.into(),
            charge_box_id: charge_box_id.into(),
            start_datetime,
            expiry_datetime,
        }
    }

    /// Field-level checks only. `expiry > start` is not checked.
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::Validation(e.to_string()))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn status_text_roundtrip() {
        for status in ReservationStatus::ALL {
            let parsed: ReservationStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_parse_is_exact() {
        assert!("accepted".parse::<ReservationStatus>().is_err());
        assert!(" ACCEPTED".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "EXPIRED".parse::<ReservationStatus>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn status_serializes_as_column_text() {
        let json = serde_json::to_string(&ReservationStatus::Cancelled).unwrap();
        assert_eq!(json, "\"CANCELLED\"");
    }

    #[test]
    fn new_reservation_rejects_empty_and_long_id_tag() {
        let now = Utc::now();
        let empty = NewReservation::new("", "CP001", now, now + Duration::hours(1));
        assert!(empty.check().is_err());

        let long = NewReservation::new("X".repeat(21), "CP001", now, now + Duration::hours(1));
        assert!(long.check().is_err());

        let ok = NewReservation::new("TAG-001", "CP001", now, now + Duration::hours(1));
        assert!(ok.check().is_ok());
    }

    #[test]
    fn new_reservation_accepts_inverted_window() {
        let now = Utc::now();
        let inverted = NewReservation::new("TAG-001", "CP001", now, now - Duration::hours(1));
        assert!(inverted.check().is_ok());
    }
}
