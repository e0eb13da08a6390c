use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::models::field::{Field, FieldType};
use crate::models::slot::SlotTime;

pub const MIN_PLAYERS: u32 = 2;
pub const MAX_PLAYERS: u32 = 22;

/// Submitter recorded on reservations made without a session.
pub const ANONYMOUS_EMAIL: &str = "anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[serde(rename = "en attente")]
    Pending,
    #[serde(rename = "confirmée")]
    Confirmed,
    #[serde(rename = "annulée")]
    Cancelled,
    /// Written by the booking writer when the slot could not be claimed.
    #[serde(rename = "échouée")]
    Failed,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Cancelled,
        ReservationStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "en attente",
            ReservationStatus::Confirmed => "confirmée",
            ReservationStatus::Cancelled => "annulée",
            ReservationStatus::Failed => "échouée",
        }
    }

    /// Whether a reservation in this status holds its slot.
    pub fn holds_slot(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReservationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| BookingError::Validation(format!("Unknown reservation status: \"{}\"", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default)]
    pub id: String,
    pub field_id: String,
    pub field_name: String,
    pub field_type: FieldType,
    pub centre: String,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub price: u32,
    pub player_count: u32,
    pub contact_name: String,
    pub contact_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub user_email: String,
}

impl Reservation {
    /// A pending reservation for `request` on `field` at the slot's `price`.
    pub fn pending(
        field: &Field,
        request: &BookingRequest,
        price: u32,
        user_email: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: String::new(),
            field_id: field.id.clone(),
            field_name: field.name.clone(),
            field_type: field.field_type,
            centre: field.centre.clone(),
            date: request.date,
            time: request.time,
            price,
            player_count: request.player_count,
            contact_name: request.contact_name.trim().to_string(),
            contact_phone: request.contact_phone.trim().to_string(),
            notes: request
                .notes
                .as_ref()
                .map(|notes| notes.trim().to_string())
                .filter(|notes| !notes.is_empty()),
            status: ReservationStatus::Pending,
            created_at: now,
            user_email: user_email.to_string(),
        }
    }
}

/// Booking form submitted by a visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub field_id: String,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub player_count: u32,
    #[serde(default)]
    pub contact_name: String,
    pub contact_phone: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Checks the form the same way the booking page does, plus the date.
    pub fn validate(&self, today: NaiveDate) -> BookingResult<()> {
        if self.field_id.trim().is_empty() {
            return Err(BookingError::Validation("fieldId is required".to_string()));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(BookingError::Validation(format!(
                "playerCount must be between {} and {}",
                MIN_PLAYERS, MAX_PLAYERS
            )));
        }
        if self.contact_name.trim().is_empty() {
            return Err(BookingError::Validation("contactName is required".to_string()));
        }
        if !is_plausible_phone(&self.contact_phone) {
            return Err(BookingError::Validation(format!(
                "contactPhone \"{}\" is not a valid phone number",
                self.contact_phone
            )));
        }
        if self.date < today {
            return Err(BookingError::Validation(format!(
                "Cannot book a slot in the past ({})",
                self.date
            )));
        }
        Ok(())
    }
}

fn is_plausible_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    digits >= 6
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
}
