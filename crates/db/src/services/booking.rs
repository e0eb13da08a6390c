//! # Booking
//!
//! A booking touches two documents: a new reservation and the claimed entry
//! of the field's weekly slots. There is no cross-document transaction, so
//! the reservation is written first and marked failed if the slot cannot be
//! claimed afterwards. A reservation is therefore never left pending while
//! its slot is still open.

use chrono::{DateTime, Utc};
use regragui_core::errors::{BookingError, BookingResult};
use regragui_core::models::reservation::{BookingRequest, Reservation, ReservationStatus};
use regragui_core::week::{day_key_of, week_key_of};
use tracing::{error, info, warn};

use crate::repositories::{field, reservation, weekly_slots};
use crate::services::slots::{claim_slot, release_slot};
use crate::store::DocumentStore;

/// Books the slot described by `request` for `user_email`.
pub async fn book_slot(
    store: &dyn DocumentStore,
    request: &BookingRequest,
    user_email: &str,
    now: DateTime<Utc>,
) -> BookingResult<Reservation> {
    request.validate(now.date_naive())?;

    let field = field::get_field(store, &request.field_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Field {} not found", request.field_id)))?;

    let week = week_key_of(request.date);
    let day = day_key_of(request.date);

    let doc = weekly_slots::get_weekly_slots(store, &field.id, week)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("No slots published for field {} in week {}", field.id, week))
        })?;

    let slot = doc.find(day, request.time).ok_or_else(|| {
        BookingError::NotFound(format!(
            "Field {} has no slot at {} on {} ({})",
            field.name, request.time, request.date, day
        ))
    })?;

    if !slot.available {
        return Err(BookingError::Conflict(format!(
            "The {} slot on {} is already booked",
            request.time, request.date
        )));
    }

    let pending = Reservation::pending(&field, request, slot.price, user_email, now);
    let reservation = reservation::insert_reservation(store, &pending).await?;

    if let Err(err) = claim_slot(store, &field.id, week, day, request.time, &reservation.id, now).await {
        warn!(
            "Could not claim {} {} on field {} for reservation {}: {}",
            request.date, request.time, field.id, reservation.id, err
        );
        if let Err(mark_err) = reservation::set_status(store, &reservation.id, ReservationStatus::Failed).await {
            error!(
                "Reservation {} could not be marked as failed: {:?}",
                reservation.id, mark_err
            );
        }
        return Err(err);
    }

    info!(
        "Reservation {} booked: field={}, {} {}, {} players",
        reservation.id, field.id, reservation.date, reservation.time, reservation.player_count
    );
    Ok(reservation)
}

/// Changes the status of a reservation and keeps its slot in step.
///
/// Leaving a slot-holding status (pending, confirmed) reopens the slot if it
/// still points at this reservation. Coming back to one claims it again.
/// Writes are ordered so that a failure can leave a slot blocked but never
/// open under a live reservation.
pub async fn update_reservation_status(
    store: &dyn DocumentStore,
    id: &str,
    status: ReservationStatus,
    now: DateTime<Utc>,
) -> BookingResult<Reservation> {
    if status == ReservationStatus::Failed {
        return Err(BookingError::Validation(format!(
            "Status \"{}\" is reserved for failed bookings",
            status
        )));
    }

    let mut current = reservation::get_reservation(store, id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Reservation {} not found", id)))?;

    if current.status == status {
        return Ok(current);
    }

    let week = week_key_of(current.date);
    let day = day_key_of(current.date);

    match (current.status.holds_slot(), status.holds_slot()) {
        (true, false) => {
            write_status(store, id, status).await?;
            match release_slot(store, &current.field_id, week, day, current.time, id, now).await {
                Ok(true) => info!("Slot {} {} reopened by reservation {}", current.date, current.time, id),
                Ok(false) => warn!(
                    "Slot {} {} of field {} was not held by reservation {}",
                    current.date, current.time, current.field_id, id
                ),
                Err(BookingError::NotFound(message)) => warn!("Could not reopen slot: {}", message),
                Err(err) => error!(
                    "Slot {} {} of field {} stays blocked after reservation {} left it: {}",
                    current.date, current.time, current.field_id, id, err
                ),
            }
        }
        (false, true) => {
            claim_slot(store, &current.field_id, week, day, current.time, id, now).await?;
            if let Err(err) = write_status(store, id, status).await {
                warn!("Reservation {} kept status {}; releasing its slot again", id, current.status);
                if let Err(release_err) = release_slot(store, &current.field_id, week, day, current.time, id, now).await {
                    error!(
                        "Slot {} {} of field {} could not be released for reservation {}: {}",
                        current.date, current.time, current.field_id, id, release_err
                    );
                }
                return Err(err);
            }
        }
        _ => write_status(store, id, status).await?,
    }

    info!("Reservation {} moved from {} to {}", id, current.status, status);
    current.status = status;
    Ok(current)
}

async fn write_status(store: &dyn DocumentStore, id: &str, status: ReservationStatus) -> BookingResult<()> {
    if !reservation::set_status(store, id, status).await? {
        return Err(BookingError::NotFound(format!("Reservation {} not found", id)));
    }
    Ok(())
}
