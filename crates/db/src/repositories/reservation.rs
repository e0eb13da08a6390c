use eyre::Result;
use regragui_core::models::collections::RESERVATIONS;
use regragui_core::models::reservation::{Reservation, ReservationStatus};
use serde_json::Value;

use super::{decode, encode};
use crate::store::DocumentStore;

/// Stores a new reservation and returns it with its generated id.
pub async fn insert_reservation(store: &dyn DocumentStore, reservation: &Reservation) -> Result<Reservation> {
    let id = store.insert(RESERVATIONS, encode(reservation)?).await?;
    tracing::debug!(
        "Reservation created: id={}, field={}, {} {}",
        id,
        reservation.field_id,
        reservation.date,
        reservation.time
    );
    Ok(Reservation {
        id,
        ..reservation.clone()
    })
}

pub async fn get_reservation(store: &dyn DocumentStore, id: &str) -> Result<Option<Reservation>> {
    store.get(RESERVATIONS, id).await?.map(decode).transpose()
}

/// All reservations, newest first.
pub async fn list_reservations(store: &dyn DocumentStore) -> Result<Vec<Reservation>> {
    let mut reservations: Vec<Reservation> = store
        .list(RESERVATIONS)
        .await?
        .into_iter()
        .map(decode)
        .collect::<Result<_>>()?;
    reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    Ok(reservations)
}

pub async fn find_by_user(store: &dyn DocumentStore, user_email: &str) -> Result<Vec<Reservation>> {
    let mut reservations: Vec<Reservation> = store
        .find_eq(RESERVATIONS, "userEmail", &Value::String(user_email.to_string()))
        .await?
        .into_iter()
        .map(decode)
        .collect::<Result<_>>()?;
    reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(reservations)
}

/// Returns false when the reservation does not exist.
pub async fn set_status(store: &dyn DocumentStore, id: &str, status: ReservationStatus) -> Result<bool> {
    tracing::debug!("Setting reservation {} status to {}", id, status);
    store
        .update_path(RESERVATIONS, id, "status", serde_json::to_value(status)?)
        .await
}
