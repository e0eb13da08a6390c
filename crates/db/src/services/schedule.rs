//! Admin grid reads and cell edits.

use chrono::{DateTime, Utc};
use regragui_core::errors::{BookingError, BookingResult};
use regragui_core::models::schedule::{PutSlotRequest, ScheduleHours, SetAvailabilityRequest, SlotRef, WeekSchedule};
use regragui_core::models::slot::{Slot, WeeklySlots};
use regragui_core::projection::project_week;
use regragui_core::week::WeekKey;

use crate::repositories::{field, weekly_slots};
use crate::services::slots::modify_day;
use crate::store::DocumentStore;

async fn ensure_field(store: &dyn DocumentStore, field_id: &str) -> BookingResult<()> {
    match field::get_field(store, field_id).await? {
        Some(_) => Ok(()),
        None => Err(BookingError::NotFound(format!("Field {} not found", field_id))),
    }
}

pub async fn get_week_schedule(
    store: &dyn DocumentStore,
    field_id: &str,
    week: WeekKey,
    hours: &ScheduleHours,
) -> BookingResult<WeekSchedule> {
    ensure_field(store, field_id).await?;
    let doc = weekly_slots::get_weekly_slots(store, field_id, week).await?;
    Ok(project_week(field_id, week, doc.as_ref(), hours))
}

/// Creates or edits the slot addressed by `request`, creating the week's
/// document if the field has none yet.
pub async fn put_slot(store: &dyn DocumentStore, request: &PutSlotRequest, now: DateTime<Utc>) -> BookingResult<Slot> {
    let SlotRef {
        field_id,
        week,
        day,
        time,
    } = &request.slot;
    ensure_field(store, field_id).await?;

    if weekly_slots::create_weekly_slots(store, &WeeklySlots::empty(field_id, *week, now)).await? {
        tracing::info!("Created weekly slots {}", WeeklySlots::document_id(field_id, *week));
    }

    modify_day(store, field_id, *week, *day, now, |slots| {
        match slots.iter_mut().find(|slot| slot.time == *time) {
            Some(slot) => {
                if request.available && !slot.available && slot.reservation_id.is_some() {
                    return Err(reserved_conflict(&request.slot));
                }
                slot.price = request.price;
                slot.available = request.available;
                Ok(slot.clone())
            }
            None => {
                let slot = Slot {
                    available: request.available,
                    ..Slot::new(*time, request.price)
                };
                slots.push(slot.clone());
                slots.sort_by_key(|slot| slot.time);
                Ok(slot)
            }
        }
    })
    .await
}

pub async fn set_availability(
    store: &dyn DocumentStore,
    request: &SetAvailabilityRequest,
    now: DateTime<Utc>,
) -> BookingResult<Slot> {
    let target = &request.slot;
    modify_day(store, &target.field_id, target.week, target.day, now, |slots| {
        let slot = slots
            .iter_mut()
            .find(|slot| slot.time == target.time)
            .ok_or_else(|| missing_slot(target))?;
        if request.available && slot.reservation_id.is_some() {
            return Err(reserved_conflict(target));
        }
        slot.available = request.available;
        Ok(slot.clone())
    })
    .await
}

pub async fn remove_slot(store: &dyn DocumentStore, target: &SlotRef, now: DateTime<Utc>) -> BookingResult<Slot> {
    modify_day(store, &target.field_id, target.week, target.day, now, |slots| {
        let index = slots
            .iter()
            .position(|slot| slot.time == target.time)
            .ok_or_else(|| missing_slot(target))?;
        if slots[index].reservation_id.is_some() {
            return Err(reserved_conflict(target));
        }
        Ok(slots.remove(index))
    })
    .await
}

fn missing_slot(target: &SlotRef) -> BookingError {
    BookingError::NotFound(format!(
        "No slot at {} on {} {} for field {}",
        target.time, target.day, target.week, target.field_id
    ))
}

fn reserved_conflict(target: &SlotRef) -> BookingError {
    BookingError::Conflict(format!(
        "The {} slot on {} {} is held by a reservation; cancel it first",
        target.time, target.day, target.week
    ))
}
