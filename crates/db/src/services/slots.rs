//! Conditional updates of one day of a weekly slots document.
//!
//! Every change to a day array goes through [`modify_day`]: the array is read,
//! edited in memory and written back only if the stored array is still the
//! one that was read. A concurrent writer makes the swap fail and the edit is
//! replayed on fresh data.

use chrono::{DateTime, Utc};
use regragui_core::errors::{BookingError, BookingResult};
use regragui_core::models::slot::{Slot, SlotTime};
use regragui_core::week::{DayKey, WeekKey};

use crate::repositories::weekly_slots;
use crate::store::DocumentStore;

pub const MAX_ATTEMPTS: usize = 3;

/// Applies `edit` to the slots of `day` and stores the result atomically.
///
/// `edit` may run several times and must only depend on the slots it is
/// given. An edit that leaves the array unchanged writes nothing.
pub async fn modify_day<T, F>(
    store: &dyn DocumentStore,
    field_id: &str,
    week: WeekKey,
    day: DayKey,
    now: DateTime<Utc>,
    mut edit: F,
) -> BookingResult<T>
where
    F: FnMut(&mut Vec<Slot>) -> BookingResult<T> + Send,
    T: Send,
{
    for attempt in 1..=MAX_ATTEMPTS {
        let doc = weekly_slots::get_weekly_slots(store, field_id, week)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("No slots published for field {} in week {}", field_id, week))
            })?;

        let current = doc.slots.day(day).to_vec();
        let mut edited = current.clone();
        let outcome = edit(&mut edited)?;
        if edited == current {
            return Ok(outcome);
        }

        if weekly_slots::swap_day(store, field_id, week, day, &current, &edited).await? {
            weekly_slots::touch(store, field_id, week, now).await?;
            return Ok(outcome);
        }

        tracing::debug!(
            "Slots of {} changed while updating {} {} (attempt {}/{})",
            doc.id,
            week,
            day,
            attempt,
            MAX_ATTEMPTS
        );
    }

    Err(BookingError::Conflict(format!(
        "Slots of field {} on {} {} are being modified concurrently, try again",
        field_id, week, day
    )))
}

/// Marks the slot at `time` as taken by `reservation_id`.
///
/// Claiming a slot the reservation already holds succeeds without writing.
pub async fn claim_slot(
    store: &dyn DocumentStore,
    field_id: &str,
    week: WeekKey,
    day: DayKey,
    time: SlotTime,
    reservation_id: &str,
    now: DateTime<Utc>,
) -> BookingResult<()> {
    modify_day(store, field_id, week, day, now, |slots| {
        let slot = slots
            .iter_mut()
            .find(|slot| slot.time == time)
            .ok_or_else(|| BookingError::NotFound(format!("No slot at {} on {} {}", time, day, week)))?;

        if slot.reservation_id.as_deref() == Some(reservation_id) {
            return Ok(());
        }
        if !slot.available {
            return Err(BookingError::Conflict(format!(
                "The {} slot on {} {} is no longer available",
                time, day, week
            )));
        }

        slot.reserve(reservation_id);
        Ok(())
    })
    .await
}

/// Reopens the slot at `time` if it is held by `reservation_id`.
/// Returns whether the slot was released.
pub async fn release_slot(
    store: &dyn DocumentStore,
    field_id: &str,
    week: WeekKey,
    day: DayKey,
    time: SlotTime,
    reservation_id: &str,
    now: DateTime<Utc>,
) -> BookingResult<bool> {
    modify_day(store, field_id, week, day, now, |slots| {
        Ok(slots
            .iter_mut()
            .find(|slot| slot.time == time)
            .is_some_and(|slot| slot.release(reservation_id)))
    })
    .await
}
