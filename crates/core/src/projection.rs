//! # Weekly schedule projection
//!
//! Builds the admin grid for one field and one ISO week: a row per start
//! time, a column per weekday, each cell telling whether a slot exists and
//! whether it is still bookable.

use std::collections::BTreeSet;

use crate::models::schedule::{CellState, ScheduleDay, ScheduleHours, ScheduleRow, WeekSchedule};
use crate::models::slot::{SlotTime, WeeklySlots};
use crate::week::{DayKey, WeekKey};

/// Projects `doc` (the field's document for `week`, if any) onto a dense grid.
///
/// Rows cover the configured business hours plus any other time found in
/// the document. A missing document yields an all-`Missing` grid.
pub fn project_week(
    field_id: &str,
    week: WeekKey,
    doc: Option<&WeeklySlots>,
    hours: &ScheduleHours,
) -> WeekSchedule {
    let mut times: BTreeSet<SlotTime> = hours.times().into_iter().collect();
    if let Some(doc) = doc {
        for (_, slots) in doc.slots.iter() {
            times.extend(slots.iter().map(|slot| slot.time));
        }
    }

    let rows = times
        .into_iter()
        .map(|time| ScheduleRow {
            time,
            cells: DayKey::ALL
                .into_iter()
                .map(|day| cell_state(doc, day, time))
                .collect(),
        })
        .collect();

    let days = DayKey::ALL
        .into_iter()
        .map(|day| ScheduleDay {
            day,
            date: week.date_of(day),
        })
        .collect();

    WeekSchedule {
        field_id: field_id.to_string(),
        week,
        previous_week: week.previous(),
        next_week: week.next(),
        days,
        rows,
    }
}

fn cell_state(doc: Option<&WeeklySlots>, day: DayKey, time: SlotTime) -> CellState {
    match doc.and_then(|doc| doc.find(day, time)) {
        Some(slot) if slot.available => CellState::Available { price: slot.price },
        Some(slot) => CellState::Unavailable {
            price: slot.price,
            reservation_id: slot.reservation_id.clone(),
        },
        None => CellState::Missing,
    }
}
