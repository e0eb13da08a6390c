use regragui_core::errors::BookingResult;
use regragui_core::models::reservation::ReservationStatus;
use regragui_core::models::stats::Stats;

use crate::repositories::{field, reservation, slot, weekly_slots};
use crate::store::DocumentStore;

/// Counts shown on the admin dashboard.
pub async fn collect_stats(store: &dyn DocumentStore) -> BookingResult<Stats> {
    let fields = field::list_fields(store).await?;
    let flat_slots = slot::list_slots(store).await?;
    let weekly = weekly_slots::list_weekly_slots(store).await?;
    let reservations = reservation::list_reservations(store).await?;

    let mut stats = Stats {
        total_fields: fields.len(),
        total_slots: flat_slots.len(),
        available_slots: flat_slots.iter().filter(|slot| slot.available).count(),
        total_weekly_slots: weekly.len(),
        available_weekly_slots: weekly
            .iter()
            .flat_map(|doc| doc.slots.iter())
            .map(|(_, slots)| slots.iter().filter(|slot| slot.available).count())
            .sum(),
        ..Stats::default()
    };

    for status in ReservationStatus::ALL {
        stats.reservations_by_status.insert(status.to_string(), 0);
    }
    for reservation in &reservations {
        *stats
            .reservations_by_status
            .entry(reservation.status.to_string())
            .or_default() += 1;
    }

    Ok(stats)
}
