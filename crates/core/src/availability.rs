//! # Availability resolution
//!
//! Joins the fields matching a search against the weekly slots documents of
//! the searched ISO week. The store side (`regragui-db::services::search`)
//! loads the two inputs with one read each; everything here is pure.

use std::collections::HashMap;

use crate::models::field::Field;
use crate::models::search::{SearchFilters, SearchResult, TimeSlotView};
use crate::models::slot::WeeklySlots;
use crate::week::day_key_of;

/// Fields that pass `filters`.
pub fn filter_fields(fields: Vec<Field>, filters: &SearchFilters) -> Vec<Field> {
    fields.into_iter().filter(|field| filters.matches(field)).collect()
}

/// Pairs every candidate field with its slots on `filters.date`.
///
/// `weekly` must hold the documents of the date's ISO week. Fields without a
/// document, or whose day array is empty, are left out. Every slot is
/// returned with its `available` flag; booked slots are not filtered.
pub fn resolve(fields: Vec<Field>, weekly: &[WeeklySlots], filters: &SearchFilters) -> Vec<SearchResult> {
    let day = day_key_of(filters.date);
    let by_field: HashMap<&str, &WeeklySlots> = weekly
        .iter()
        .map(|doc| (doc.field_id.as_str(), doc))
        .collect();

    let mut results: Vec<SearchResult> = fields
        .into_iter()
        .filter(|field| filters.matches(field))
        .filter_map(|field| {
            let doc = by_field.get(field.id.as_str())?;
            let mut time_slots: Vec<TimeSlotView> = doc
                .slots
                .day(day)
                .iter()
                .map(|slot| TimeSlotView {
                    id: format!("{}_{}_{}", field.id, filters.date, slot.time),
                    field_id: field.id.clone(),
                    time: slot.time,
                    available: slot.available,
                    price: slot.price,
                    date: filters.date,
                })
                .collect();

            if time_slots.is_empty() {
                return None;
            }
            time_slots.sort_by_key(|slot| slot.time);
            Some(SearchResult { field, time_slots })
        })
        .collect();

    results.sort_by(|a, b| a.field.name.cmp(&b.field.name).then_with(|| a.field.id.cmp(&b.field.id)));
    results
}
