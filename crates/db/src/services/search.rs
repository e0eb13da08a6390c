use regragui_core::availability::{filter_fields, resolve};
use regragui_core::errors::{BookingError, BookingResult};
use regragui_core::models::field::FieldType;
use regragui_core::models::search::{SearchFilters, SearchResult};
use regragui_core::week::week_key_of;

use crate::repositories::{field, weekly_slots};
use crate::store::DocumentStore;

fn search_failed(err: eyre::Report) -> BookingError {
    BookingError::Database(err.wrap_err("search failed"))
}

/// Fields matching `filters` with their slots on `filters.date`.
///
/// Reads every field once and the weekly documents of the searched week once.
pub async fn search_available_fields(
    store: &dyn DocumentStore,
    filters: &SearchFilters,
) -> BookingResult<Vec<SearchResult>> {
    let fields = field::list_fields(store).await.map_err(search_failed)?;
    let candidates = filter_fields(fields, filters);
    if candidates.is_empty() {
        tracing::debug!("No field matches {:?}", filters);
        return Ok(Vec::new());
    }

    let week = week_key_of(filters.date);
    let weekly = weekly_slots::find_by_week(store, week)
        .await
        .map_err(search_failed)?;

    let results = resolve(candidates, &weekly, filters);
    tracing::debug!("Search for {} ({}) returned {} fields", filters.date, week, results.len());
    Ok(results)
}

/// Distinct centres present in the fields collection, sorted.
pub async fn list_centres(store: &dyn DocumentStore) -> BookingResult<Vec<String>> {
    let mut centres: Vec<String> = field::list_fields(store)
        .await?
        .into_iter()
        .map(|field| field.centre)
        .collect();
    centres.sort();
    centres.dedup();
    Ok(centres)
}

pub async fn list_field_types(store: &dyn DocumentStore) -> BookingResult<Vec<FieldType>> {
    let mut types: Vec<FieldType> = field::list_fields(store)
        .await?
        .into_iter()
        .map(|field| field.field_type)
        .collect();
    types.sort();
    types.dedup();
    Ok(types)
}
