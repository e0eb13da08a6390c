use chrono::{DateTime, Utc};
use eyre::Result;
use regragui_core::models::collections::WEEKLY_SLOTS;
use regragui_core::models::slot::{Slot, WeeklySlots};
use regragui_core::week::{DayKey, WeekKey};
use serde_json::Value;

use super::{decode, encode};
use crate::store::DocumentStore;

pub async fn get_weekly_slots(store: &dyn DocumentStore, field_id: &str, week: WeekKey) -> Result<Option<WeeklySlots>> {
    let id = WeeklySlots::document_id(field_id, week);
    tracing::debug!("Getting weekly slots: {}", id);
    store.get(WEEKLY_SLOTS, &id).await?.map(decode).transpose()
}

pub async fn list_weekly_slots(store: &dyn DocumentStore) -> Result<Vec<WeeklySlots>> {
    store.list(WEEKLY_SLOTS).await?.into_iter().map(decode).collect()
}

/// All weekly documents for `week`, across fields.
pub async fn find_by_week(store: &dyn DocumentStore, week: WeekKey) -> Result<Vec<WeeklySlots>> {
    store
        .find_eq(WEEKLY_SLOTS, "week", &Value::String(week.to_string()))
        .await?
        .into_iter()
        .map(decode)
        .collect()
}

pub async fn find_by_field(store: &dyn DocumentStore, field_id: &str) -> Result<Vec<WeeklySlots>> {
    store
        .find_eq(WEEKLY_SLOTS, "fieldId", &Value::String(field_id.to_string()))
        .await?
        .into_iter()
        .map(decode)
        .collect()
}

/// Creates or fully replaces the document, keyed by `{fieldId}_{week}`.
pub async fn put_weekly_slots(store: &dyn DocumentStore, doc: &WeeklySlots) -> Result<WeeklySlots> {
    let id = WeeklySlots::document_id(&doc.field_id, doc.week);
    store.set(WEEKLY_SLOTS, &id, encode(doc)?).await?;
    tracing::debug!("Weekly slots written: {}", id);
    Ok(WeeklySlots { id, ..doc.clone() })
}

/// Creates the document unless one already exists for that field and week.
pub async fn create_weekly_slots(store: &dyn DocumentStore, doc: &WeeklySlots) -> Result<bool> {
    let id = WeeklySlots::document_id(&doc.field_id, doc.week);
    store.create(WEEKLY_SLOTS, &id, encode(doc)?).await
}

/// Replaces the slot array of `day` if it still equals `expected`.
///
/// Returns false when another writer changed the day in between, or when the
/// document no longer exists.
pub async fn swap_day(
    store: &dyn DocumentStore,
    field_id: &str,
    week: WeekKey,
    day: DayKey,
    expected: &[Slot],
    slots: &[Slot],
) -> Result<bool> {
    let id = WeeklySlots::document_id(field_id, week);
    let path = format!("slots.{}", day);
    store
        .compare_and_swap(
            WEEKLY_SLOTS,
            &id,
            &path,
            &serde_json::to_value(expected)?,
            serde_json::to_value(slots)?,
        )
        .await
}

pub async fn touch(store: &dyn DocumentStore, field_id: &str, week: WeekKey, now: DateTime<Utc>) -> Result<bool> {
    let id = WeeklySlots::document_id(field_id, week);
    store
        .update_path(WEEKLY_SLOTS, &id, "updatedAt", serde_json::to_value(now)?)
        .await
}

pub async fn delete_weekly_slots(store: &dyn DocumentStore, field_id: &str, week: WeekKey) -> Result<bool> {
    store
        .delete(WEEKLY_SLOTS, &WeeklySlots::document_id(field_id, week))
        .await
}
