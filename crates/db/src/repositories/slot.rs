//! Legacy per-date slot records.

use eyre::Result;
use regragui_core::models::collections::SLOTS;
use regragui_core::models::slot::FlatSlot;
use serde_json::Value;

use super::{decode, encode};
use crate::store::DocumentStore;

pub async fn insert_slot(store: &dyn DocumentStore, slot: &FlatSlot) -> Result<FlatSlot> {
    let id = store.insert(SLOTS, encode(slot)?).await?;
    Ok(FlatSlot { id, ..slot.clone() })
}

pub async fn list_slots(store: &dyn DocumentStore) -> Result<Vec<FlatSlot>> {
    store.list(SLOTS).await?.into_iter().map(decode).collect()
}

pub async fn find_slots_by_field(store: &dyn DocumentStore, field_id: &str) -> Result<Vec<FlatSlot>> {
    store
        .find_eq(SLOTS, "fieldId", &Value::String(field_id.to_string()))
        .await?
        .into_iter()
        .map(decode)
        .collect()
}
