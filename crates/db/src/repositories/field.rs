use eyre::Result;
use regragui_core::models::collections::FIELDS;
use regragui_core::models::field::Field;

use super::{decode, encode};
use crate::store::DocumentStore;

pub async fn get_field(store: &dyn DocumentStore, id: &str) -> Result<Option<Field>> {
    tracing::debug!("Getting field by id: {}", id);
    store.get(FIELDS, id).await?.map(decode).transpose()
}

pub async fn list_fields(store: &dyn DocumentStore) -> Result<Vec<Field>> {
    store.list(FIELDS).await?.into_iter().map(decode).collect()
}

/// Writes `field`, generating an id when it has none. Returns the stored field.
pub async fn save_field(store: &dyn DocumentStore, field: &Field) -> Result<Field> {
    let data = encode(field)?;
    let id = if field.id.is_empty() {
        store.insert(FIELDS, data).await?
    } else {
        store.set(FIELDS, &field.id, data).await?;
        field.id.clone()
    };

    tracing::debug!("Field saved: id={}, name={}", id, field.name);
    Ok(Field { id, ..field.clone() })
}

pub async fn delete_field(store: &dyn DocumentStore, id: &str) -> Result<bool> {
    store.delete(FIELDS, id).await
}
