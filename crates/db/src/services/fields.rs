use chrono::{DateTime, Utc};
use regragui_core::errors::{BookingError, BookingResult};
use regragui_core::models::field::{Field, UpdateFieldRequest};

use crate::repositories::field;
use crate::store::DocumentStore;

pub async fn get_field(store: &dyn DocumentStore, id: &str) -> BookingResult<Field> {
    field::get_field(store, id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Field {} not found", id)))
}

fn validate(field: &Field) -> BookingResult<()> {
    let blank: Vec<&str> = [
        ("name", &field.name),
        ("centre", &field.centre),
        ("image", &field.image),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.trim().is_empty().then_some(key))
    .collect();

    if blank.is_empty() {
        Ok(())
    } else {
        Err(BookingError::Validation(format!("Field is missing: {}", blank.join(", "))))
    }
}

/// Creates `field`, or replaces it when it carries the id of an existing one.
pub async fn save_field(store: &dyn DocumentStore, mut field: Field, now: DateTime<Utc>) -> BookingResult<Field> {
    validate(&field)?;

    if !field.id.is_empty() {
        if let Some(existing) = field::get_field(store, &field.id).await? {
            field.created_at = existing.created_at;
        }
    }
    field.created_at.get_or_insert(now);
    field.updated_at = Some(now);

    Ok(field::save_field(store, &field).await?)
}

pub async fn update_field(
    store: &dyn DocumentStore,
    id: &str,
    update: UpdateFieldRequest,
    now: DateTime<Utc>,
) -> BookingResult<Field> {
    let mut field = get_field(store, id).await?;
    update.apply(&mut field);
    validate(&field)?;
    field.updated_at = Some(now);
    Ok(field::save_field(store, &field).await?)
}

pub async fn delete_field(store: &dyn DocumentStore, id: &str) -> BookingResult<()> {
    if field::delete_field(store, id).await? {
        tracing::info!("Field {} deleted", id);
        Ok(())
    } else {
        Err(BookingError::NotFound(format!("Field {} not found", id)))
    }
}
