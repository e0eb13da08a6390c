pub mod field;
pub mod reservation;
pub mod slot;
pub mod weekly_slots;

use eyre::{Result, WrapErr, eyre};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::store::Document;

/// Turns a stored document into `T`, exposing the document id as `id`.
pub(crate) fn decode<T: DeserializeOwned>(document: Document) -> Result<T> {
    let Document { id, mut data } = document;
    let object = data
        .as_object_mut()
        .ok_or_else(|| eyre!("Malformed document {}: not a JSON object", id))?;
    object.insert("id".to_string(), Value::String(id.clone()));
    serde_json::from_value(data).wrap_err_with(|| format!("Malformed document {}", id))
}

/// Serialises `value` for storage. The id is the document key, not a member.
pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Value> {
    let mut data = serde_json::to_value(value)?;
    if let Some(object) = data.as_object_mut() {
        object.remove("id");
    }
    Ok(data)
}
