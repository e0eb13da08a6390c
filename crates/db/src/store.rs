//! # Document store
//!
//! The booking data lives in four collections of JSON documents. Services
//! only see the [`DocumentStore`] trait, which offers the handful of
//! operations they need: keyed reads, equality queries, full writes and
//! single-path updates, including a conditional one used to change a day's
//! slot array without losing concurrent edits.
//!
//! Paths are dotted member names, e.g. `slots.lundi`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Every document of `collection`, ordered by id.
    async fn list(&self, collection: &str) -> Result<Vec<Document>>;

    /// Documents whose top-level member `field` equals `value`, ordered by id.
    async fn find_eq(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>>;

    /// Stores `data` under a generated id and returns that id.
    async fn insert(&self, collection: &str, data: Value) -> Result<String>;

    /// Creates or fully overwrites the document `id`.
    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()>;

    /// Creates the document `id` unless it exists. Returns whether it was created.
    async fn create(&self, collection: &str, id: &str, data: Value) -> Result<bool>;

    /// Sets `path` in document `id`. Returns false when the document is missing.
    async fn update_path(&self, collection: &str, id: &str, path: &str, value: Value) -> Result<bool>;

    /// Sets `path` only if it currently equals `expected`.
    /// Returns false when the document is missing or the value has changed.
    async fn compare_and_swap(
        &self,
        collection: &str,
        id: &str,
        path: &str,
        expected: &Value,
        value: Value,
    ) -> Result<bool>;

    async fn delete(&self, collection: &str, id: &str) -> Result<bool>;
}

pub(crate) fn value_at<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, key| current.get(key))
}

/// Writes `value` at `path`, creating the last member only. Intermediate
/// members must already be objects.
pub(crate) fn set_at(data: &mut Value, path: &str, value: Value) -> bool {
    let mut keys: Vec<&str> = path.split('.').collect();
    let Some(last) = keys.pop() else {
        return false;
    };

    let mut current = data;
    for key in keys {
        match current.get_mut(key) {
            Some(next) => current = next,
            None => return false,
        }
    }

    match current.as_object_mut() {
        Some(object) => {
            object.insert(last.to_string(), value);
            true
        }
        None => false,
    }
}
