use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use eyre::Result;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Document, DocumentStore, set_at, value_at};

type Collection = BTreeMap<String, Value>;

/// Process-local store used for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_documents<'a>(docs: impl Iterator<Item = (&'a String, &'a Value)>) -> Vec<Document> {
    docs.map(|(id, data)| Document {
        id: id.clone(),
        data: data.clone(),
    })
    .collect()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| to_documents(docs.iter()))
            .unwrap_or_default())
    }

    async fn find_eq(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| to_documents(docs.iter().filter(|(_, data)| data.get(field) == Some(value))))
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, data: Value) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), data);
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn create(&self, collection: &str, id: &str, data: Value) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Ok(false);
        }
        docs.insert(id.to_string(), data);
        Ok(true)
    }

    async fn update_path(&self, collection: &str, id: &str, path: &str, value: Value) -> Result<bool> {
        let mut collections = self.collections.write().await;
        match collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) {
            Some(data) => Ok(set_at(data, path, value)),
            None => Ok(false),
        }
    }

    async fn compare_and_swap(
        &self,
        collection: &str,
        id: &str,
        path: &str,
        expected: &Value,
        value: Value,
    ) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(data) = collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) else {
            return Ok(false);
        };
        if value_at(data, path) != Some(expected) {
            return Ok(false);
        }
        Ok(set_at(data, path, value))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .is_some())
    }
}
