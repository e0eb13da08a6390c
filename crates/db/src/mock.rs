use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use crate::store::{Document, DocumentStore};

// Mock store for failure injection in tests
mock! {
    pub Store {}

    #[async_trait]
    impl DocumentStore for Store {
        async fn get(&self, collection: &str, id: &str) -> eyre::Result<Option<Document>>;

        async fn list(&self, collection: &str) -> eyre::Result<Vec<Document>>;

        async fn find_eq(
            &self,
            collection: &str,
            field: &str,
            value: &Value,
        ) -> eyre::Result<Vec<Document>>;

        async fn insert(&self, collection: &str, data: Value) -> eyre::Result<String>;

        async fn set(&self, collection: &str, id: &str, data: Value) -> eyre::Result<()>;

        async fn create(&self, collection: &str, id: &str, data: Value) -> eyre::Result<bool>;

        async fn update_path(
            &self,
            collection: &str,
            id: &str,
            path: &str,
            value: Value,
        ) -> eyre::Result<bool>;

        async fn compare_and_swap(
            &self,
            collection: &str,
            id: &str,
            path: &str,
            expected: &Value,
            value: Value,
        ) -> eyre::Result<bool>;

        async fn delete(&self, collection: &str, id: &str) -> eyre::Result<bool>;
    }
}
