use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use serde_json::Value;
use uuid::Uuid;

use super::{Document, DocumentStore};
use crate::DbPool;
use crate::models::DbDocument;

/// Document store backed by the `documents` table.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<DbDocument> for Document {
    fn from(row: DbDocument) -> Self {
        Document {
            id: row.id,
            data: row.data,
        }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        tracing::debug!("Getting document {}/{}", collection, id);

        let row = sqlx::query_as::<_, DbDocument>(
            r#"
            SELECT collection, id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Document::from))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let rows = sqlx::query_as::<_, DbDocument>(
            r#"
            SELECT collection, id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1
            ORDER BY id ASC
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn find_eq(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>> {
        tracing::debug!("Querying {} where {} == {}", collection, field, value);

        let rows = sqlx::query_as::<_, DbDocument>(
            r#"
            SELECT collection, id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND data @> jsonb_build_object($2::text, $3::jsonb)
            ORDER BY id ASC
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn insert(&self, collection: &str, data: Value) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(data)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Inserted document {}/{}", collection, id);
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (collection, id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(data)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn create(&self, collection: &str, id: &str, data: Value) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (collection, id) DO NOTHING
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(data)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_path(&self, collection: &str, id: &str, path: &str, value: Value) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET data = jsonb_set(data, string_to_array($3, '.'), $4, true),
                updated_at = $5
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(path)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn compare_and_swap(
        &self,
        collection: &str,
        id: &str,
        path: &str,
        expected: &Value,
        value: Value,
    ) -> Result<bool> {
        // The row lock taken by UPDATE serialises concurrent swaps on the same document
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET data = jsonb_set(data, string_to_array($3, '.'), $4, true),
                updated_at = $6
            WHERE collection = $1 AND id = $2
              AND data #> string_to_array($3, '.') = $5
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(path)
        .bind(value)
        .bind(expected)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            "Conditional update of {}/{} at {}: {}",
            collection,
            id,
            path,
            if result.rows_affected() == 1 { "applied" } else { "rejected" }
        );
        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
