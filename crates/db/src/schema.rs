use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // One table holds every collection; documents are JSONB blobs
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            collection VARCHAR(64) NOT NULL,
            id VARCHAR(255) NOT NULL,
            data JSONB NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (collection, id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Serves the containment queries behind DocumentStore::find_eq
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_documents_data
        ON documents USING GIN (data jsonb_path_ops);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
