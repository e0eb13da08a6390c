pub mod mock;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod services;
pub mod store;

use std::sync::Arc;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::store::{DocumentStore, memory::MemoryStore, postgres::PgStore};

pub type DbPool = Pool<Postgres>;

/// `DATABASE_URL` value selecting the in-process store.
pub const MEMORY_URL: &str = "memory://";

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Opens the document store named by `database_url`.
///
/// `memory://` gives a fresh in-memory store; anything else is treated as a
/// PostgreSQL connection string and the schema is created if needed.
pub async fn connect_store(database_url: &str) -> Result<Arc<dyn DocumentStore>> {
    if database_url == MEMORY_URL {
        info!("Using the in-memory document store; data is lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = create_pool(database_url).await?;
    schema::initialize_database(&pool).await?;
    Ok(Arc::new(PgStore::new(pool)))
}
