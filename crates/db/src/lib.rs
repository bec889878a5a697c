//! PostgreSQL persistence for the esports records store.
//!
//! Entity models and filters live in [`models`], the single generic
//! repository in [`repositories`], and the seams the pipeline depends on in
//! [`store`].

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod bind;
pub mod config;
pub mod error;
pub mod models;
pub mod record;
pub mod repositories;
pub mod store;

pub use config::DbConfig;
pub use error::{DataError, DataResult};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from the loaded configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Apply every pending migration under `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
