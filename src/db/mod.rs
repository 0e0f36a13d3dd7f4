// Database module - provides data access layer

use std::time::Duration;

use color_eyre::Result;
use sqlx::postgres::PgPoolOptions;

// Re-export models for convenience
pub mod models;
pub use models::*;

// Internal modules
mod question;
mod quiz;
mod schema;
mod score;
mod theme;
mod user;

// Main database handle
#[derive(Clone)]
pub struct Db {
    pool: sqlx::PgPool,
}

impl Db {
    pub async fn new(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await?;

        // Verify connection
        let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await?;
        assert_eq!(one, 1);

        // Initialize schema
        schema::create_schema(&pool).await?;

        tracing::info!("database connection has been verified");

        Ok(Self { pool })
    }
}
