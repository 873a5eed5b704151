//! PostgreSQL connection pool initialization.
//!
//! Reads `DATABASE_URL`, builds the pool, and applies pending migrations
//! from `migrations/` before the server starts taking requests.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

/// Initializes the connection pool and runs migrations.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset, the database is unreachable, or a
/// migration fails. Called once during startup; a broken database is fatal.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
