//! Database bootstrap: target database, connection pool and schema

use std::str::FromStr;

use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Connection, PgConnection, PgPool,
};

use crate::{config::DatabaseConfig, error::AppResult};

/// Idempotent schema, applied in order on every startup
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        quantity INT NOT NULL CHECK (quantity >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS book_borrows (
        id SERIAL PRIMARY KEY,
        user_id INT NOT NULL REFERENCES users(id),
        book_id INT NOT NULL REFERENCES books(id),
        borrow_date TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT CURRENT_TIMESTAMP,
        return_date TIMESTAMP WITH TIME ZONE,
        CONSTRAINT unique_borrow UNIQUE (user_id, book_id, return_date)
    )
    "#,
    // At most one active borrow per (user, book)
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS book_borrows_active_idx
        ON book_borrows (user_id, book_id)
        WHERE return_date IS NULL
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS books_title_idx ON books (title)
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS users_name_idx ON users (first_name, last_name)
    "#,
];

/// Connect to the server, create the target database when it is missing,
/// then return a pool on it with the schema in place.
pub async fn connect(config: &DatabaseConfig) -> AppResult<PgPool> {
    let server_options = PgConnectOptions::from_str(&config.url)?;

    ensure_database(&server_options, &config.name).await?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(server_options.database(&config.name))
        .await?;

    tracing::info!(database = %config.name, "Connected to database");

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create `name` on the server unless it already exists
pub async fn ensure_database(server_options: &PgConnectOptions, name: &str) -> AppResult<()> {
    let mut conn = PgConnection::connect_with(server_options).await?;

    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)",
    )
    .bind(name)
    .fetch_one(&mut conn)
    .await?;

    tracing::debug!(database = %name, exists, "Checked target database");

    if !exists {
        // Identifiers cannot be bound as parameters
        sqlx::query(&format!("CREATE DATABASE {}", quote_identifier(name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %name, "Database created");
    }

    conn.close().await?;
    Ok(())
}

/// Create the tables and indexes if they are absent
pub async fn create_schema(pool: &PgPool) -> AppResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Tables created or already exist");
    Ok(())
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
