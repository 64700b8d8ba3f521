use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Applies the embedded migrations. Safe to run on every startup.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to apply database migrations")?;

    info!("Database schema is up to date");
    Ok(())
}

#[cfg(test)]
pub mod test_support {
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;

    fn test_db_url() -> String {
        std::env::var("TEST_DATABASE_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .expect("TEST_DATABASE_URL must be set to run database tests")
    }

    fn schema_db_url(base: &str, schema: &str) -> String {
        let separator = if base.contains('?') { "&" } else { "?" };
        format!("{base}{separator}options=-csearch_path%3D{schema}")
    }

    /// A migrated pool bound to a fresh schema. Tests using it are
    /// `#[ignore]`d and run with `cargo test -- --ignored`.
    pub async fn isolated_pool() -> PgPool {
        let db_url = test_db_url();

        let schema = format!("intake_test_{}", uuid::Uuid::new_v4().simple());

        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect(&db_url)
            .await
            .expect("DB connect should succeed");
        sqlx::query(&format!("CREATE SCHEMA {schema}"))
            .execute(&admin)
            .await
            .expect("create schema should succeed");
        admin.close().await;

        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(&schema_db_url(&db_url, &schema))
            .await
            .expect("schema-scoped connect should succeed");
        super::run_migrations(&pool)
            .await
            .expect("migrations should apply");

        pool
    }
}
