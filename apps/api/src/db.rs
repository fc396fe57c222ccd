use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

/// Creates the PostgreSQL pool and applies any pending schema migrations.
/// The schema (uniqueness constraints included) lives in `migrations/`; the
/// application ledger and skill store rely on those constraints, so the pool
/// is not handed out until they are in place.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    info!("Connecting to the placement database...");

    let pool = PgPoolOptions::new()
        .max_connections(config.db_pool_size)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!(
        "Placement database ready (pool size {})",
        config.db_pool_size
    );
    Ok(pool)
}
