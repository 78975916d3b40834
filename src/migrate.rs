//! Database migration utilities

use sqlx::{Sqlite, migrate::MigrateDatabase};
use sqlx_migrator::{Migrate, Plan};

use crate::Config;

/// Create the database if needed and apply every pending migration.
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    let url = &config.database.url;

    if !Sqlite::database_exists(url).await? {
        Sqlite::create_database(url).await?;
        tracing::info!(url, "Created database");
    }

    let pool = crate::db::create_pool(url, 1).await?;
    let mut conn = pool.acquire().await?;

    foodgram_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    drop(conn);
    pool.close().await;

    tracing::info!(url, "Database migrated");

    Ok(())
}

/// Drop the database if it exists and run migrations
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    let url = &config.database.url;

    if Sqlite::database_exists(url).await? {
        Sqlite::drop_database(url).await?;
        tracing::info!(url, "Dropped database");
    }

    migrate(config).await
}
