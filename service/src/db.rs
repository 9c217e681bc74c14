use std::sync::Arc;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use crate::config::{Config, DatabaseConfig, StorageBackend};
use crate::member::{InMemoryMemberRepo, MemberRepo, PgMemberRepo};

/// Connect to `PostgreSQL` and confirm the connection answers.
///
/// A single attempt is made; an unreachable database is fatal at startup.
///
/// # Errors
///
/// Returns an error if the pool cannot connect or the ping query fails.
pub async fn setup_database(config: &DatabaseConfig) -> Result<PgPool, anyhow::Error> {
    info!("Attempting to connect to Postgres...");

    let pool = match PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
    {
        Ok(pool) => pool,
        Err(err) => {
            warn!(error = %err, "Postgres unreachable");
            return Err(err.into());
        }
    };

    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await?;

    info!("Connected to database");
    Ok(pool)
}

/// Construct the member store selected by configuration.
///
/// # Errors
///
/// Returns an error if the `PostgreSQL` backend is selected and the database
/// cannot be reached.
pub async fn build_member_repo(config: &Config) -> Result<Arc<dyn MemberRepo>, anyhow::Error> {
    match config.storage_backend() {
        StorageBackend::Memory => {
            info!("Using in-memory member store; data is lost on restart");
            Ok(Arc::new(InMemoryMemberRepo::new()))
        }
        StorageBackend::Postgres => {
            let pool = setup_database(&config.database).await?;
            Ok(Arc::new(PgMemberRepo::new(pool)))
        }
    }
}
