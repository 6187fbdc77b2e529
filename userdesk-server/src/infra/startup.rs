use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userdesk_core::database::PostgresDatabase;

use crate::infra::config::Config;

/// Install the global tracing subscriber. Override the filter via RUST_LOG.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Open the pool and ping the server. Any failure here is fatal.
pub async fn connect_database(config: &Config) -> anyhow::Result<PostgresDatabase> {
    let database_url = config.database.require_url().inspect_err(|err| {
        error!(error = %err, "cannot start without a usable database URL");
    })?;

    let database = PostgresDatabase::new(database_url, config.database.max_connections)
        .await
        .inspect_err(|err| error!(error = %err, "PostgreSQL connection failed"))
        .context("failed to connect to PostgreSQL")?;

    info!("Successfully connected to PostgreSQL");
    Ok(database)
}
