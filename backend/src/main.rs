//! Backend entry-point: loads settings, prepares storage, and serves the REST API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gym_buddy::inbound::http::health::HealthState;
use gym_buddy::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use gym_buddy::settings::ServerSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

/// Apply migrations and open the connection pool.
async fn connect(settings: &ServerSettings, database_url: &str) -> std::io::Result<DbPool> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(std::io::Error::other)?;
    info!(applied, "database schema up to date");

    let pool_config =
        PoolConfig::new(database_url).with_max_size(settings.pool_max_size);
    DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(format!("database pool: {err}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;

    let mut config = ServerConfig::new(settings.bind_addr());
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect(&settings, database_url).await?);
    }

    info!(addr = %config.bind_addr(), "starting gym-buddy");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
