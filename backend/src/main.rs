//! Backend entry-point: loads settings, prepares persistence and serves the
//! registration and sign-in pages.

mod server;

use std::io;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use wordweave::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use wordweave::settings::{AppSettings, load_settings, resolve_session_key};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings().map_err(|e| io::Error::other(format!("settings: {e}")))?;
    let key = resolve_session_key(&settings).map_err(io::Error::other)?;
    let same_site = settings.same_site().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(key, settings.cookie_secure(), same_site, bind_addr)
        .with_image_dir(settings.image_dir());
    if let Some(pool) = connect_database(&settings).await? {
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; accounts are kept in memory");
    }

    info!(%bind_addr, "starting server");
    create_server(config)?.await
}

/// Apply migrations and open the pool when a database URL is configured.
async fn connect_database(settings: &AppSettings) -> io::Result<Option<DbPool>> {
    let Some(url) = settings.database_url.as_deref() else {
        return Ok(None);
    };
    run_pending_migrations(url)
        .await
        .map_err(io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.database_max_connections()))
        .await
        .map_err(io::Error::other)?;
    Ok(Some(pool))
}
