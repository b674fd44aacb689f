//! Backend entry-point: loads settings, wires repositories and serves HTTP.

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use calculations::inbound::http::health::HealthState;
use calculations::inbound::http::session_config::{BuildMode, session_settings_from_env};
use calculations::outbound::persistence::DbPool;
use calculations::server::{ServerConfig, create_server};
use calculations::settings::CalcSettings;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CalcSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    );
    if let Some(pool_config) = settings.pool_config() {
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }
    info!(
        bind_addr = %config.bind_addr(),
        database = config.has_database(),
        "starting server"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
