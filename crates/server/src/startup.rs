use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use service::client::{
    repo::{InMemoryClientRepository, SeaOrmClientRepository},
    ClientRepository,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{errors::StartupError, routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> Result<SocketAddr, StartupError> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => (cfg.server.host, cfg.server.port),
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    format!("{host}:{port}")
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {host}:{port}: {e}")))
}

/// `CLIENT_STORE=memory` runs without Postgres; anything else connects using `AppConfig.database`.
async fn build_repository() -> anyhow::Result<Arc<dyn ClientRepository>> {
    if env::var("CLIENT_STORE").is_ok_and(|v| v.eq_ignore_ascii_case("memory")) {
        warn!("CLIENT_STORE=memory: records live only as long as the process");
        return Ok(Arc::new(InMemoryClientRepository::new()));
    }

    let cfg = AppConfig::load_or_env()?;
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }
    Ok(Arc::new(SeaOrmClientRepository::new(db)))
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
/// Logging and `.env` loading belong to the binary.
pub async fn run() -> anyhow::Result<()> {
    let state = ServerState::new(build_repository().await?);
    let app: Router = routes::build_router(state, build_cors());

    let addr = load_bind_addr()?;
    info!(%addr, "starting client registry server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
