use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StoreKind};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::product::repo::{memory::InMemoryProductRepository, seaorm::SeaOrmProductRepository};
use service::product::repository::ProductRepository;

use crate::{routes, state::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Where the running configuration came from.
#[derive(Debug)]
pub enum ConfigSource {
    File,
    /// No usable config file; the reason is kept for the startup log.
    Env(String),
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise env vars.
/// Runs before logging is up, so the caller reports the source.
pub fn load_config() -> anyhow::Result<(AppConfig, ConfigSource)> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok((cfg, ConfigSource::File)),
        Err(file_err) => {
            let mut cfg = AppConfig::from_env();
            cfg.normalize_and_validate()?;
            Ok((cfg, ConfigSource::Env(file_err.to_string())))
        }
    }
}

pub fn log_config_source(source: &ConfigSource) {
    match source {
        ConfigSource::File => info!(event = "config_loaded", source = "file", "configuration loaded"),
        ConfigSource::Env(reason) => {
            info!(event = "config_loaded", source = "env", reason = %reason, "no usable config file; using environment")
        }
    }
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Pick the store implementation named by `server.store`.
pub async fn build_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn ProductRepository>> {
    match cfg.server.store {
        StoreKind::Memory => {
            info!(store = "memory", "product data will not survive a restart");
            Ok(Arc::new(InMemoryProductRepository::new()))
        }
        StoreKind::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!(store = "postgres", event = "migrations_applied", "database schema up to date");
            Ok(Arc::new(SeaOrmProductRepository::new(db)))
        }
    }
}

/// Assemble the application router for an already-built store.
pub fn build_app(repo: Arc<dyn ProductRepository>) -> Router {
    routes::build_router(AppState::new(repo), build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only by kill");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: load config, init logging, then serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let (cfg, source) = load_config()?;
    common::utils::logging::init_logging(cfg.logging.json);
    log_config_source(&source);
    run_with_config(cfg).await
}

/// Serve with a config that has already been loaded and validated.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let repo = build_repository(&cfg).await?;
    let app = build_app(repo);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(event = "stop", "server stopped");
    Ok(())
}
