use actix_web::{App, HttpServer, web};
use anyhow::Context;
use eraya::data::sqlite::SqliteStore;
use eraya::infrastructure::config::Config;
use eraya::infrastructure::logging::init_logging;
use eraya::presentation::assets::{StaticAssets, not_found};
use eraya::presentation::middleware::RequestTrace;
use eraya::presentation::routes::{AppState, configure};
use eraya::presentation::session::{SessionKeys, SessionMiddleware};
use std::sync::Arc;
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_logging(&config.log_level);
    info!(config = ?config, "Configuration loaded");
    if config.uses_default_secret() {
        warn!("SECRET_KEY is not set; sessions are signed with the development key");
    }

    let store = Arc::new(SqliteStore::open(&config.database_path)?);
    info!(path = %config.database_path.display(), "Database ready");

    let assets = StaticAssets::new(&config.static_dir)?;
    let sessions = Arc::new(SessionKeys::from_config(&config));
    let state = web::Data::new(AppState::new(store, Arc::clone(&sessions), assets));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SessionMiddleware::new(Arc::clone(&sessions)))
            .wrap(RequestTrace)
            .configure(configure)
            .default_service(web::to(not_found))
    });

    let bind_addr = format!("{}:{}", config.host, config.port);
    let server = server
        .bind((config.host.as_str(), config.port))
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!(
        address = %bind_addr,
        routes = %"POST /api/register, POST /api/login, POST /api/logout, GET /api/me, GET|POST /api/appointments, GET|POST /api/symptoms, GET /*",
        "Starting HTTP server"
    );
    server.run().await?;
    Ok(())
}
