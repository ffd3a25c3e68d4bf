mod coaching;
mod config;
mod errors;
mod history;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::coaching::catalog::RoleCatalog;
use crate::coaching::parser::MarkerParser;
use crate::config::Config;
use crate::history::store::InteractionLog;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Coach v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the inference client
    let llm = LlmClient::new(&config)?;
    info!("LLM client initialized (endpoint: {})", llm.endpoint());

    // Question catalog: built-in unless a JSON override is configured
    let catalog = match &config.role_catalog_path {
        Some(path) => {
            let catalog = RoleCatalog::from_json_file(path)?;
            info!("Loaded role catalog from {}", path.display());
            catalog
        }
        None => RoleCatalog::builtin(),
    };
    info!("Role catalog has {} role(s)", catalog.roles().len());

    // Load the interview log; an unreadable log degrades to a session-only log
    // and the file on disk is left untouched.
    let log = match InteractionLog::load(&config.log_path) {
        Ok(log) => log,
        Err(e) => {
            error!(
                "Could not load interview log {}: {e}",
                config.log_path.display()
            );
            warn!("Continuing without persistence; new records are kept for this session only");
            InteractionLog::session_only(&config.log_path, e.to_string())
        }
    };

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        parser: Arc::new(MarkerParser),
        log: Arc::new(Mutex::new(log)),
        catalog: Arc::new(catalog),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
