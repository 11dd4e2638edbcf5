mod config;
mod errors;
mod latex;
mod models;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::render::LatexCompiler;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume API v{}", env!("CARGO_PKG_VERSION"));

    let compiler = LatexCompiler::new(config.latex_engine.clone(), config.compile_timeout)
        .with_scratch_root(config.scratch_dir.clone());
    info!(
        "LaTeX compiler: {:?}, timeout {}s, scratch root {}",
        config.latex_engine,
        config.compile_timeout.as_secs(),
        config
            .scratch_dir
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<system temp>".to_string())
    );
    info!("{} templates registered", latex::TEMPLATES.len());

    let state = AppState {
        compiler: Arc::new(compiler),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
