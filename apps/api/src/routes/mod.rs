pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::render::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // LaTeX API
        .route(
            "/api/v1/latex/templates",
            get(handlers::handle_list_templates),
        )
        .route("/api/v1/latex/compile", post(handlers::handle_compile))
        .route(
            "/api/v1/latex/compile/preview",
            post(handlers::handle_preview),
        )
        .fallback(not_found)
        .with_state(state)
}
