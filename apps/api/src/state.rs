use std::sync::Arc;

use crate::render::DocumentCompiler;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable compiler. Production uses `LatexCompiler`; tests swap in stubs.
    pub compiler: Arc<dyn DocumentCompiler>,
}
