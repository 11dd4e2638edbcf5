//! Axum route handlers for the LaTeX API.

use std::ops::RangeInclusive;

use axum::{
    extract::{Query, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::latex::{find_template, renderer_for, Engine, TemplateInfo, TEMPLATES};
use crate::models::resume::{null_as_default, ResumeData};
use crate::render::preview;
use crate::state::AppState;

/// Accepted preview resolutions. Bounds the size of the rasterized page.
pub const DPI_RANGE: RangeInclusive<u32> = 36..=600;

const X_PAGE_COUNT: HeaderName = HeaderName::from_static("x-page-count");

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompileRequest {
    pub template_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resume_data: ResumeData,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

fn default_dpi() -> u32 {
    150
}

/// Looks the template up in the registry, then renders the LaTeX source.
/// Unknown ids are rejected before any rendering work.
fn render_source(request: &CompileRequest) -> Result<(String, Engine), AppError> {
    let info = find_template(&request.template_id)
        .ok_or_else(|| AppError::UnknownTemplate(request.template_id.clone()))?;

    let ignored = info.ignored_sections(&request.resume_data);
    if !ignored.is_empty() {
        debug!("{} has no layout for sections {:?}; skipping them", info.id, ignored);
    }

    let source = renderer_for(info.id)?.render(&request.resume_data)?;
    debug!("Rendered {} ({} bytes of LaTeX)", info.id, source.len());
    Ok((source, info.engine))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/latex/templates
pub async fn handle_list_templates() -> Json<&'static [TemplateInfo]> {
    Json(&TEMPLATES[..])
}

/// POST /api/v1/latex/compile
///
/// Renders the resume with the requested template and returns the PDF.
pub async fn handle_compile(
    State(state): State<AppState>,
    Json(request): Json<CompileRequest>,
) -> Result<Response, AppError> {
    let (source, engine) = render_source(&request)?;
    let pdf = state.compiler.compile(&source, engine).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "inline; filename=resume.pdf"),
        ],
        pdf,
    )
        .into_response())
}

/// POST /api/v1/latex/compile/preview?page=0&dpi=150
///
/// Compiles, then returns one page as PNG. The total page count is in the
/// `X-Page-Count` header so clients can paginate.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
    Json(request): Json<CompileRequest>,
) -> Result<Response, AppError> {
    if !DPI_RANGE.contains(&query.dpi) {
        return Err(AppError::Validation(format!(
            "dpi must be between {} and {}",
            DPI_RANGE.start(),
            DPI_RANGE.end()
        )));
    }

    let (source, engine) = render_source(&request)?;
    let page = preview(state.compiler.as_ref(), &source, engine, query.page, query.dpi).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CACHE_CONTROL, "no-cache".to_string()),
            (X_PAGE_COUNT, page.page_count.to_string()),
        ],
        page.png,
    )
        .into_response())
}
