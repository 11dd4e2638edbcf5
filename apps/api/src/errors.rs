use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::latex::RenderError;
use crate::render::CompileError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Page {page} out of range (0-{})", .page_count.saturating_sub(1))]
    PageOutOfRange { page: i64, page_count: usize },

    #[error("LaTeX compilation failed:\n{0}")]
    CompilationFailed(String),

    #[error("Template asset error: {0}")]
    TemplateAsset(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::UnknownTemplate(id) => AppError::UnknownTemplate(id),
            other => AppError::TemplateAsset(other.to_string()),
        }
    }
}

impl From<CompileError> for AppError {
    fn from(e: CompileError) -> Self {
        match e {
            CompileError::CompilationFailure { diagnostic } => AppError::CompilationFailed(diagnostic),
            CompileError::PageOutOfRange { page, page_count } => {
                AppError::PageOutOfRange { page, page_count }
            }
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::UnknownTemplate(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_TEMPLATE"),
            AppError::PageOutOfRange { .. } => (StatusCode::BAD_REQUEST, "PAGE_OUT_OF_RANGE"),
            AppError::CompilationFailed(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "COMPILATION_FAILED")
            }
            AppError::TemplateAsset(msg) => {
                tracing::error!("Template asset error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "TEMPLATE_ASSET_ERROR")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = match &self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_template_is_client_error_naming_the_id() {
        let err: AppError = RenderError::UnknownTemplate("template9".to_string()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNKNOWN_TEMPLATE");
        assert_eq!(body["error"]["message"], "Unknown template: template9");
    }

    #[tokio::test]
    async fn test_compilation_failure_carries_diagnostic() {
        let err: AppError = CompileError::CompilationFailure {
            diagnostic: "! Missing $ inserted.".to_string(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "COMPILATION_FAILED");
        assert_eq!(
            body["error"]["message"],
            "LaTeX compilation failed:\n! Missing $ inserted."
        );
    }

    #[tokio::test]
    async fn test_page_out_of_range_names_range() {
        let err: AppError = CompileError::PageOutOfRange {
            page: 4,
            page_count: 2,
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PAGE_OUT_OF_RANGE");
        assert_eq!(body["error"]["message"], "Page 4 out of range (0-1)");
    }

    #[tokio::test]
    async fn test_internal_errors_are_opaque() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "/tmp/resume-abc: disk full");
        let err: AppError = CompileError::Io(io).into();
        assert!(matches!(err, AppError::Internal(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(!body["error"]["message"].as_str().unwrap().contains("disk full"));
    }

    #[tokio::test]
    async fn test_structural_asset_error_is_server_error() {
        let err: AppError = RenderError::StructuralAsset {
            template_id: "template3".to_string(),
            marker: r"\begin{document}",
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["code"], "TEMPLATE_ASSET_ERROR");
    }
}
