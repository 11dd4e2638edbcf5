// Compile and preview pipeline.
//
// Generated LaTeX goes through an external engine in a private scratch
// directory; previews rasterize one page of the result with MuPDF.
// Compilation is the only slow, externally scheduled step in a request.

pub mod compile;
pub mod handlers;
pub mod preview;
pub mod process;

use thiserror::Error;

pub use compile::{DocumentCompiler, EngineMode, LatexCompiler};
pub use preview::preview;

use process::ToolError;

/// Errors raised by the compile and preview pipeline.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The engine produced no PDF (or ran past its timeout).
    #[error("LaTeX compilation failed:\n{diagnostic}")]
    CompilationFailure { diagnostic: String },

    #[error("Page {page} out of range (0-{})", .page_count.saturating_sub(1))]
    PageOutOfRange { page: i64, page_count: usize },

    #[error("Failed to create scratch directory: {0}")]
    ScratchDir(#[source] std::io::Error),

    #[error("Scratch I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("Task join error: {0}")]
    Join(String),
}
