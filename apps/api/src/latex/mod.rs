// LaTeX generation: escaping, injection, per-template rule tables and renderers.
// Everything in this module is pure and synchronous; safe to call from any task.

pub mod assets;
pub mod escape;
pub mod injection;
pub mod registry;
pub mod renderer;
pub mod rules;
pub mod templates;

use thiserror::Error;

pub use registry::{find_template, Engine, TemplateInfo, TEMPLATES};
pub use renderer::renderer_for;

/// Errors raised while turning resume data into LaTeX source.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Layout asset for {template_id} is missing its `{marker}` marker")]
    StructuralAsset {
        template_id: String,
        marker: &'static str,
    },

    #[error("No layout asset is bundled for {0}")]
    MissingAsset(String),
}
