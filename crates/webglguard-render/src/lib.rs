//! Rendering utilities for terminals and CI surfaces (plain text, Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod text;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableLocation, RenderableOutcome, RenderableReport,
    RenderableVerdictStatus,
};
pub use text::render_text;
