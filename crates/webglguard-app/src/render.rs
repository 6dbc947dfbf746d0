//! Render use cases: plain text, markdown, and GitHub annotations from in-memory reports.

use webglguard_render::RenderableReport;

pub fn render_text(report: &RenderableReport) -> String {
    webglguard_render::render_text(report)
}

pub fn render_markdown(report: &RenderableReport) -> String {
    webglguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    webglguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}
