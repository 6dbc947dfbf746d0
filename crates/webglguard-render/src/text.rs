use crate::{RenderableReport, RenderableVerdictStatus};

/// Render one line per rule followed by the overall verdict.
///
/// Format:
/// `PASS|FAIL <description> (expected=<X>, actual=<Y>)`, then
/// `OVERALL: PASS|FAIL (<n>/<m> rules passed)`.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();

    for r in &report.results {
        out.push_str(&format!(
            "{} {} (expected={}, actual={})\n",
            if r.passed { "PASS" } else { "FAIL" },
            r.description,
            r.expected,
            r.actual.as_deref().unwrap_or("<missing>")
        ));
    }

    let passed = report.results.iter().filter(|r| r.passed).count();
    let overall = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "OVERALL: {} ({}/{} rules passed)\n",
        overall,
        passed,
        report.results.len()
    ));

    out
}
