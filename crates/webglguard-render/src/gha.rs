use crate::RenderableReport;

/// Render failing rules as GitHub Actions workflow command annotations.
///
/// Format:
/// `::error file={path},line={line}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for r in report.results.iter().filter(|r| !r.passed) {
        let mut meta = String::new();
        if let Some(loc) = &r.location {
            meta.push_str(&format!("file={}", loc.path.as_str()));
            if let Some(line) = loc.line {
                meta.push_str(&format!(",line={}", line));
            }
        }

        let code = r.code.as_deref().unwrap_or("violation");
        let message = format!(
            "[{}:{}] {} (expected={}, actual={})",
            r.rule_id,
            code,
            r.description,
            r.expected,
            r.actual.as_deref().unwrap_or("<missing>")
        )
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");

        if meta.is_empty() {
            out.push(format!("::error::{}", message));
        } else {
            out.push(format!("::error {}::{}", meta, message));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderableLocation;
    use crate::model::fixtures::{failing, outcome, report};

    #[test]
    fn only_failures_are_annotated() {
        let mut gzip = failing(
            outcome(
                "build.compression_gzip",
                "build script uses Gzip compression",
                "contains 'WebGLCompressionFormat.Gzip'",
                Some("not found"),
            ),
            "violation",
        );
        gzip.location = Some(RenderableLocation {
            path: "Assets/Build/Builder.cs".to_string(),
            line: None,
        });
        let r = report(vec![
            outcome("memory.initial_size", "initial memory size is 64 MB", "64", Some("64")),
            gzip,
            failing(
                outcome("mipmaps.active", "streaming mipmaps enabled", "true", None),
                "missing_key",
            ),
        ]);

        let lines = render_github_annotations(&r);
        insta::assert_snapshot!(lines.join("\n"), @r"
        ::error file=Assets/Build/Builder.cs::[build.compression_gzip:violation] build script uses Gzip compression (expected=contains 'WebGLCompressionFormat.Gzip', actual=not found)
        ::error::[mipmaps.active:missing_key] streaming mipmaps enabled (expected=true, actual=<missing>)
        ");
    }

    #[test]
    fn escapes_workflow_command_characters() {
        let r = report(vec![failing(
            outcome("custom.pct", "100% done\nnext", "1", Some("0")),
            "violation",
        )]);
        let lines = render_github_annotations(&r);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("100%25 done%0Anext"));
    }
}
