use crate::{RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Webglguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Profile: `{}` (platform `{}`)\n- Rules: {} passed / {} total\n\n",
        verdict,
        report.data.profile,
        report.data.platform,
        report.data.rules_passed,
        report.data.rules_total
    ));

    if report.results.is_empty() {
        out.push_str("No rules evaluated.\n");
        return out;
    }

    out.push_str("| Status | Rule | Expected | Actual |\n");
    out.push_str("|---|---|---|---|\n");
    for r in &report.results {
        out.push_str(&format!(
            "| {} | `{}` | {} | {} |\n",
            if r.passed { "PASS" } else { "FAIL" },
            r.rule_id,
            cell(&r.expected),
            cell(r.actual.as_deref().unwrap_or("<missing>"))
        ));
    }

    let failures: Vec<_> = report.results.iter().filter(|r| !r.passed).collect();
    if failures.is_empty() {
        return out;
    }

    out.push_str("\n## Failures\n\n");
    for f in failures {
        out.push_str(&format!(
            "- `{}` / `{}`: {}",
            f.rule_id,
            f.code.as_deref().unwrap_or(""),
            f.description
        ));
        if let Some(loc) = &f.location {
            match loc.line {
                Some(line) => out.push_str(&format!(" (`{}`:{})", loc.path, line)),
                None => out.push_str(&format!(" (`{}`)", loc.path)),
            }
        }
        out.push('\n');
        if let Some(message) = &f.message {
            out.push_str(&format!("  - {}\n", message));
        }
        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}

/// Table cells cannot hold pipes or newlines.
fn cell(v: &str) -> String {
    v.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderableLocation;
    use crate::model::fixtures::{failing, outcome, report};

    #[test]
    fn renders_empty_report() {
        let md = render_markdown(&report(Vec::new()));
        assert!(md.contains("Verdict: **PASS**"));
        assert!(md.contains("No rules evaluated"));
    }

    #[test]
    fn renders_table_and_failures() {
        let mut budget = failing(
            outcome(
                "mipmaps.memory_budget",
                "streaming mipmaps memory budget is 256 MB",
                "256",
                Some("4096"),
            ),
            "violation",
        );
        budget.location = Some(RenderableLocation {
            path: "ProjectSettings/QualitySettings.asset".to_string(),
            line: Some(52),
        });
        budget.help = Some("Set streamingMipmapsMemoryBudget to 256.".to_string());
        let r = report(vec![
            outcome("memory.initial_size", "initial memory size is 64 MB", "64", Some("64")),
            budget,
        ]);

        insta::assert_snapshot!(render_markdown(&r), @r"
        # Webglguard report

        - Verdict: **FAIL**
        - Profile: `production` (platform `WebGL`)
        - Rules: 1 passed / 2 total

        | Status | Rule | Expected | Actual |
        |---|---|---|---|
        | PASS | `memory.initial_size` | 64 | 64 |
        | FAIL | `mipmaps.memory_budget` | 256 | 4096 |

        ## Failures

        - `mipmaps.memory_budget` / `violation`: streaming mipmaps memory budget is 256 MB (`ProjectSettings/QualitySettings.asset`:52)
          - help: Set streamingMipmapsMemoryBudget to 256.
        ");
    }

    #[test]
    fn escapes_pipes_in_cells() {
        let r = report(vec![outcome("custom.a", "a", "a|b", None)]);
        let md = render_markdown(&r);
        assert!(md.contains("| a\\|b | <missing> |"));
    }
}
