//! The `check` use case: load the project, validate it, and produce a report.

use anyhow::Context;
use camino::Utf8Path;
use time::OffsetDateTime;
use tracing::info;
use webglguard_domain::fingerprint::fingerprint_for_result;
use webglguard_domain::report::RuleResult;
use webglguard_settings::{Overrides, ResolvedConfig};
use webglguard_types::{
    ReportEnvelope, RuleOutcome, RuleStatus, SCHEMA_REPORT_V1, ToolMeta, Verdict, WebglguardData,
    WebglguardReport, explain,
};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Unity project root (contains `Assets/` and `ProjectSettings/`).
    pub project_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: WebglguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, load the project snapshot, validate, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        webglguard_settings::WebglguardConfigV1::default()
    } else {
        webglguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = webglguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let snapshot = webglguard_repo::load_snapshot(input.project_root, &resolved.sources)
        .context("load project settings")?;

    let domain_report = webglguard_domain::validate(&snapshot, &resolved.effective.rules);

    let results: Vec<RuleOutcome> = domain_report.results.iter().map(outcome_from).collect();
    let rules_passed = domain_report.passed_count() as u32;
    let rules_failed = domain_report.failed_count() as u32;
    let verdict = if domain_report.passed {
        Verdict::Pass
    } else {
        Verdict::Fail
    };
    info!(
        verdict = ?verdict,
        passed = rules_passed,
        total = results.len(),
        profile = %resolved.effective.profile,
        "check complete"
    );

    let data = WebglguardData {
        profile: resolved.effective.profile.clone(),
        platform: resolved.effective.platform.as_str().to_string(),
        settings_loaded: snapshot.len() as u32,
        sources_loaded: snapshot.source_names().map(str::to_string).collect(),
        rules_total: results.len() as u32,
        rules_passed,
        rules_failed,
    };

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "webglguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        results,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

fn outcome_from(r: &RuleResult) -> RuleOutcome {
    let target = r.target.to_string();
    let code = r.failure.map(|kind| kind.code());
    let help = code.and_then(|code| {
        explain::lookup_explanation(&r.rule_id)
            .or_else(|| explain::lookup_explanation(code))
            .map(|exp| exp.remediation.to_string())
    });

    RuleOutcome {
        rule_id: r.rule_id.clone(),
        description: r.description.clone(),
        status: if r.passed {
            RuleStatus::Pass
        } else {
            RuleStatus::Fail
        },
        code: code.map(str::to_string),
        fingerprint: code.map(|code| fingerprint_for_result(&r.rule_id, code, &target)),
        target,
        expected: r.expected.clone(),
        actual: r.actual.clone(),
        message: r.reason.clone(),
        location: r.location.clone(),
        help,
    }
}

/// Map verdict to exit code: 0 = pass, 1 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 1,
    }
}
