use anyhow::Context;
use time::OffsetDateTime;
use webglguard_render::{
    RenderableData, RenderableLocation, RenderableOutcome, RenderableReport,
    RenderableVerdictStatus,
};
use webglguard_types::{
    ReportEnvelope, RuleOutcome, RuleStatus, SCHEMA_REPORT_V1, ToolMeta, Verdict, WebglguardData,
    WebglguardReport, ids,
};

pub fn parse_report_json(text: &str) -> anyhow::Result<WebglguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    let report: WebglguardReport =
        serde_json::from_value(value).context("parse webglguard report")?;
    Ok(report)
}

pub fn serialize_report(report: &WebglguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &WebglguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        results: report.results.iter().map(renderable_from).collect(),
        data: RenderableData {
            profile: report.data.profile.clone(),
            platform: report.data.platform.clone(),
            rules_total: report.data.rules_total,
            rules_passed: report.data.rules_passed,
        },
    }
}

fn renderable_from(r: &RuleOutcome) -> RenderableOutcome {
    RenderableOutcome {
        passed: r.status == RuleStatus::Pass,
        rule_id: r.rule_id.clone(),
        code: r.code.clone(),
        description: r.description.clone(),
        expected: r.expected.clone(),
        actual: r.actual.clone(),
        message: r.message.clone(),
        location: r.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.as_str().to_string(),
            line: loc.line,
        }),
        help: r.help.clone(),
    }
}

/// A failing report carrying a single `tool.runtime` result.
pub fn runtime_error_report(profile: &str, platform: &str, message: &str) -> WebglguardReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "webglguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        results: vec![RuleOutcome {
            rule_id: ids::RULE_TOOL_RUNTIME.to_string(),
            description: "webglguard ran to completion".to_string(),
            status: RuleStatus::Fail,
            code: Some(ids::CODE_RUNTIME_ERROR.to_string()),
            target: "webglguard".to_string(),
            expected: "no tool error".to_string(),
            actual: Some(message.to_string()),
            message: Some(message.to_string()),
            location: None,
            help: Some("Fix the tool error and re-run webglguard.".to_string()),
            fingerprint: None,
        }],
        data: WebglguardData {
            profile: profile.to_string(),
            platform: platform.to_string(),
            settings_loaded: 0,
            sources_loaded: Vec::new(),
            rules_total: 1,
            rules_passed: 0,
            rules_failed: 1,
        },
    }
}
