#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableLocation {
    pub path: String,
    pub line: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableOutcome {
    pub passed: bool,
    pub rule_id: String,
    pub code: Option<String>,
    pub description: String,
    pub expected: String,
    /// `None` renders as `<missing>`.
    pub actual: Option<String>,
    pub message: Option<String>,
    pub location: Option<RenderableLocation>,
    pub help: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub profile: String,
    pub platform: String,
    pub rules_total: u32,
    pub rules_passed: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub results: Vec<RenderableOutcome>,
    pub data: RenderableData,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn outcome(rule_id: &str, description: &str, expected: &str, actual: Option<&str>) -> RenderableOutcome {
        RenderableOutcome {
            passed: true,
            rule_id: rule_id.to_string(),
            code: None,
            description: description.to_string(),
            expected: expected.to_string(),
            actual: actual.map(str::to_string),
            message: None,
            location: None,
            help: None,
        }
    }

    pub fn failing(mut o: RenderableOutcome, code: &str) -> RenderableOutcome {
        o.passed = false;
        o.code = Some(code.to_string());
        o
    }

    pub fn report(results: Vec<RenderableOutcome>) -> RenderableReport {
        let rules_passed = results.iter().filter(|r| r.passed).count() as u32;
        let verdict = if results.iter().all(|r| r.passed) {
            RenderableVerdictStatus::Pass
        } else {
            RenderableVerdictStatus::Fail
        };
        RenderableReport {
            verdict,
            data: RenderableData {
                profile: "production".to_string(),
                platform: "WebGL".to_string(),
                rules_total: results.len() as u32,
                rules_passed,
            },
            results,
        }
    }
}
