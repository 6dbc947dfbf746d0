use crate::model::{SettingValue, SettingsSnapshot};
use crate::policy::{Predicate, Rule, Target};
use crate::report::{FailureKind, Report, RuleResult};
use webglguard_types::Location;

/// Rule-scoped evaluation errors. They never escape [`validate`]; each becomes a failing result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("missing key '{0}'")]
    MissingKey(String),
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl EvalError {
    fn kind(&self) -> FailureKind {
        match self {
            EvalError::MissingKey(_) => FailureKind::MissingKey,
            EvalError::TypeMismatch { .. } => FailureKind::TypeMismatch,
        }
    }
}

// Absorbs binary rounding at the tolerance boundary (0.16 - 0.15 > 0.01 in f64).
const APPROX_SLACK: f64 = 1e-9;

/// Evaluate every rule against the snapshot, in order, without short-circuiting.
pub fn validate(snapshot: &SettingsSnapshot, rules: &[Rule]) -> Report {
    let results = rules
        .iter()
        .map(|rule| evaluate_rule(snapshot, rule))
        .collect();
    Report::from_results(results)
}

fn evaluate_rule(snapshot: &SettingsSnapshot, rule: &Rule) -> RuleResult {
    let (outcome, actual, location) = match &rule.target {
        Target::Setting(key) => match snapshot.get(key) {
            None => (Err(EvalError::MissingKey(key.clone())), None, None),
            Some(entry) => (
                check_value(&rule.predicate, &entry.value),
                Some(entry.value.to_string()),
                entry.origin.clone(),
            ),
        },
        Target::Source(name) => match snapshot.source(name) {
            None => (
                Err(EvalError::MissingKey(rule.target.to_string())),
                None,
                None,
            ),
            Some(source) => {
                let found = match &rule.predicate {
                    Predicate::Contains(needle) => Ok(find_line(&source.text, needle)),
                    other => Err(EvalError::TypeMismatch {
                        expected: predicate_input(other),
                        found: "source",
                    }),
                };
                let location = Location {
                    path: source.path.clone(),
                    line: found.as_ref().ok().copied().flatten(),
                };
                let actual = match &found {
                    Ok(Some(_)) => Some("found".to_string()),
                    Ok(None) => Some("not found".to_string()),
                    Err(_) => Some(format!("{} bytes of source", source.text.len())),
                };
                (found.map(|line| line.is_some()), actual, Some(location))
            }
        },
    };

    let (passed, failure, reason) = match outcome {
        Ok(true) => (true, None, None),
        Ok(false) => (false, Some(FailureKind::Violation), None),
        Err(err) => (false, Some(err.kind()), Some(err.to_string())),
    };

    RuleResult {
        rule_id: rule.id.clone(),
        description: rule.description.clone(),
        target: rule.target.clone(),
        passed,
        expected: rule.predicate.expected_text(),
        actual,
        failure,
        reason,
        location,
    }
}

fn check_value(predicate: &Predicate, actual: &SettingValue) -> Result<bool, EvalError> {
    match predicate {
        Predicate::Equals(expected) => values_equal(expected, actual),
        Predicate::Approx {
            expected,
            tolerance,
        } => {
            let v = numeric(actual)?;
            Ok((v - expected).abs() <= tolerance + APPROX_SLACK)
        }
        Predicate::Range {
            low,
            high,
            low_inclusive,
            high_inclusive,
        } => {
            let v = numeric(actual)?;
            let above = if *low_inclusive { v >= *low } else { v > *low };
            let below = if *high_inclusive { v <= *high } else { v < *high };
            Ok(above && below)
        }
        Predicate::Truthy => match actual {
            SettingValue::Bool(b) => Ok(*b),
            SettingValue::Int(i) => Ok(*i != 0),
            other => Err(EvalError::TypeMismatch {
                expected: "bool",
                found: other.type_name(),
            }),
        },
        Predicate::Contains(needle) => match actual {
            SettingValue::Text(text) => Ok(text.contains(needle.as_str())),
            other => Err(EvalError::TypeMismatch {
                expected: "text",
                found: other.type_name(),
            }),
        },
    }
}

fn values_equal(expected: &SettingValue, actual: &SettingValue) -> Result<bool, EvalError> {
    use SettingValue::*;
    match (expected, actual) {
        (Int(e), Int(a)) => Ok(e == a),
        (Int(_) | Float(_), Int(_) | Float(_)) => {
            Ok(expected.as_f64() == actual.as_f64())
        }
        (Bool(e), Bool(a)) => Ok(e == a),
        // Engine assets store flags as 0/1.
        (Bool(e), Int(a @ (0 | 1))) => Ok(*e == (*a == 1)),
        (Text(e), Text(a)) => Ok(e == a),
        _ => Err(EvalError::TypeMismatch {
            expected: expected.type_name(),
            found: actual.type_name(),
        }),
    }
}

fn numeric(actual: &SettingValue) -> Result<f64, EvalError> {
    actual.as_f64().ok_or(EvalError::TypeMismatch {
        expected: "number",
        found: actual.type_name(),
    })
}

fn predicate_input(predicate: &Predicate) -> &'static str {
    match predicate {
        Predicate::Equals(v) => v.type_name(),
        Predicate::Approx { .. } | Predicate::Range { .. } => "number",
        Predicate::Truthy => "bool",
        Predicate::Contains(_) => "text",
    }
}

/// 1-based line of the first occurrence of `needle`, if any.
fn find_line(text: &str, needle: &str) -> Option<u32> {
    let offset = text.find(needle)?;
    let line = text[..offset].matches('\n').count() + 1;
    Some(u32::try_from(line).unwrap_or(u32::MAX))
}
