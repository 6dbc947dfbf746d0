use crate::policy::Target;
use webglguard_types::{Location, ids};

/// Why a rule failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The key or source was absent from the snapshot.
    MissingKey,
    /// The value's type does not fit the predicate.
    TypeMismatch,
    /// The predicate was evaluated and returned false.
    Violation,
}

impl FailureKind {
    pub fn code(self) -> &'static str {
        match self {
            FailureKind::MissingKey => ids::CODE_MISSING_KEY,
            FailureKind::TypeMismatch => ids::CODE_TYPE_MISMATCH,
            FailureKind::Violation => ids::CODE_VIOLATION,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuleResult {
    pub rule_id: String,
    pub description: String,
    pub target: Target,
    pub passed: bool,
    pub expected: String,
    /// `None` when the target was missing.
    pub actual: Option<String>,
    /// Set iff `passed` is false.
    pub failure: Option<FailureKind>,
    pub reason: Option<String>,
    pub location: Option<Location>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// One entry per rule, in rule-declaration order.
    pub results: Vec<RuleResult>,
    /// Logical AND of every result.
    pub passed: bool,
}

impl Report {
    pub fn from_results(results: Vec<RuleResult>) -> Self {
        let passed = results.iter().all(|r| r.passed);
        Self { results, passed }
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}
