//! Property-based tests for the validator.
//!
//! These tests use proptest to verify invariants around:
//! - Determinism and rule-order preservation
//! - Aggregation (overall pass is the AND of every result)
//! - Missing-key handling and absence of short-circuiting

use crate::engine::validate;
use crate::model::{SettingValue, SettingsSnapshot};
use crate::policy::{Predicate, Rule, Target};
use crate::report::FailureKind;
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

const KEYS: &[&str] = &[
    "webGLMemorySize",
    "webGLMemoryGrowthStep",
    "webGLMemoryGeometricStep",
    "streamingMipmapsMemoryBudget",
    "compression",
    "exceptionSupport",
];

const SOURCES: &[&str] = &["builder", "cleanup"];

fn arb_key() -> impl Strategy<Value = String> {
    prop::sample::select(KEYS).prop_map(str::to_string)
}

fn arb_value() -> impl Strategy<Value = SettingValue> {
    prop_oneof![
        any::<bool>().prop_map(SettingValue::Bool),
        (-4096i64..4096).prop_map(SettingValue::Int),
        (-1.0e4f64..1.0e4).prop_map(SettingValue::Float),
        "[A-Za-z][A-Za-z0-9.]{0,12}".prop_map(SettingValue::Text),
    ]
}

fn arb_predicate() -> impl Strategy<Value = Predicate> {
    prop_oneof![
        arb_value().prop_map(Predicate::Equals),
        (-1.0e3f64..1.0e3, 0.0f64..10.0)
            .prop_map(|(expected, tolerance)| Predicate::Approx { expected, tolerance }),
        (-1.0e3f64..1.0e3, 0.0f64..2.0e3, any::<bool>(), any::<bool>()).prop_map(
            |(low, width, low_inclusive, high_inclusive)| Predicate::Range {
                low,
                high: low + width,
                low_inclusive,
                high_inclusive,
            }
        ),
        Just(Predicate::Truthy),
        "[A-Za-z]{1,4}".prop_map(Predicate::Contains),
    ]
}

fn arb_target() -> impl Strategy<Value = Target> {
    prop_oneof![
        4 => arb_key().prop_map(Target::Setting),
        1 => prop::sample::select(SOURCES).prop_map(|s| Target::Source(s.to_string())),
    ]
}

fn arb_rule() -> impl Strategy<Value = Rule> {
    ("[a-z]{1,8}\\.[a-z_]{1,12}", arb_target(), arb_predicate()).prop_map(
        |(id, target, predicate)| Rule {
            description: format!("{id} on {target}"),
            id,
            target,
            predicate,
        },
    )
}

fn arb_snapshot() -> impl Strategy<Value = SettingsSnapshot> {
    (
        prop::collection::vec((arb_key(), arb_value()), 0..6),
        prop::collection::vec(
            (prop::sample::select(SOURCES), "[A-Za-z .;()]{0,40}"),
            0..2,
        ),
    )
        .prop_map(|(settings, sources)| {
            let mut builder = SettingsSnapshot::builder();
            for (key, value) in settings {
                builder.insert_setting(key, value, None);
            }
            for (name, text) in sources {
                builder.insert_source(name, webglguard_types::RepoPath::new("Assets/X.cs"), text);
            }
            builder.build()
        })
}

// ============================================================================
// Aggregation and determinism
// ============================================================================

proptest! {
    /// Validating twice with identical inputs yields identical reports.
    #[test]
    fn validate_is_deterministic(
        snapshot in arb_snapshot(),
        rules in prop::collection::vec(arb_rule(), 0..12),
    ) {
        let first = validate(&snapshot, &rules);
        let second = validate(&snapshot, &rules);
        prop_assert_eq!(first, second);
    }

    /// One result per rule, in declaration order.
    #[test]
    fn results_follow_rule_order(
        snapshot in arb_snapshot(),
        rules in prop::collection::vec(arb_rule(), 0..12),
    ) {
        let report = validate(&snapshot, &rules);
        prop_assert_eq!(report.results.len(), rules.len());
        for (result, rule) in report.results.iter().zip(&rules) {
            prop_assert_eq!(&result.rule_id, &rule.id);
            prop_assert_eq!(&result.target, &rule.target);
        }
    }

    /// Overall pass holds exactly when every rule passes.
    #[test]
    fn overall_is_and_of_results(
        snapshot in arb_snapshot(),
        rules in prop::collection::vec(arb_rule(), 0..12),
    ) {
        let report = validate(&snapshot, &rules);
        prop_assert_eq!(report.passed, report.results.iter().all(|r| r.passed));
        prop_assert_eq!(report.passed_count() + report.failed_count(), report.total());
    }

    /// A failure kind is recorded iff the rule failed.
    #[test]
    fn failure_kind_matches_pass_flag(
        snapshot in arb_snapshot(),
        rules in prop::collection::vec(arb_rule(), 0..12),
    ) {
        let report = validate(&snapshot, &rules);
        for result in &report.results {
            prop_assert_eq!(result.passed, result.failure.is_none());
        }
    }

    /// The empty rule set passes for any snapshot.
    #[test]
    fn empty_rule_set_always_passes(snapshot in arb_snapshot()) {
        let report = validate(&snapshot, &[]);
        prop_assert!(report.passed);
        prop_assert!(report.results.is_empty());
    }
}

// ============================================================================
// Missing keys and independence of results
// ============================================================================

proptest! {
    /// A rule whose key is absent fails with MissingKey, whatever else is evaluated.
    #[test]
    fn absent_key_is_missing_key(
        rules in prop::collection::vec(arb_rule(), 0..8),
        predicate in arb_predicate(),
    ) {
        let mut rules = rules;
        rules.push(Rule {
            id: "absent.key".to_string(),
            description: "absent".to_string(),
            target: Target::Setting("notInAnySnapshot".to_string()),
            predicate,
        });
        let report = validate(&SettingsSnapshot::default(), &rules);
        let last = report.results.last().expect("at least one result");
        prop_assert_eq!(last.failure, Some(FailureKind::MissingKey));
        prop_assert_eq!(last.actual.as_deref(), None);
        prop_assert!(!report.passed);
    }

    /// Each result equals evaluating that rule alone: no short-circuit, no cross-talk.
    #[test]
    fn results_are_independent_of_neighbours(
        snapshot in arb_snapshot(),
        rules in prop::collection::vec(arb_rule(), 1..10),
    ) {
        let together = validate(&snapshot, &rules);
        for (i, rule) in rules.iter().enumerate() {
            let alone = validate(&snapshot, std::slice::from_ref(rule));
            prop_assert_eq!(&together.results[i], &alone.results[0]);
        }
    }

    /// An exact-equality rule built from the snapshot's own value passes.
    #[test]
    fn equals_own_value_passes(key in arb_key(), value in arb_value()) {
        let mut builder = SettingsSnapshot::builder();
        builder.insert_setting(key.clone(), value.clone(), None);
        let rule = Rule::setting("self.eq", "self", &key, Predicate::Equals(value));
        prop_assert!(validate(&builder.build(), &[rule]).passed);
    }
}
