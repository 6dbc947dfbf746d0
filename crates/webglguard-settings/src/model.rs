use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `webglguard.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional so an empty file is valid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WebglguardConfigV1 {
    /// Optional schema string for tooling (`webglguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preset rule set: `production` (default) or `debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Build target. Preset rules only apply to `WebGL` and `WebGPU`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Map of source name -> repo-relative path or glob.
    #[serde(default)]
    pub sources: BTreeMap<String, String>,

    /// Map of preset rule_id -> override.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleOverride>,

    /// Extra rules, evaluated after the preset in declaration order.
    #[serde(default)]
    pub custom_rules: Vec<CustomRuleConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleOverride {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CustomRuleConfig {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Settings key to inspect. Exactly one of `key` and `source` must be set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Named source text to inspect (only `contains` applies).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub check: CheckConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckConfig {
    Equals {
        value: ValueConfig,
    },
    Approx {
        expected: f64,
        tolerance: f64,
    },
    Range {
        low: f64,
        high: f64,
        #[serde(default = "inclusive")]
        low_inclusive: bool,
        #[serde(default = "inclusive")]
        high_inclusive: bool,
    },
    Truthy,
    Contains {
        needle: String,
    },
}

fn inclusive() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ValueConfig {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}
