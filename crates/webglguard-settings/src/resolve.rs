use crate::model::{CheckConfig, CustomRuleConfig, ValueConfig, WebglguardConfigV1};
use crate::presets;
use anyhow::Context;
use globset::Glob;
use std::collections::{BTreeMap, BTreeSet};
use webglguard_domain::model::SettingValue;
use webglguard_domain::policy::{EffectiveConfig, Platform, Predicate, Rule, Target};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub platform: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    /// Source name -> repo-relative path or glob.
    pub sources: BTreeMap<String, String>,
}

pub fn resolve_config(
    cfg: WebglguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let requested = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "production".to_string());
    let platform = Platform::parse(
        overrides
            .platform
            .as_deref()
            .or(cfg.platform.as_deref())
            .unwrap_or("WebGL"),
    );

    let (_, preset_rules) = presets::preset(&requested);
    let known: BTreeSet<&str> = presets::preset_rule_ids().into_iter().collect();

    // per-rule overrides
    let mut disabled = BTreeSet::new();
    for (rule_id, ro) in cfg.rules.iter() {
        if !known.contains(rule_id.as_str()) {
            anyhow::bail!("unknown rule in [rules]: {rule_id}");
        }
        if ro.enabled == Some(false) {
            disabled.insert(rule_id.as_str());
        }
    }

    // Non-browser targets are unaffected by the preset.
    let mut rules: Vec<Rule> = if platform.is_webgl() {
        preset_rules
            .into_iter()
            .filter(|r| !disabled.contains(r.id.as_str()))
            .collect()
    } else {
        Vec::new()
    };

    // sources
    let mut sources = presets::default_sources();
    for (name, pattern) in cfg.sources.iter() {
        validate_source(name, pattern)?;
        sources.insert(name.clone(), pattern.clone());
    }

    // custom rules
    let mut seen = BTreeSet::new();
    for custom in cfg.custom_rules.iter() {
        if known.contains(custom.id.as_str()) {
            anyhow::bail!("custom rule id collides with a preset rule: {}", custom.id);
        }
        if !seen.insert(custom.id.clone()) {
            anyhow::bail!("duplicate custom rule id: {}", custom.id);
        }
        let rule = custom_rule(custom, &sources)
            .with_context(|| format!("invalid custom rule {}", custom.id))?;
        rules.push(rule);
    }

    Ok(ResolvedConfig {
        effective: EffectiveConfig {
            profile: requested,
            platform,
            rules,
        },
        sources,
    })
}

fn validate_source(name: &str, pattern: &str) -> anyhow::Result<()> {
    if pattern.trim().is_empty() {
        anyhow::bail!("empty path for source {name}");
    }
    Glob::new(pattern).with_context(|| format!("invalid glob for source {name}: {pattern}"))?;
    Ok(())
}

fn custom_rule(
    custom: &CustomRuleConfig,
    sources: &BTreeMap<String, String>,
) -> anyhow::Result<Rule> {
    if custom.id.trim().is_empty() {
        anyhow::bail!("rule id must not be empty");
    }
    let target = match (custom.key.as_deref(), custom.source.as_deref()) {
        (Some(key), None) => Target::Setting(key.to_string()),
        (None, Some(source)) => {
            if !sources.contains_key(source) {
                anyhow::bail!("unknown source: {source} (declare it under [sources])");
            }
            Target::Source(source.to_string())
        }
        (None, None) => anyhow::bail!("one of `key` or `source` is required"),
        (Some(_), Some(_)) => anyhow::bail!("`key` and `source` are mutually exclusive"),
    };
    let predicate = parse_check(&custom.check)?;
    if matches!(target, Target::Source(_)) && !matches!(predicate, Predicate::Contains(_)) {
        anyhow::bail!("source rules only support kind = \"contains\"");
    }
    if let Some(description) = &custom.description
        && description.contains(['\n', '\r'])
    {
        anyhow::bail!("description must be a single line");
    }
    let description = custom
        .description
        .clone()
        .unwrap_or_else(|| format!("{target} {}", predicate.expected_text()));
    Ok(Rule {
        id: custom.id.clone(),
        description,
        target,
        predicate,
    })
}

fn parse_check(check: &CheckConfig) -> anyhow::Result<Predicate> {
    match check {
        CheckConfig::Equals { value } => {
            if let ValueConfig::Float(f) = value {
                finite("equals value", *f)?;
            }
            Ok(Predicate::Equals(value_of(value)))
        }
        CheckConfig::Approx {
            expected,
            tolerance,
        } => {
            finite("approx expected", *expected)?;
            if !tolerance.is_finite() || *tolerance < 0.0 {
                anyhow::bail!("tolerance must be a non-negative number, got {tolerance}");
            }
            Ok(Predicate::Approx {
                expected: *expected,
                tolerance: *tolerance,
            })
        }
        CheckConfig::Range {
            low,
            high,
            low_inclusive,
            high_inclusive,
        } => {
            finite("range low", *low)?;
            finite("range high", *high)?;
            if low > high {
                anyhow::bail!("range low ({low}) is greater than high ({high})");
            }
            Ok(Predicate::Range {
                low: *low,
                high: *high,
                low_inclusive: *low_inclusive,
                high_inclusive: *high_inclusive,
            })
        }
        CheckConfig::Truthy => Ok(Predicate::Truthy),
        CheckConfig::Contains { needle } => {
            if needle.is_empty() {
                anyhow::bail!("contains needle must not be empty");
            }
            Ok(Predicate::Contains(needle.clone()))
        }
    }
}

fn finite(what: &str, v: f64) -> anyhow::Result<()> {
    if !v.is_finite() {
        anyhow::bail!("{what} must be a finite number, got {v}");
    }
    Ok(())
}

fn value_of(v: &ValueConfig) -> SettingValue {
    match v {
        ValueConfig::Bool(b) => SettingValue::Bool(*b),
        ValueConfig::Int(i) => SettingValue::Int(*i),
        ValueConfig::Float(f) => SettingValue::Float(*f),
        ValueConfig::Text(s) => SettingValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;
    use webglguard_types::ids;

    fn resolve(input: &str) -> anyhow::Result<ResolvedConfig> {
        resolve_config(parse_config_toml(input)?, Overrides::default())
    }

    #[test]
    fn empty_config_resolves_production_for_webgl() {
        let resolved = resolve("").expect("resolve");
        assert_eq!(resolved.effective.profile, "production");
        assert_eq!(resolved.effective.platform, Platform::WebGl);
        assert_eq!(
            resolved.effective.rules.len(),
            presets::preset_rule_ids().len()
        );
        assert_eq!(
            resolved.sources.get("builder").map(String::as_str),
            Some("Assets/Build/Builder.cs")
        );
    }

    #[test]
    fn cli_overrides_beat_config() {
        let cfg = parse_config_toml("profile = \"production\"\nplatform = \"WebGL\"").expect("parse");
        let resolved = resolve_config(
            cfg,
            Overrides {
                profile: Some("debug".into()),
                platform: Some("Android".into()),
            },
        )
        .expect("resolve");
        assert_eq!(resolved.effective.profile, "debug");
        assert_eq!(resolved.effective.platform, Platform::Other("Android".into()));
    }

    #[test]
    fn non_webgl_platform_keeps_only_custom_rules() {
        let resolved = resolve(
            r#"
platform = "Standalone"

[[custom_rules]]
id = "custom.scripting"
key = "scriptingBackend"
check = { kind = "equals", value = "IL2CPP" }
"#,
        )
        .expect("resolve");
        let ids: Vec<&str> = resolved.effective.rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["custom.scripting"]);
    }

    #[test]
    fn unknown_profile_keeps_its_name() {
        let resolved = resolve("profile = \"staging\"").expect("resolve");
        assert_eq!(resolved.effective.profile, "staging");
        assert_eq!(
            resolved.effective.rules.len(),
            presets::preset_rule_ids().len()
        );
    }

    #[test]
    fn rule_override_disables_preset_rule() {
        let resolved = resolve(
            r#"
[rules."memory.initial_size"]
enabled = false
"#,
        )
        .expect("resolve");
        assert!(
            !resolved
                .effective
                .rules
                .iter()
                .any(|r| r.id == ids::RULE_MEMORY_INITIAL_SIZE)
        );
    }

    #[test]
    fn unknown_rule_override_is_an_error() {
        let err = resolve("[rules.\"memory.nope\"]\nenabled = false").unwrap_err();
        assert!(err.to_string().contains("memory.nope"));
    }

    #[test]
    fn custom_rules_append_in_order_with_defaults() {
        let resolved = resolve(
            r#"
[[custom_rules]]
id = "custom.budget"
description = "mipmap budget within limits"
key = "streamingMipmapsMemoryBudget"
check = { kind = "range", low = 64, high = 2048 }

[[custom_rules]]
id = "custom.strict"
key = "webGLMemorySize"
check = { kind = "range", low = 32, high = 4096, high_inclusive = false }
"#,
        )
        .expect("resolve");
        let rules = &resolved.effective.rules;
        let budget = &rules[rules.len() - 2];
        assert_eq!(budget.id, "custom.budget");
        assert_eq!(budget.predicate, Predicate::range_inclusive(64.0, 2048.0));
        let strict = &rules[rules.len() - 1];
        assert_eq!(strict.description, "webGLMemorySize [32, 4096)");
    }

    #[test]
    fn custom_source_rule_requires_declared_source() {
        let err = resolve(
            r#"
[[custom_rules]]
id = "custom.loader"
source = "loader"
check = { kind = "contains", needle = "LoadAsync" }
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("unknown source: loader"));

        let resolved = resolve(
            r#"
[sources]
loader = "Assets/**/Loader.cs"

[[custom_rules]]
id = "custom.loader"
source = "loader"
check = { kind = "contains", needle = "LoadAsync" }
"#,
        )
        .expect("resolve");
        assert_eq!(
            resolved.effective.rules.last().map(|r| &r.target),
            Some(&Target::Source("loader".into()))
        );
    }

    #[test]
    fn invalid_check_parameters_are_errors() {
        let cases = [
            ("approx", "check = { kind = \"approx\", expected = 0.15, tolerance = -0.1 }", "tolerance"),
            ("range", "check = { kind = \"range\", low = 10, high = 1 }", "greater than high"),
            ("needle", "check = { kind = \"contains\", needle = \"\" }", "needle"),
            ("nan_low", "check = { kind = \"range\", low = nan, high = 10 }", "range low must be a finite number"),
            ("inf_high", "check = { kind = \"range\", low = 0, high = inf }", "range high must be a finite number"),
            ("nan_expected", "check = { kind = \"approx\", expected = nan, tolerance = 0.1 }", "approx expected"),
            ("nan_equals", "check = { kind = \"equals\", value = nan }", "equals value"),
        ];
        for (name, check, fragment) in cases {
            let input = format!("[[custom_rules]]\nid = \"c.{name}\"\nkey = \"k\"\n{check}\n");
            let err = resolve(&input).unwrap_err();
            assert!(format!("{err:#}").contains(fragment), "{name}: {err:#}");
        }
    }

    #[test]
    fn multi_line_description_is_an_error() {
        let err = resolve(
            "[[custom_rules]]\nid = \"c\"\ndescription = \"first\\nsecond\"\nkey = \"k\"\ncheck = { kind = \"truthy\" }",
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("single line"));
    }

    #[test]
    fn target_must_be_exactly_one_of_key_or_source() {
        let neither = resolve("[[custom_rules]]\nid = \"c\"\ncheck = { kind = \"truthy\" }").unwrap_err();
        assert!(format!("{neither:#}").contains("required"));
        let both = resolve(
            "[[custom_rules]]\nid = \"c\"\nkey = \"k\"\nsource = \"builder\"\ncheck = { kind = \"contains\", needle = \"x\" }",
        )
        .unwrap_err();
        assert!(format!("{both:#}").contains("mutually exclusive"));
    }

    #[test]
    fn custom_ids_are_unique_and_distinct_from_presets() {
        let dup = resolve(
            "[[custom_rules]]\nid = \"c\"\nkey = \"k\"\ncheck = { kind = \"truthy\" }\n\n[[custom_rules]]\nid = \"c\"\nkey = \"j\"\ncheck = { kind = \"truthy\" }",
        )
        .unwrap_err();
        assert!(dup.to_string().contains("duplicate"));
        let clash = resolve(
            "[[custom_rules]]\nid = \"memory.initial_size\"\nkey = \"k\"\ncheck = { kind = \"truthy\" }",
        )
        .unwrap_err();
        assert!(clash.to_string().contains("collides"));
    }

    #[test]
    fn invalid_source_glob_is_an_error() {
        let err = resolve("[sources]\nbuilder = \"Assets/[Build\"").unwrap_err();
        assert!(format!("{err:#}").contains("invalid glob for source builder"));
    }
}
