//! Config parsing and preset/rule resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CheckConfig, CustomRuleConfig, RuleOverride, ValueConfig, WebglguardConfigV1};
pub use presets::{default_sources, preset_rule_ids};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `webglguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<WebglguardConfigV1> {
    let cfg: WebglguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective rule set used by the validator (preset + overrides + custom rules).
pub fn resolve_config(
    cfg: WebglguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
