//! Project adapters: read Unity settings assets and named source files into a snapshot.
//!
//! This crate is allowed to do filesystem IO. It never writes to the project.

#![forbid(unsafe_code)]

mod asset;
mod sources;

use anyhow::Context;
use camino::Utf8Path;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use tracing::{debug, warn};
use webglguard_domain::model::{SettingValue, SettingsSnapshot, SnapshotBuilder};
use webglguard_types::{Location, RepoPath};

pub use asset::{AssetEntry, QualityLevel, UnityAsset, parse_unity_asset};
pub use sources::resolve_source;

/// Player settings asset, relative to the project root.
pub const PROJECT_SETTINGS_ASSET: &str = "ProjectSettings/ProjectSettings.asset";
/// Quality settings asset, relative to the project root.
pub const QUALITY_SETTINGS_ASSET: &str = "ProjectSettings/QualitySettings.asset";

/// Snapshot key listing the quality level names, joined by `", "`.
pub const QUALITY_PRESETS_KEY: &str = "qualityPresets";

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a Unity settings asset and fold it into a snapshot.
    ///
    /// Returns `Ok(number_of_keys)` when the text has a root object, `Err(...)` otherwise.
    /// **Never panics** on any input.
    pub fn parse_asset(text: &str) -> anyhow::Result<usize> {
        let parsed = parse_unity_asset(text)?;
        let mut builder = SettingsSnapshot::builder();
        fold_asset(&mut builder, &RepoPath::new(QUALITY_SETTINGS_ASSET), &parsed);
        Ok(builder.build().len())
    }
}

/// Build the settings snapshot the validator runs against.
///
/// `project_root` is the Unity project directory (containing `Assets/` and `ProjectSettings/`).
/// `sources` maps source names to repo-relative paths or globs.
pub fn load_snapshot(
    project_root: &Utf8Path,
    sources: &BTreeMap<String, String>,
) -> anyhow::Result<SettingsSnapshot> {
    let mut builder = SettingsSnapshot::builder();

    for rel in [PROJECT_SETTINGS_ASSET, QUALITY_SETTINGS_ASSET] {
        let path = RepoPath::new(rel);
        let Some(text) = read_optional(project_root, &path)? else {
            warn!(path = %path, "settings asset not found; its rules will report missing keys");
            continue;
        };
        let parsed = parse_unity_asset(&text).with_context(|| format!("parse {path}"))?;
        let inserted = fold_asset(&mut builder, &path, &parsed);
        debug!(path = %path, keys = inserted, "loaded settings asset");
    }

    for (name, pattern) in sources {
        let Some(path) = resolve_source(project_root, pattern)
            .with_context(|| format!("resolve source {name}"))?
        else {
            warn!(source = %name, pattern = %pattern, "no file matches source");
            continue;
        };
        let abs = project_root.join(path.as_str());
        let bytes = std::fs::read(&abs).with_context(|| format!("read {abs}"))?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                warn!(source = %name, path = %path, "source is not valid UTF-8; invalid bytes replaced");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        debug!(source = %name, path = %path, bytes = text.len(), "loaded source");
        builder.insert_source(name.clone(), path, text);
    }

    Ok(builder.build())
}

fn read_optional(project_root: &Utf8Path, path: &RepoPath) -> anyhow::Result<Option<String>> {
    let abs = project_root.join(path.as_str());
    match std::fs::read_to_string(&abs) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("read {abs}")),
    }
}

/// Insert an asset's entries; returns how many keys were new.
fn fold_asset(builder: &mut SnapshotBuilder, path: &RepoPath, asset: &UnityAsset) -> usize {
    let at = |line: u32| {
        Some(Location {
            path: path.clone(),
            line: Some(line),
        })
    };
    let mut inserted = 0;

    for entry in &asset.entries {
        if builder.insert_setting(entry.key.clone(), SettingValue::parse_scalar(&entry.raw), at(entry.line)) {
            inserted += 1;
        }
    }

    if let Some(list_line) = asset.quality_list_line {
        let names: Vec<&str> = asset.quality_levels.iter().map(|l| l.name.as_str()).collect();
        if builder.insert_setting(
            QUALITY_PRESETS_KEY,
            SettingValue::Text(names.join(", ")),
            at(list_line),
        ) {
            inserted += 1;
        }
    }

    for level in &asset.quality_levels {
        for entry in &level.entries {
            let key = format!("quality.{}.{}", level.name, entry.key);
            // `quality.<level>.name` marks the level as present; keep it textual.
            let value = if entry.key == "name" {
                SettingValue::Text(level.name.clone())
            } else {
                SettingValue::parse_scalar(&entry.raw)
            };
            if builder.insert_setting(key, value, at(entry.line)) {
                inserted += 1;
            }
        }
    }

    inserted
}
