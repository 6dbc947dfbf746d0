//! Integration tests for snapshot loading against the Unity fixture projects.

use camino::Utf8PathBuf;
use std::collections::BTreeMap;
use std::path::PathBuf;
use webglguard_domain::model::SettingValue;
use webglguard_repo::{PROJECT_SETTINGS_ASSET, QUALITY_PRESETS_KEY, load_snapshot};

/// Get the path to the test fixtures directory (repo root / tests / fixtures).
fn fixtures_dir() -> Utf8PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/webglguard-repo -> crates -> repo root
    let repo_root = manifest_dir
        .parent()
        .expect("webglguard-repo should have parent (crates)")
        .parent()
        .expect("crates should have parent (repo root)");
    Utf8PathBuf::from_path_buf(repo_root.join("tests").join("fixtures"))
        .expect("fixture path should be valid UTF-8")
}

fn default_sources() -> BTreeMap<String, String> {
    let mut m = BTreeMap::new();
    m.insert("builder".to_string(), "Assets/Build/Builder.cs".to_string());
    m.insert("cleanup".to_string(), "Assets/**/ResourceManager.cs".to_string());
    m
}

#[test]
fn conforming_project_exposes_player_and_quality_settings() {
    let snapshot = load_snapshot(&fixtures_dir().join("webgl_conforming"), &default_sources())
        .expect("load snapshot");

    assert_eq!(snapshot.value("webGLMemorySize"), Some(&SettingValue::Int(64)));
    assert_eq!(
        snapshot.value("webGLMemoryGeometricStep"),
        Some(&SettingValue::Float(0.15))
    );
    assert_eq!(
        snapshot.value("streamingMipmapsMaxLevelReduction"),
        Some(&SettingValue::Int(3))
    );
    assert_eq!(
        snapshot.value(QUALITY_PRESETS_KEY),
        Some(&SettingValue::Text("Low, High, WebGL-Optimized".into()))
    );
    assert_eq!(
        snapshot.value("quality.WebGL-Optimized.asyncUploadBufferSize"),
        Some(&SettingValue::Int(8))
    );
    assert_eq!(
        snapshot.value("quality.High.asyncUploadBufferSize"),
        Some(&SettingValue::Int(16))
    );

    let origin = snapshot
        .get("webGLMemorySize")
        .and_then(|e| e.origin.clone())
        .expect("origin");
    assert_eq!(origin.path.as_str(), PROJECT_SETTINGS_ASSET);
    assert_eq!(origin.line, Some(20));
}

#[test]
fn conforming_project_resolves_sources() {
    let snapshot = load_snapshot(&fixtures_dir().join("webgl_conforming"), &default_sources())
        .expect("load snapshot");

    let names: Vec<&str> = snapshot.source_names().collect();
    assert_eq!(names, vec!["builder", "cleanup"]);
    let cleanup = snapshot.source("cleanup").expect("cleanup source");
    assert_eq!(cleanup.path.as_str(), "Assets/Runtime/ResourceManager.cs");
    assert!(cleanup.text.contains("ResourceCleanupCoroutine"));
}

#[test]
fn project_without_settings_assets_still_loads_sources() {
    let snapshot = load_snapshot(&fixtures_dir().join("missing_assets"), &default_sources())
        .expect("load snapshot");

    assert_eq!(snapshot.len(), 0);
    assert!(snapshot.source("builder").is_some());
    assert!(snapshot.source("cleanup").is_none());
}

#[test]
fn loading_is_deterministic() {
    let root = fixtures_dir().join("webgl_violations");
    let first = load_snapshot(&root, &default_sources()).expect("first load");
    let second = load_snapshot(&root, &default_sources()).expect("second load");
    assert_eq!(first, second);
}
