use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use webglguard_types::{Location, RepoPath};

/// A single settings value as read from an engine asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SettingValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "bool",
            SettingValue::Int(_) => "int",
            SettingValue::Float(_) => "float",
            SettingValue::Text(_) => "text",
        }
    }

    /// Numeric view of the value; integers are promoted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Int(i) => Some(*i as f64),
            SettingValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Parse a serialized scalar: int, then float, then `true`/`false`, else text.
    ///
    /// Surrounding single or double quotes are stripped from text.
    pub fn parse_scalar(raw: &str) -> SettingValue {
        let raw = raw.trim();
        if let Some(inner) = strip_quotes(raw) {
            return SettingValue::Text(inner.to_string());
        }
        if let Ok(i) = raw.parse::<i64>() {
            return SettingValue::Int(i);
        }
        // `f64::from_str` also accepts `inf`/`NaN`; only plain decimal notation counts.
        let numeric_chars = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
            && raw.chars().any(|c| c.is_ascii_digit());
        if numeric_chars && let Ok(f) = raw.parse::<f64>() {
            return SettingValue::Float(f);
        }
        match raw {
            "true" => SettingValue::Bool(true),
            "false" => SettingValue::Bool(false),
            other => SettingValue::Text(other.to_string()),
        }
    }
}

fn strip_quotes(raw: &str) -> Option<&str> {
    if raw.len() < 2 {
        return None;
    }
    for q in ['"', '\''] {
        if raw.starts_with(q) && raw.ends_with(q) {
            return Some(&raw[1..raw.len() - 1]);
        }
    }
    None
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Int(i) => write!(f, "{i}"),
            SettingValue::Float(v) => write!(f, "{v}"),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SettingEntry {
    pub value: SettingValue,
    /// Asset file and line the value was read from, when known.
    pub origin: Option<Location>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceText {
    pub path: RepoPath,
    pub text: String,
}

/// Immutable view of a project's settings at one point in time.
///
/// Built once through [`SnapshotBuilder`]; there is no mutation API afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsSnapshot {
    settings: BTreeMap<String, SettingEntry>,
    sources: BTreeMap<String, SourceText>,
}

impl SettingsSnapshot {
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    pub fn get(&self, key: &str) -> Option<&SettingEntry> {
        self.settings.get(key)
    }

    pub fn value(&self, key: &str) -> Option<&SettingValue> {
        self.settings.get(key).map(|e| &e.value)
    }

    pub fn source(&self, name: &str) -> Option<&SourceText> {
        self.sources.get(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }

    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    /// Number of settings keys (sources excluded).
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty() && self.sources.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: SettingsSnapshot,
}

impl SnapshotBuilder {
    /// Insert a setting. The first value recorded for a key wins; returns `false` for duplicates.
    pub fn insert_setting(
        &mut self,
        key: impl Into<String>,
        value: SettingValue,
        origin: Option<Location>,
    ) -> bool {
        let key = key.into();
        if self.snapshot.settings.contains_key(&key) {
            return false;
        }
        self.snapshot
            .settings
            .insert(key, SettingEntry { value, origin });
        true
    }

    /// Insert a named source text. The first source recorded for a name wins.
    pub fn insert_source(&mut self, name: impl Into<String>, path: RepoPath, text: String) -> bool {
        let name = name.into();
        if self.snapshot.sources.contains_key(&name) {
            return false;
        }
        self.snapshot
            .sources
            .insert(name, SourceText { path, text });
        true
    }

    pub fn setting(mut self, key: impl Into<String>, value: SettingValue) -> Self {
        self.insert_setting(key, value, None);
        self
    }

    pub fn source(mut self, name: impl Into<String>, path: &str, text: impl Into<String>) -> Self {
        self.insert_source(name, RepoPath::new(path), text.into());
        self
    }

    pub fn build(self) -> SettingsSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_scalar_prefers_int_then_float_then_bool() {
        assert_eq!(SettingValue::parse_scalar("64"), SettingValue::Int(64));
        assert_eq!(SettingValue::parse_scalar("-1"), SettingValue::Int(-1));
        assert_eq!(SettingValue::parse_scalar("0.15"), SettingValue::Float(0.15));
        assert_eq!(SettingValue::parse_scalar("true"), SettingValue::Bool(true));
        assert_eq!(
            SettingValue::parse_scalar("WebGL-Optimized"),
            SettingValue::Text("WebGL-Optimized".to_string())
        );
    }

    #[test]
    fn parse_scalar_keeps_non_numeric_words_as_text() {
        assert_eq!(
            SettingValue::parse_scalar("inf"),
            SettingValue::Text("inf".to_string())
        );
        assert_eq!(
            SettingValue::parse_scalar("NaN"),
            SettingValue::Text("NaN".to_string())
        );
        assert_eq!(
            SettingValue::parse_scalar("'64'"),
            SettingValue::Text("64".to_string())
        );
        assert_eq!(SettingValue::parse_scalar(""), SettingValue::Text(String::new()));
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(SettingValue::Float(0.2).to_string(), "0.2");
        assert_eq!(SettingValue::Float(128.0).to_string(), "128");
        assert_eq!(SettingValue::Text("Gzip".into()).to_string(), "Gzip");
    }

    #[test]
    fn first_value_for_a_key_wins() {
        let mut builder = SettingsSnapshot::builder();
        assert!(builder.insert_setting("webGLMemorySize", SettingValue::Int(64), None));
        assert!(!builder.insert_setting("webGLMemorySize", SettingValue::Int(256), None));
        let snapshot = builder.build();
        assert_eq!(snapshot.value("webGLMemorySize"), Some(&SettingValue::Int(64)));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn sources_are_separate_from_settings() {
        let snapshot = SettingsSnapshot::builder()
            .source("builder", "Assets/Build/Builder.cs", "class Builder {}")
            .build();
        assert_eq!(snapshot.len(), 0);
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.source_names().collect::<Vec<_>>(), vec!["builder"]);
        assert_eq!(
            snapshot.source("builder").map(|s| s.path.as_str()),
            Some("Assets/Build/Builder.cs")
        );
    }
}
