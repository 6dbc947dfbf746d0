use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical project-relative path used in results and reports.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - an empty input becomes `.`
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RepoPath(String);

impl Default for RepoPath {
    fn default() -> Self {
        RepoPath::new(".")
    }
}

impl RepoPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }

    pub fn join(&self, segment: &str) -> RepoPath {
        if self.0 == "." {
            return RepoPath::new(segment);
        }
        let base = Utf8Path::new(self.as_str());
        RepoPath::new(base.join(segment).as_str())
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for RepoPath {
    fn from(value: &Utf8Path) -> Self {
        RepoPath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for RepoPath {
    fn from(value: Utf8PathBuf) -> Self {
        RepoPath::new(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_leading_dot() {
        assert_eq!(
            RepoPath::new(".\\ProjectSettings\\ProjectSettings.asset").as_str(),
            "ProjectSettings/ProjectSettings.asset"
        );
        assert_eq!(RepoPath::new("././Assets").as_str(), "Assets");
        assert_eq!(RepoPath::new("").as_str(), ".");
    }

    #[test]
    fn join_from_root_does_not_prefix_dot() {
        let root = RepoPath::default();
        assert_eq!(root.join("Assets/Build/Builder.cs").as_str(), "Assets/Build/Builder.cs");
        assert_eq!(
            RepoPath::new("ProjectSettings").join("QualitySettings.asset").as_str(),
            "ProjectSettings/QualitySettings.asset"
        );
    }
}
