use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobMatcher};
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};
use webglguard_types::RepoPath;

/// Unity-generated directories that never hold authored sources.
const SKIP_DIRS: &[&str] = &[".git", "Library", "Logs", "Temp", "obj", "UserSettings"];

/// Resolve a configured source pattern to the first matching file, in sorted path order.
///
/// A pattern without glob metacharacters is a plain repo-relative path.
pub fn resolve_source(project_root: &Utf8Path, pattern: &str) -> anyhow::Result<Option<RepoPath>> {
    let pattern = pattern.trim_start_matches("./");
    if !is_glob(pattern) {
        let rel = RepoPath::new(pattern);
        let abs = project_root.join(rel.as_str());
        return Ok(abs.is_file().then_some(rel));
    }

    let matcher = compile(pattern)?;
    for abs in WalkDir::new(project_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
    {
        let rel = abs
            .strip_prefix(project_root)
            .unwrap_or(&abs)
            .as_str()
            .replace('\\', "/");
        if matcher.is_match(&rel) {
            return Ok(Some(RepoPath::new(rel)));
        }
    }
    Ok(None)
}

fn compile(pattern: &str) -> anyhow::Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .with_context(|| format!("compile source glob {pattern}"))?;
    Ok(glob.compile_matcher())
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
