//! PATH-style search path expansion.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Expand a PATH-like string into an ordered list of directories.
///
/// Entries are split with the platform delimiter. Empty entries are dropped,
/// relative entries are resolved against `cwd`, and later duplicates are
/// dropped so the first occurrence keeps its precedence.
///
/// # Arguments
///
/// * `value` - The raw variable value, or `None` if unset
/// * `cwd` - Directory that relative entries are resolved against
pub fn expand_search_paths(value: Option<&str>, cwd: &Path) -> Vec<PathBuf> {
    let Some(value) = value else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    std::env::split_paths(value)
        .filter(|entry| !entry.as_os_str().is_empty())
        .map(|entry| absolutize(&entry, cwd))
        .filter(|dir| seen.insert(dir.clone()))
        .collect()
}

/// Join `path` onto `cwd` when relative, dropping `.` components.
pub(crate) fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
