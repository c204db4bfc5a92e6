//! Environment variable overrides for tool locations.

use crate::context::{FileSystem, ToolchainContext};
use std::path::{Path, PathBuf};

/// What a relative override value must resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    /// A regular, executable file (compilers).
    Executable,
    /// A directory (SDK roots).
    Directory,
}

impl EntryKind {
    fn matches(self, fs: &dyn FileSystem, path: &Path) -> bool {
        match self {
            Self::Executable => fs.is_executable_file(path),
            Self::Directory => fs.is_dir(path),
        }
    }
}

/// Look up an override variable.
///
/// An absolute value is returned verbatim without touching the filesystem;
/// the caller validates it like any other candidate. A relative value is
/// joined onto each search path in order and the first candidate of the
/// expected kind wins.
///
/// # Returns
///
/// `None` when the variable is unset, empty, or does not resolve. This is
/// not an error: it sends the caller to its fallback strategy.
pub(crate) fn lookup_override(
    ctx: &ToolchainContext,
    var: &str,
    search_paths: &[PathBuf],
    kind: EntryKind,
) -> Option<PathBuf> {
    let value = ctx.var(var).filter(|v| !v.is_empty())?;
    let path = Path::new(value);

    if path.is_absolute() {
        return Some(path.to_path_buf());
    }

    let fs = ctx.file_system();
    let found = search_paths
        .iter()
        .map(|dir| dir.join(path))
        .find(|candidate| kind.matches(fs, candidate));

    if found.is_none() {
        tracing::debug!(var, value, "override did not resolve against search paths");
    }
    found
}
