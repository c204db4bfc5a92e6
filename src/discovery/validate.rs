//! Existence validation for resolved paths.

use crate::context::FileSystem;
use crate::ToolchainError;
use std::path::PathBuf;

/// Check that a resolved path exists.
///
/// Every path that ends up in a descriptor as a required field passes
/// through here exactly once.
///
/// # Arguments
///
/// * `fs` - Filesystem to check against
/// * `path` - The candidate path
/// * `role` - Label used in the diagnostic (e.g. "swiftc", "SDK")
pub(crate) fn validate_exists(
    fs: &dyn FileSystem,
    path: PathBuf,
    role: &str,
) -> Result<PathBuf, ToolchainError> {
    if fs.exists(&path) {
        Ok(path)
    } else {
        Err(ToolchainError::invalid(format!(
            "could not find `{role}` at expected path {}",
            path.display()
        )))
    }
}
