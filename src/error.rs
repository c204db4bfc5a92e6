//! Error types for toolchain resolution.

use thiserror::Error;

/// Errors that can occur while resolving a toolchain.
///
/// Resolution is fail-fast: the first missing tool or failed probe aborts
/// the whole attempt and no partial descriptor is produced. The `problem`
/// always names the tool or role and the path or condition that failed.
///
/// # Example
///
/// ```rust
/// use toolchain_discovery::ToolchainError;
///
/// fn report(error: ToolchainError) {
///     eprintln!("error: {}", error);
///     eprintln!("  {}", error.problem());
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ToolchainError {
    /// A required tool or SDK could not be found or validated.
    #[error("invalid toolchain: {problem}")]
    InvalidToolchain {
        /// Description of what was missing and where it was expected.
        problem: String,
    },
}

impl ToolchainError {
    pub(crate) fn invalid(problem: impl Into<String>) -> Self {
        Self::InvalidToolchain {
            problem: problem.into(),
        }
    }

    /// The human-readable problem description.
    ///
    /// # Example
    ///
    /// ```rust
    /// use toolchain_discovery::ToolchainError;
    ///
    /// let error = ToolchainError::InvalidToolchain {
    ///     problem: "could not find `swiftc` at expected path /usr/bin/swiftc".to_string(),
    /// };
    /// assert!(error.problem().contains("swiftc"));
    /// ```
    pub fn problem(&self) -> &str {
        match self {
            Self::InvalidToolchain { problem } => problem,
        }
    }
}

/// An external probe could not answer.
///
/// Non-zero exits, spawn failures, timeouts and empty output are all folded
/// into this one variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// The probe command did not produce a usable answer.
    #[error("`{command}` did not return a path")]
    Failed {
        /// The command line that was run, for diagnostics.
        command: String,
    },
}
