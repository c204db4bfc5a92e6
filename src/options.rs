//! Resolution options configuration.
//!
//! This module provides the [`ResolveOptions`] struct for configuring
//! toolchain resolution behavior.

use std::time::Duration;

/// Default upper bound on how long a single external probe may run.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration options for toolchain resolution.
///
/// # Default Behavior
///
/// External probes (`which`, `xcrun`) are bounded by a 30 second timeout.
/// The first `xcrun` call after an Xcode update can take several seconds,
/// so the bound is generous. Setting `probe_timeout` to `None` makes
/// probes block until the external command exits.
///
/// # Example
///
/// ```rust
/// use toolchain_discovery::ResolveOptions;
/// use std::time::Duration;
///
/// // Default options (30 second probe timeout)
/// let opts = ResolveOptions::default();
///
/// // Custom timeout
/// let opts = ResolveOptions {
///     probe_timeout: Some(Duration::from_secs(5)),
/// };
///
/// // Unbounded probes
/// let opts = ResolveOptions {
///     probe_timeout: None,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Maximum time to wait for one external probe.
    ///
    /// A probe that exceeds this is killed and counts as a failed probe.
    ///
    /// Default: 30 seconds
    pub probe_timeout: Option<Duration>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            probe_timeout: Some(DEFAULT_PROBE_TIMEOUT),
        }
    }
}
