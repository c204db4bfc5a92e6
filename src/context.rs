//! Injected inputs for toolchain resolution.
//!
//! The resolver never reads ambient process state directly. Everything it
//! observes (environment variables, the working directory, the filesystem and
//! external commands) comes through a [`ToolchainContext`], so tests can
//! substitute fakes and two resolutions over the same context agree.

use crate::discovery::{expand_search_paths, CommandRunner, SystemCommandRunner};
use crate::ResolveOptions;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable holding the executable search path.
pub const PATH_VAR: &str = "PATH";

/// Read-only view of the filesystem used during resolution.
pub trait FileSystem: Send + Sync {
    /// Whether any entry exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` is a regular file the current user may execute.
    fn is_executable_file(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[cfg(unix)]
    fn is_executable_file(&self, path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        fs::metadata(path)
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable_file(&self, path: &Path) -> bool {
        fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
    }
}

/// Everything the resolver is allowed to observe.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use toolchain_discovery::ToolchainContext;
///
/// let mut env = HashMap::new();
/// env.insert("PATH".to_string(), "/usr/bin:/bin".to_string());
/// env.insert("CC".to_string(), "/usr/bin/clang".to_string());
///
/// let ctx = ToolchainContext::new(env, "/work");
/// assert_eq!(ctx.var("CC"), Some("/usr/bin/clang"));
/// assert_eq!(ctx.search_paths().len(), 2);
/// ```
#[derive(Clone)]
pub struct ToolchainContext {
    env: HashMap<String, String>,
    cwd: PathBuf,
    fs: Arc<dyn FileSystem>,
    runner: Arc<dyn CommandRunner>,
}

impl ToolchainContext {
    /// Create a context over an explicit environment and working directory,
    /// using the host filesystem and [`SystemCommandRunner`] with default
    /// options.
    pub fn new(env: HashMap<String, String>, cwd: impl Into<PathBuf>) -> Self {
        Self::new_with_options(env, cwd, &ResolveOptions::default())
    }

    /// Like [`ToolchainContext::new`] with custom options.
    pub fn new_with_options(
        env: HashMap<String, String>,
        cwd: impl Into<PathBuf>,
        options: &ResolveOptions,
    ) -> Self {
        let cwd = cwd.into();
        let runner = SystemCommandRunner::new(env.clone(), cwd.clone(), options.probe_timeout);
        Self {
            env,
            cwd,
            fs: Arc::new(LocalFileSystem),
            runner: Arc::new(runner),
        }
    }

    /// Snapshot the current process environment and working directory.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped. If the
    /// working directory cannot be determined, relative search path entries
    /// are resolved against `.`.
    pub fn from_process() -> Self {
        Self::from_process_with_options(&ResolveOptions::default())
    }

    /// Like [`ToolchainContext::from_process`] with custom options.
    pub fn from_process_with_options(options: &ResolveOptions) -> Self {
        let env = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new_with_options(env, cwd, options)
    }

    /// Replace the filesystem accessor.
    #[must_use]
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Replace the command runner used for external probes.
    #[must_use]
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Value of an environment variable, if set.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }

    /// The working directory relative entries are resolved against.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Expanded `PATH` entries, in order.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        expand_search_paths(self.var(PATH_VAR), &self.cwd)
    }

    pub(crate) fn file_system(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub(crate) fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }
}

impl fmt::Debug for ToolchainContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolchainContext")
            .field("env", &self.env)
            .field("cwd", &self.cwd)
            .finish_non_exhaustive()
    }
}
