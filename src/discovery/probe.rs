//! External probe execution.
//!
//! Probes are the only part of resolution that leaves the process: commands
//! such as `which clang` or `xcrun --show-sdk-path` that answer with a path
//! on stdout.

use crate::context::PATH_VAR;
use crate::ProbeError;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::thread;
use std::time::Duration;
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::time::timeout;

/// A command line used to discover a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeCommand {
    /// Program name or path.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl ProbeCommand {
    /// Build a probe from a program and its arguments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use toolchain_discovery::ProbeCommand;
    ///
    /// let probe = ProbeCommand::new("xcrun", ["--find", "clang"]);
    /// assert_eq!(probe.to_string(), "xcrun --find clang");
    /// ```
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ProbeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
}

impl CommandOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs external commands on behalf of the resolver.
///
/// Implementations block until the command finishes (or their own timeout
/// fires). Tests substitute canned outputs instead of spawning processes.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and capture its output.
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// [`CommandRunner`] that spawns real processes.
///
/// The program is located with `which` against the configured `PATH`, and
/// the child runs with exactly the configured environment. Nothing is
/// inherited from the ambient process environment, so the context governs
/// both which executable answers the probe and what that executable sees.
///
/// Each call drives the child on a private current-thread tokio runtime.
/// When the calling thread is already inside a tokio runtime, the command
/// is run from a short-lived scoped thread instead, so resolving from async
/// code blocks the caller but never panics.
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    env: HashMap<String, String>,
    cwd: PathBuf,
    timeout: Option<Duration>,
}

impl SystemCommandRunner {
    /// Create a runner.
    ///
    /// # Arguments
    ///
    /// * `env` - Complete child environment; its `PATH` locates programs
    /// * `cwd` - Working directory for lookups and spawned children
    /// * `timeout` - Upper bound on each command, `None` for unbounded
    pub fn new(env: HashMap<String, String>, cwd: PathBuf, timeout: Option<Duration>) -> Self {
        Self { env, cwd, timeout }
    }

    fn run_to_completion(
        &self,
        executable: &Path,
        program: &str,
        args: &[String],
    ) -> io::Result<Output> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        runtime.block_on(async {
            let mut command = Command::new(executable);
            command
                .args(args)
                .env_clear()
                .envs(&self.env)
                .current_dir(&self.cwd)
                .stdin(Stdio::null())
                .kill_on_drop(true);

            match self.timeout {
                Some(limit) => timeout(limit, command.output()).await.map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("{program} did not finish within {limit:?}"),
                    )
                })?,
                None => command.output().await,
            }
        })
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let executable = which::which_in(program, self.env.get(PATH_VAR), &self.cwd)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, format!("{program}: {e}")))?;

        let output = if Handle::try_current().is_ok() {
            thread::scope(|scope| {
                scope
                    .spawn(|| self.run_to_completion(&executable, program, args))
                    .join()
                    .unwrap_or_else(|_| {
                        Err(io::Error::other(format!("{program}: runner thread panicked")))
                    })
            })?
        } else {
            self.run_to_completion(&executable, program, args)?
        };

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// Run a probe and return its trimmed answer.
///
/// # Returns
///
/// `Ok(String)` with trailing whitespace removed, or `ProbeError::Failed`
/// if the command could not be run, exited non-zero, timed out, or printed
/// nothing. The caller cannot tell these apart; the reason is logged at
/// debug level.
pub(crate) fn run_probe(
    runner: &dyn CommandRunner,
    command: &ProbeCommand,
) -> Result<String, ProbeError> {
    let failed = || ProbeError::Failed {
        command: command.to_string(),
    };

    tracing::trace!(%command, "running probe");
    let output = runner.run(&command.program, &command.args).map_err(|e| {
        tracing::debug!(%command, error = %e, "probe could not run");
        failed()
    })?;

    if !output.success() {
        tracing::debug!(%command, exit_code = ?output.exit_code, "probe exited unsuccessfully");
        return Err(failed());
    }

    let answer = output.stdout.trim_end();
    if answer.is_empty() {
        tracing::debug!(%command, "probe printed nothing");
        return Err(failed());
    }

    Ok(answer.to_string())
}
