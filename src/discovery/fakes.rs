//! In-memory fakes for unit tests.

use super::{CommandOutput, CommandRunner};
use crate::context::{FileSystem, ToolchainContext};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    File,
    Executable,
    Dir,
}

/// Filesystem holding an explicit set of entries. Ancestors of any entry
/// count as directories.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeFileSystem {
    entries: HashMap<PathBuf, Entry>,
}

impl FakeFileSystem {
    pub(crate) fn with_file(mut self, path: &str) -> Self {
        self.entries.insert(PathBuf::from(path), Entry::File);
        self
    }

    pub(crate) fn with_executable(mut self, path: &str) -> Self {
        self.entries.insert(PathBuf::from(path), Entry::Executable);
        self
    }

    pub(crate) fn with_dir(mut self, path: &str) -> Self {
        self.entries.insert(PathBuf::from(path), Entry::Dir);
        self
    }
}

impl FileSystem for FakeFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.entries.contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.entries.get(path) == Some(&Entry::Dir)
            || self
                .entries
                .keys()
                .any(|p| p != path && p.starts_with(path))
    }

    fn is_executable_file(&self, path: &Path) -> bool {
        self.entries.get(path) == Some(&Entry::Executable)
    }
}

/// Runner answering from a table keyed by the full command line.
/// Unknown commands fail to spawn.
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    responses: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub(crate) fn respond(self, command: &str, stdout: &str) -> Self {
        self.exit(command, 0, stdout)
    }

    pub(crate) fn exit(mut self, command: &str, code: i32, stdout: &str) -> Self {
        self.responses.insert(
            command.to_string(),
            CommandOutput {
                exit_code: Some(code),
                stdout: stdout.to_string(),
            },
        );
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let line = std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(line.clone());
        self.responses
            .get(&line)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, line))
    }
}

/// Context over `vars` and `fs` with a runner that knows no commands.
pub(crate) fn context(vars: &[(&str, &str)], fs: FakeFileSystem) -> ToolchainContext {
    context_with_runner(vars, fs, Arc::new(FakeRunner::default()))
}

pub(crate) fn context_with_runner(
    vars: &[(&str, &str)],
    fs: FakeFileSystem,
    runner: Arc<FakeRunner>,
) -> ToolchainContext {
    let env = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ToolchainContext::new(env, "/work")
        .with_file_system(Arc::new(fs))
        .with_runner(runner)
}
