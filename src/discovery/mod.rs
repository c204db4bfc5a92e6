//! Discovery building blocks.
//!
//! This module contains the pieces the resolver composes for each tool:
//!
//! - `expand_search_paths`: PATH expansion against a working directory
//! - `lookup_override`: environment variable overrides
//! - `run_probe`: external discovery commands, through a [`CommandRunner`]
//! - `validate_exists`: the existence gate for every resolved path

mod env_override;
mod probe;
mod search_path;
mod validate;

#[cfg(test)]
pub(crate) mod fakes;

use crate::{ProbeError, ToolchainContext, ToolchainError};
use std::path::PathBuf;

use env_override::{lookup_override, EntryKind};
use probe::run_probe;
use validate::validate_exists;

pub use probe::{CommandOutput, CommandRunner, ProbeCommand, SystemCommandRunner};
pub use search_path::expand_search_paths;
pub(crate) use search_path::absolutize;

/// Lookup operations bound to one context and its expanded search paths.
///
/// Handed to [`PlatformToolchainStrategy`](crate::PlatformToolchainStrategy)
/// implementations so platform-specific steps use the same override, probe
/// and validation rules as the rest of resolution.
pub struct ToolLookup<'a> {
    ctx: &'a ToolchainContext,
    search_paths: Vec<PathBuf>,
}

impl<'a> ToolLookup<'a> {
    pub(crate) fn new(ctx: &'a ToolchainContext) -> Self {
        Self {
            ctx,
            search_paths: ctx.search_paths(),
        }
    }

    /// Executable named by the override variable `var`, if it resolves.
    pub fn override_executable(&self, var: &str) -> Option<PathBuf> {
        lookup_override(self.ctx, var, &self.search_paths, EntryKind::Executable)
    }

    /// Directory named by the override variable `var`, if it resolves.
    pub fn override_directory(&self, var: &str) -> Option<PathBuf> {
        lookup_override(self.ctx, var, &self.search_paths, EntryKind::Directory)
    }

    /// Run an external probe through the context's runner.
    pub fn probe(&self, command: &ProbeCommand) -> Result<String, ProbeError> {
        run_probe(self.ctx.runner(), command)
    }

    /// Require that `path` exists, labelling failures with `role`.
    pub fn validate(&self, path: PathBuf, role: &str) -> Result<PathBuf, ToolchainError> {
        validate_exists(self.ctx.file_system(), path, role)
    }
}
