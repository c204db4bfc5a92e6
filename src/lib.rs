//! # toolchain-discovery
//!
//! Toolchain discovery and validation for package build pipelines.
//!
//! Before a package can be built, the build pipeline needs the Swift
//! compiler, the low-level build tool, a C compiler and (on macOS) the
//! default SDK. This crate finds all of them, checks that they exist, and
//! hands back an immutable [`ToolchainDescriptor`].
//!
//! ## Features
//!
//! - Layered lookup per tool: override variable, conventional location,
//!   external probe
//! - `PlatformToolchainStrategy` for the Darwin/Linux differences
//! - Fail-fast validation with a descriptive [`ToolchainError`]
//! - Injectable environment, filesystem and command runner via
//!   [`ToolchainContext`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use toolchain_discovery::{current_binary_directory, resolve};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let toolchain = resolve(current_binary_directory()?)?;
//!     println!("swiftc: {}", toolchain.compiler_path().display());
//!     println!("clang:  {}", toolchain.secondary_compiler_path().display());
//!     println!("args:   {:?}", toolchain.primary_compiler_platform_args());
//!     Ok(())
//! }
//! ```

mod context;
mod descriptor;
mod discovery;
mod error;
mod options;
mod platform;
mod resolve;
mod tool;

pub use context::{FileSystem, LocalFileSystem, ToolchainContext, PATH_VAR};
pub use descriptor::{PlatformArgs, SystemRoot, ToolchainDescriptor};
pub use discovery::{
    expand_search_paths, CommandOutput, CommandRunner, ProbeCommand, SystemCommandRunner,
    ToolLookup,
};
pub use error::{ProbeError, ToolchainError};
pub use options::{ResolveOptions, DEFAULT_PROBE_TIMEOUT};
pub use platform::{
    DarwinStrategy, LinuxStrategy, Platform, PlatformToolchainStrategy,
    DEFAULT_DEPLOYMENT_TARGET, SYSROOT_VAR,
};
pub use resolve::{current_binary_directory, resolve, ToolchainResolver};
pub use tool::Tool;
