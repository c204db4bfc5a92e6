//! The resolved toolchain descriptor.

use crate::Tool;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The platform SDK a toolchain compiles against.
///
/// Only platforms with a system root concept (Darwin) produce
/// [`SystemRoot::Sdk`]. The SDK path and the frameworks path always travel
/// together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SystemRoot {
    /// The platform has no system root.
    None,

    /// A resolved SDK.
    Sdk {
        /// The SDK root, validated to exist.
        path: PathBuf,
        /// Framework search path inside the SDK platform directory. Derived,
        /// not validated.
        frameworks_path: PathBuf,
    },
}

/// Fully resolved and validated toolchain.
///
/// Produced once by [`ToolchainResolver`](crate::ToolchainResolver) and read
/// by whatever constructs compiler invocations. There is no way to modify a
/// descriptor; a different toolchain means resolving again.
///
/// Every required path pointed at an existing filesystem entry when the
/// descriptor was built. The library directory and the frameworks path are
/// derived and were never checked.
///
/// # Example
///
/// ```rust,no_run
/// use toolchain_discovery::resolve;
///
/// let toolchain = resolve("/usr/bin").expect("toolchain");
/// println!("swiftc: {}", toolchain.compiler_path().display());
/// if let Some(sdk) = toolchain.default_system_root() {
///     println!("SDK: {}", sdk.display());
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainDescriptor {
    compiler_path: PathBuf,
    secondary_compiler_path: PathBuf,
    build_tool_path: PathBuf,
    library_directory: PathBuf,
    system_root: SystemRoot,
    primary_compiler_platform_args: Vec<String>,
    secondary_compiler_platform_args: Vec<String>,
}

impl ToolchainDescriptor {
    pub(crate) fn new(
        compiler_path: PathBuf,
        secondary_compiler_path: PathBuf,
        build_tool_path: PathBuf,
        library_directory: PathBuf,
        system_root: SystemRoot,
        platform_args: PlatformArgs,
    ) -> Self {
        Self {
            compiler_path,
            secondary_compiler_path,
            build_tool_path,
            library_directory,
            system_root,
            primary_compiler_platform_args: platform_args.primary,
            secondary_compiler_platform_args: platform_args.secondary,
        }
    }

    /// Path to `swiftc`.
    pub fn compiler_path(&self) -> &Path {
        &self.compiler_path
    }

    /// Path to the C compiler.
    pub fn secondary_compiler_path(&self) -> &Path {
        &self.secondary_compiler_path
    }

    /// Path to `swift-build-tool`.
    pub fn build_tool_path(&self) -> &Path {
        &self.build_tool_path
    }

    /// Package manager support library directory (`<prefix>/lib/swift/pm`).
    pub fn library_directory(&self) -> &Path {
        &self.library_directory
    }

    /// The system root variant.
    pub fn system_root(&self) -> &SystemRoot {
        &self.system_root
    }

    /// The default SDK, if the platform has one.
    pub fn default_system_root(&self) -> Option<&Path> {
        match &self.system_root {
            SystemRoot::Sdk { path, .. } => Some(path),
            SystemRoot::None => None,
        }
    }

    /// Framework search path of the SDK platform, if the platform has an SDK.
    pub fn platform_frameworks_path(&self) -> Option<&Path> {
        match &self.system_root {
            SystemRoot::Sdk {
                frameworks_path, ..
            } => Some(frameworks_path),
            SystemRoot::None => None,
        }
    }

    /// Platform arguments for every `swiftc` invocation.
    pub fn primary_compiler_platform_args(&self) -> &[String] {
        &self.primary_compiler_platform_args
    }

    /// Platform arguments for every C compiler invocation.
    pub fn secondary_compiler_platform_args(&self) -> &[String] {
        &self.secondary_compiler_platform_args
    }

    /// Resolved path for `tool`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use toolchain_discovery::{resolve, Tool};
    ///
    /// let toolchain = resolve("/usr/bin").expect("toolchain");
    /// for tool in Tool::all() {
    ///     println!("{}: {}", tool.display_name(), toolchain.tool_path(tool).display());
    /// }
    /// ```
    pub fn tool_path(&self, tool: Tool) -> &Path {
        match tool {
            Tool::SwiftCompiler => &self.compiler_path,
            Tool::BuildTool => &self.build_tool_path,
            Tool::CCompiler => &self.secondary_compiler_path,
        }
    }
}

/// Compiler arguments contributed by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformArgs {
    /// Arguments for `swiftc`.
    pub primary: Vec<String>,
    /// Arguments for the C compiler.
    pub secondary: Vec<String>,
}
