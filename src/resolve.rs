//! Toolchain resolution.

use crate::descriptor::ToolchainDescriptor;
use crate::discovery::{absolutize, ToolLookup};
use crate::{Platform, PlatformToolchainStrategy, Tool, ToolchainContext, ToolchainError};
use std::path::{Path, PathBuf};

/// Resolves a [`ToolchainDescriptor`] from a binary directory.
///
/// Holds the injected context and the platform strategy; both are fixed for
/// the resolver's lifetime.
///
/// # Example
///
/// ```rust,no_run
/// use toolchain_discovery::{Platform, ToolchainContext, ToolchainResolver};
///
/// let resolver = ToolchainResolver::new(
///     ToolchainContext::from_process(),
///     Platform::current().strategy(),
/// );
/// match resolver.resolve("/usr/bin") {
///     Ok(toolchain) => println!("using {}", toolchain.compiler_path().display()),
///     Err(e) => eprintln!("error: {}", e),
/// }
/// ```
pub struct ToolchainResolver {
    ctx: ToolchainContext,
    strategy: Box<dyn PlatformToolchainStrategy>,
}

impl ToolchainResolver {
    /// Create a resolver.
    pub fn new(ctx: ToolchainContext, strategy: Box<dyn PlatformToolchainStrategy>) -> Self {
        Self { ctx, strategy }
    }

    /// The platform this resolver targets.
    pub fn platform(&self) -> Platform {
        self.strategy.platform()
    }

    /// Resolve the toolchain installed in `bin_dir`.
    ///
    /// # Resolution Process
    ///
    /// 1. Derive the library directory (`<bin_dir>/../lib/swift/pm`)
    /// 2. `swiftc`: `SWIFT_EXEC`, else `<bin_dir>/swiftc`
    /// 3. `swift-build-tool`: `<bin_dir>/swift-build-tool`
    /// 4. `clang`: `CC`, else the platform's probe
    /// 5. System root and platform arguments from the strategy
    ///
    /// Each resolved path is checked for existence before the next step
    /// runs. The first failure is returned and nothing later is attempted.
    ///
    /// A relative `bin_dir` is resolved against the context's working
    /// directory.
    pub fn resolve(
        &self,
        bin_dir: impl AsRef<Path>,
    ) -> Result<ToolchainDescriptor, ToolchainError> {
        let bin_dir = absolutize(bin_dir.as_ref(), self.ctx.cwd());
        let lookup = ToolLookup::new(&self.ctx);
        let platform = self.platform();
        tracing::debug!(
            bin_dir = %bin_dir.display(),
            ?platform,
            system_root = platform.has_system_root(),
            "resolving toolchain"
        );

        let library_directory = library_directory(&bin_dir);

        let compiler_path = self.resolve_in_bin_dir(&lookup, Tool::SwiftCompiler, &bin_dir)?;
        let build_tool_path = self.resolve_in_bin_dir(&lookup, Tool::BuildTool, &bin_dir)?;
        let secondary_compiler_path = self.resolve_c_compiler(&lookup)?;

        let system_root = self.strategy.resolve_system_root(&lookup)?;
        let platform_args = self.strategy.platform_args(&system_root);

        Ok(ToolchainDescriptor::new(
            compiler_path,
            secondary_compiler_path,
            build_tool_path,
            library_directory,
            system_root,
            platform_args,
        ))
    }

    /// Override variable if the tool has one, else the file next to the
    /// other toolchain binaries.
    fn resolve_in_bin_dir(
        &self,
        lookup: &ToolLookup<'_>,
        tool: Tool,
        bin_dir: &Path,
    ) -> Result<PathBuf, ToolchainError> {
        let name = tool.executable_name();
        let candidate = tool
            .override_var()
            .and_then(|var| lookup.override_executable(var))
            .unwrap_or_else(|| bin_dir.join(name));

        let path = lookup.validate(candidate, name)?;
        tracing::debug!(tool = name, path = %path.display(), "resolved tool");
        Ok(path)
    }

    fn resolve_c_compiler(&self, lookup: &ToolLookup<'_>) -> Result<PathBuf, ToolchainError> {
        let tool = Tool::CCompiler;
        let name = tool.executable_name();

        let candidate = match tool.override_var().and_then(|var| lookup.override_executable(var)) {
            Some(path) => path,
            None => lookup
                .probe(&self.strategy.c_compiler_probe())
                .map(PathBuf::from)
                .map_err(|e| ToolchainError::invalid(format!("could not find `{name}`: {e}")))?,
        };

        let path = lookup.validate(candidate, name)?;
        tracing::debug!(tool = name, path = %path.display(), "resolved tool");
        Ok(path)
    }
}

/// `<bin_dir>/../lib/swift/pm`, or under `bin_dir` itself when it has no
/// parent. Never validated.
fn library_directory(bin_dir: &Path) -> PathBuf {
    bin_dir
        .parent()
        .unwrap_or(bin_dir)
        .join("lib")
        .join("swift")
        .join("pm")
}

/// Resolve the toolchain in `bin_dir` using the current process environment
/// and the host platform.
///
/// This is the convenience entry point for a tool starting up. It blocks
/// the calling thread while external probes run, including when called
/// from async code.
///
/// # Example
///
/// ```rust,no_run
/// use toolchain_discovery::resolve;
///
/// let toolchain = resolve("/usr/bin").expect("usable toolchain");
/// println!("{:?}", toolchain.secondary_compiler_platform_args());
/// ```
pub fn resolve(bin_dir: impl AsRef<Path>) -> Result<ToolchainDescriptor, ToolchainError> {
    ToolchainResolver::new(
        ToolchainContext::from_process(),
        Platform::current().strategy(),
    )
    .resolve(bin_dir)
}

/// Directory containing the running executable.
///
/// Tools shipped inside a toolchain use this as the binary directory so they
/// find the compiler installed next to them.
pub fn current_binary_directory() -> Result<PathBuf, ToolchainError> {
    let exe = std::env::current_exe().map_err(|e| {
        ToolchainError::invalid(format!("could not determine the running executable: {e}"))
    })?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        ToolchainError::invalid(format!(
            "running executable {} has no parent directory",
            exe.display()
        ))
    })
}
