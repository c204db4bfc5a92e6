//! Per-platform toolchain behavior.
//!
//! Everything that differs between hosts lives behind
//! [`PlatformToolchainStrategy`]: how the C compiler is probed, whether an
//! SDK has to be found, and which arguments every compiler invocation needs.
//! The resolver picks one strategy up front and never checks the platform
//! again.

use crate::descriptor::PlatformArgs;
use crate::discovery::{ProbeCommand, ToolLookup};
use crate::{SystemRoot, ToolchainError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides SDK discovery on Darwin.
pub const SYSROOT_VAR: &str = "SYSROOT";

/// Oldest macOS release the produced binaries target.
pub const DEFAULT_DEPLOYMENT_TARGET: &str = "10.10";

/// Supported host platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Platform {
    /// macOS, with an Xcode SDK.
    Darwin,
    /// Linux and other hosts without a system root.
    Linux,
}

impl Platform {
    /// The platform this crate was compiled for.
    ///
    /// Every non-Apple target is treated as [`Platform::Linux`].
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Darwin
        } else {
            Self::Linux
        }
    }

    /// Whether the platform resolves an SDK.
    pub fn has_system_root(&self) -> bool {
        matches!(self, Self::Darwin)
    }

    /// The default strategy for this platform.
    ///
    /// # Example
    ///
    /// ```rust
    /// use toolchain_discovery::{Platform, PlatformToolchainStrategy};
    ///
    /// let strategy = Platform::current().strategy();
    /// assert_eq!(strategy.platform(), Platform::current());
    /// ```
    pub fn strategy(&self) -> Box<dyn PlatformToolchainStrategy> {
        match self {
            Self::Darwin => Box::new(DarwinStrategy::default()),
            Self::Linux => Box::new(LinuxStrategy),
        }
    }
}

/// Platform-specific steps of toolchain resolution.
pub trait PlatformToolchainStrategy: Send + Sync {
    /// The platform this strategy implements.
    fn platform(&self) -> Platform;

    /// Command that prints the C compiler path when `CC` is not set.
    fn c_compiler_probe(&self) -> ProbeCommand;

    /// Resolve the system root.
    ///
    /// Platforms without one return [`SystemRoot::None`] without probing.
    fn resolve_system_root(&self, lookup: &ToolLookup<'_>) -> Result<SystemRoot, ToolchainError>;

    /// Compiler arguments for the resolved system root.
    fn platform_args(&self, system_root: &SystemRoot) -> PlatformArgs;
}

/// Linux: `which` for the C compiler, no SDK, position independent C code.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxStrategy;

impl PlatformToolchainStrategy for LinuxStrategy {
    fn platform(&self) -> Platform {
        Platform::Linux
    }

    fn c_compiler_probe(&self) -> ProbeCommand {
        ProbeCommand::new("which", ["clang"])
    }

    fn resolve_system_root(&self, _lookup: &ToolLookup<'_>) -> Result<SystemRoot, ToolchainError> {
        Ok(SystemRoot::None)
    }

    fn platform_args(&self, _system_root: &SystemRoot) -> PlatformArgs {
        PlatformArgs {
            primary: Vec::new(),
            secondary: vec!["-fPIC".to_string()],
        }
    }
}

/// Darwin: everything comes from `xcrun` and the macOS SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DarwinStrategy {
    /// Architecture name as Apple tools spell it (`x86_64`, `arm64`).
    pub arch: String,
    /// Minimum macOS version, e.g. `10.10`.
    pub deployment_target: String,
}

impl Default for DarwinStrategy {
    fn default() -> Self {
        let arch = match std::env::consts::ARCH {
            "aarch64" => "arm64",
            _ => "x86_64",
        };
        Self {
            arch: arch.to_string(),
            deployment_target: DEFAULT_DEPLOYMENT_TARGET.to_string(),
        }
    }
}

impl DarwinStrategy {
    fn sdk_path_probe() -> ProbeCommand {
        ProbeCommand::new("xcrun", ["--sdk", "macosx", "--show-sdk-path"])
    }

    fn sdk_platform_path_probe() -> ProbeCommand {
        ProbeCommand::new("xcrun", ["--sdk", "macosx", "--show-sdk-platform-path"])
    }
}

impl PlatformToolchainStrategy for DarwinStrategy {
    fn platform(&self) -> Platform {
        Platform::Darwin
    }

    fn c_compiler_probe(&self) -> ProbeCommand {
        ProbeCommand::new("xcrun", ["--find", "clang"])
    }

    fn resolve_system_root(&self, lookup: &ToolLookup<'_>) -> Result<SystemRoot, ToolchainError> {
        let sdk = match lookup.override_directory(SYSROOT_VAR) {
            Some(path) => path,
            None => lookup
                .probe(&Self::sdk_path_probe())
                .map(PathBuf::from)
                .map_err(|e| {
                    ToolchainError::invalid(format!("could not find the default SDK: {e}"))
                })?,
        };
        let path = lookup.validate(sdk, "SDK")?;
        tracing::debug!(sdk = %path.display(), "resolved default SDK");

        let platform_path = lookup
            .probe(&Self::sdk_platform_path_probe())
            .map_err(|e| {
                ToolchainError::invalid(format!("could not find the SDK platform path: {e}"))
            })?;
        let frameworks_path = PathBuf::from(platform_path)
            .join("Developer")
            .join("Library")
            .join("Frameworks");

        Ok(SystemRoot::Sdk {
            path,
            frameworks_path,
        })
    }

    fn platform_args(&self, system_root: &SystemRoot) -> PlatformArgs {
        let min = &self.deployment_target;
        let mut primary = vec![
            "-target".to_string(),
            format!("{}-apple-macosx{min}", self.arch),
        ];
        let mut secondary = vec![
            "-arch".to_string(),
            self.arch.clone(),
            format!("-mmacosx-version-min={min}"),
        ];

        if let SystemRoot::Sdk {
            path,
            frameworks_path,
        } = system_root
        {
            let sdk = path.display().to_string();
            let frameworks = frameworks_path.display().to_string();
            primary.extend([
                "-sdk".to_string(),
                sdk.clone(),
                "-F".to_string(),
                frameworks.clone(),
            ]);
            secondary.extend(["-isysroot".to_string(), sdk, "-F".to_string(), frameworks]);
        }

        PlatformArgs { primary, secondary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::fakes::{context_with_runner, FakeFileSystem, FakeRunner};
    use std::sync::Arc;

    const SDK: &str = "/Applications/Xcode.app/Contents/Developer/Platforms/MacOSX.platform/Developer/SDKs/MacOSX.sdk";
    const PLATFORM: &str = "/Applications/Xcode.app/Contents/Developer/Platforms/MacOSX.platform";

    fn darwin() -> DarwinStrategy {
        DarwinStrategy {
            arch: "x86_64".to_string(),
            deployment_target: "10.10".to_string(),
        }
    }

    fn xcrun_runner() -> FakeRunner {
        FakeRunner::default()
            .respond("xcrun --sdk macosx --show-sdk-path", &format!("{SDK}\n"))
            .respond(
                "xcrun --sdk macosx --show-sdk-platform-path",
                &format!("{PLATFORM}\n"),
            )
    }

    #[test]
    fn test_current_platform() {
        let expected = if cfg!(target_os = "macos") {
            Platform::Darwin
        } else {
            Platform::Linux
        };
        assert_eq!(Platform::current(), expected);
        assert_eq!(Platform::current().strategy().platform(), expected);
    }

    #[test]
    fn test_has_system_root() {
        assert!(Platform::Darwin.has_system_root());
        assert!(!Platform::Linux.has_system_root());
    }

    #[test]
    fn test_probe_commands() {
        assert_eq!(LinuxStrategy.c_compiler_probe().to_string(), "which clang");
        assert_eq!(darwin().c_compiler_probe().to_string(), "xcrun --find clang");
    }

    #[test]
    fn test_linux_ignores_sysroot_and_never_probes() {
        let runner = Arc::new(FakeRunner::default());
        let ctx = context_with_runner(
            &[("SYSROOT", "/some/sdk")],
            FakeFileSystem::default().with_dir("/some/sdk"),
            runner.clone(),
        );
        let root = LinuxStrategy
            .resolve_system_root(&ToolLookup::new(&ctx))
            .unwrap();
        assert_eq!(root, SystemRoot::None);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_linux_args_are_constant() {
        let args = LinuxStrategy.platform_args(&SystemRoot::None);
        assert!(args.primary.is_empty());
        assert_eq!(args.secondary, vec!["-fPIC".to_string()]);
    }

    #[test]
    fn test_darwin_probes_sdk() {
        let ctx = context_with_runner(
            &[],
            FakeFileSystem::default().with_dir(SDK),
            Arc::new(xcrun_runner()),
        );
        let root = darwin().resolve_system_root(&ToolLookup::new(&ctx)).unwrap();
        assert_eq!(
            root,
            SystemRoot::Sdk {
                path: PathBuf::from(SDK),
                frameworks_path: PathBuf::from(format!("{PLATFORM}/Developer/Library/Frameworks")),
            }
        );
    }

    #[test]
    fn test_darwin_sysroot_override_skips_sdk_probe() {
        let runner = Arc::new(xcrun_runner());
        let ctx = context_with_runner(
            &[("SYSROOT", "/custom/MacOSX.sdk")],
            FakeFileSystem::default().with_dir("/custom/MacOSX.sdk"),
            runner.clone(),
        );
        let root = darwin().resolve_system_root(&ToolLookup::new(&ctx)).unwrap();
        assert_eq!(
            root,
            SystemRoot::Sdk {
                path: PathBuf::from("/custom/MacOSX.sdk"),
                frameworks_path: PathBuf::from(format!("{PLATFORM}/Developer/Library/Frameworks")),
            }
        );
        // The platform path probe still runs.
        assert_eq!(
            runner.calls(),
            vec!["xcrun --sdk macosx --show-sdk-platform-path".to_string()]
        );
    }

    #[test]
    fn test_darwin_empty_sdk_probe() {
        let runner = FakeRunner::default().respond("xcrun --sdk macosx --show-sdk-path", "\n");
        let ctx = context_with_runner(&[], FakeFileSystem::default(), Arc::new(runner));
        let err = darwin()
            .resolve_system_root(&ToolLookup::new(&ctx))
            .unwrap_err();
        assert_eq!(
            err.problem(),
            "could not find the default SDK: `xcrun --sdk macosx --show-sdk-path` did not return a path"
        );
    }

    #[test]
    fn test_darwin_missing_sdk_path() {
        let ctx = context_with_runner(&[], FakeFileSystem::default(), Arc::new(xcrun_runner()));
        let err = darwin()
            .resolve_system_root(&ToolLookup::new(&ctx))
            .unwrap_err();
        assert_eq!(
            err.problem(),
            format!("could not find `SDK` at expected path {SDK}")
        );
    }

    #[test]
    fn test_darwin_platform_path_probe_failure() {
        let runner = FakeRunner::default()
            .respond("xcrun --sdk macosx --show-sdk-path", SDK)
            .exit("xcrun --sdk macosx --show-sdk-platform-path", 1, "");
        let fs = FakeFileSystem::default().with_dir(SDK);
        let ctx = context_with_runner(&[], fs, Arc::new(runner));
        let err = darwin()
            .resolve_system_root(&ToolLookup::new(&ctx))
            .unwrap_err();
        assert!(err.problem().starts_with("could not find the SDK platform path"));
    }

    #[test]
    fn test_darwin_args_embed_sdk() {
        let root = SystemRoot::Sdk {
            path: PathBuf::from("/sdk"),
            frameworks_path: PathBuf::from("/platform/Developer/Library/Frameworks"),
        };
        let args = darwin().platform_args(&root);
        assert_eq!(
            args.primary,
            vec![
                "-target",
                "x86_64-apple-macosx10.10",
                "-sdk",
                "/sdk",
                "-F",
                "/platform/Developer/Library/Frameworks",
            ]
        );
        assert_eq!(
            args.secondary,
            vec![
                "-arch",
                "x86_64",
                "-mmacosx-version-min=10.10",
                "-isysroot",
                "/sdk",
                "-F",
                "/platform/Developer/Library/Frameworks",
            ]
        );
    }

    #[test]
    fn test_darwin_default_arch() {
        let strategy = DarwinStrategy::default();
        assert!(strategy.arch == "x86_64" || strategy.arch == "arm64");
        assert_eq!(strategy.deployment_target, DEFAULT_DEPLOYMENT_TARGET);
    }
}
