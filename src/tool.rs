//! Tool enum identifying the executables a toolchain must provide.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A required toolchain executable.
///
/// Each variant corresponds to one executable that must be resolved before
/// a package can be built.
///
/// # Example
///
/// ```rust
/// use toolchain_discovery::Tool;
///
/// for tool in Tool::all() {
///     println!("{}: {}", tool.display_name(), tool.executable_name());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
#[non_exhaustive]
pub enum Tool {
    /// The Swift compiler (`swiftc`).
    SwiftCompiler,
    /// The low-level build execution engine (`swift-build-tool`).
    BuildTool,
    /// The C-family compiler (`clang`).
    CCompiler,
}

impl Tool {
    /// The executable file name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use toolchain_discovery::Tool;
    ///
    /// assert_eq!(Tool::SwiftCompiler.executable_name(), "swiftc");
    /// assert_eq!(Tool::BuildTool.executable_name(), "swift-build-tool");
    /// ```
    pub fn executable_name(&self) -> &'static str {
        match self {
            Self::SwiftCompiler => "swiftc",
            Self::BuildTool => "swift-build-tool",
            Self::CCompiler => "clang",
        }
    }

    /// Human-readable name for diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SwiftCompiler => "Swift compiler",
            Self::BuildTool => "build tool",
            Self::CCompiler => "C compiler",
        }
    }

    /// Environment variable that overrides conventional discovery, if any.
    ///
    /// The build tool has no override and is only looked up next to the
    /// compiler.
    ///
    /// # Example
    ///
    /// ```rust
    /// use toolchain_discovery::Tool;
    ///
    /// assert_eq!(Tool::CCompiler.override_var(), Some("CC"));
    /// assert_eq!(Tool::BuildTool.override_var(), None);
    /// ```
    pub fn override_var(&self) -> Option<&'static str> {
        match self {
            Self::SwiftCompiler => Some("SWIFT_EXEC"),
            Self::BuildTool => None,
            Self::CCompiler => Some("CC"),
        }
    }

    /// Iterator over all tools.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}
