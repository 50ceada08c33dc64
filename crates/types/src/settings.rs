//! Build settings: target OS, architecture, compiler and build type

use irrpkg_errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Os {
    Windows,
    Linux,
    Macos,
    FreeBSD,
    Android,
    #[serde(rename = "iOS")]
    Ios,
}

impl Os {
    /// OS of the machine running irrpkg
    #[must_use]
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Windows,
            "macos" => Self::Macos,
            "freebsd" => Self::FreeBSD,
            "android" => Self::Android,
            "ios" => Self::Ios,
            _ => Self::Linux,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::Macos => "Macos",
            Self::FreeBSD => "FreeBSD",
            Self::Android => "Android",
            Self::Ios => "iOS",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::Macos),
            "freebsd" => Ok(Self::FreeBSD),
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            _ => Err(invalid("os", s)),
        }
    }
}

/// Target CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    X86,
    X86_64,
    Armv7,
    Armv8,
}

impl Arch {
    #[must_use]
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86" => Self::X86,
            "arm" => Self::Armv7,
            "aarch64" => Self::Armv8,
            _ => Self::X86_64,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::X86_64 => "x86_64",
            Self::Armv7 => "armv7",
            Self::Armv8 => "armv8",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86" | "i686" => Ok(Self::X86),
            "x86_64" | "amd64" => Ok(Self::X86_64),
            "armv7" => Ok(Self::Armv7),
            "armv8" | "arm64" | "aarch64" => Ok(Self::Armv8),
            _ => Err(invalid("arch", s)),
        }
    }
}

/// CMake build type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
            Self::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            "relwithdebinfo" => Ok(Self::RelWithDebInfo),
            "minsizerel" => Ok(Self::MinSizeRel),
            _ => Err(invalid("build_type", s)),
        }
    }
}

/// Compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerName {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

impl CompilerName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gcc => "gcc",
            Self::Clang => "clang",
            Self::AppleClang => "apple-clang",
            Self::Msvc => "msvc",
        }
    }
}

impl FromStr for CompilerName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gcc" => Ok(Self::Gcc),
            "clang" => Ok(Self::Clang),
            "apple-clang" => Ok(Self::AppleClang),
            "msvc" | "visual studio" => Ok(Self::Msvc),
            _ => Err(invalid("compiler", s)),
        }
    }
}

/// Compiler name and optional version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compiler {
    pub name: CompilerName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Compiler {
    /// Default compiler family for an OS
    #[must_use]
    pub fn default_for(os: Os) -> Self {
        let name = match os {
            Os::Windows => CompilerName::Msvc,
            Os::Macos | Os::Ios => CompilerName::AppleClang,
            Os::FreeBSD | Os::Android => CompilerName::Clang,
            Os::Linux => CompilerName::Gcc,
        };
        Self {
            name,
            version: None,
        }
    }

    /// Whether the generator for this compiler builds every configuration
    /// from a single build tree
    #[must_use]
    pub fn is_multi_config(&self) -> bool {
        self.name == CompilerName::Msvc
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {version}", self.name.as_str()),
            None => f.write_str(self.name.as_str()),
        }
    }
}

/// The settings a recipe is evaluated against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Settings {
    pub os: Os,
    pub arch: Arch,
    pub compiler: Compiler,
    pub build_type: BuildType,
}

impl Settings {
    /// Settings describing the host, built as `Release`
    #[must_use]
    pub fn detect() -> Self {
        let os = Os::host();
        Self {
            os,
            arch: Arch::host(),
            compiler: Compiler::default_for(os),
            build_type: BuildType::Release,
        }
    }

    /// Apply a single `key=value` override
    ///
    /// Changing the OS without naming a compiler resets the compiler to the
    /// default for the new OS.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or unparsable values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "os" => {
                self.os = value.parse()?;
                self.compiler = Compiler::default_for(self.os);
            }
            "arch" => self.arch = value.parse()?,
            "build_type" => self.build_type = value.parse()?,
            "compiler" => {
                self.compiler = Compiler {
                    name: value.parse()?,
                    version: None,
                };
            }
            "compiler.version" => self.compiler.version = Some(value.to_string()),
            _ => {
                return Err(ConfigError::UnknownSetting {
                    setting: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Stable `key=value` lines used when hashing a package id
    #[must_use]
    pub fn canonical_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("arch={}", self.arch),
            format!("build_type={}", self.build_type),
            format!("compiler={}", self.compiler.name.as_str()),
        ];
        if let Some(version) = &self.compiler.version {
            lines.push(format!("compiler.version={version}"));
        }
        lines.push(format!("os={}", self.os));
        lines
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::detect()
    }
}

fn invalid(field: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}
