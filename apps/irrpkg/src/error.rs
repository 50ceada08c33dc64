//! CLI error handling

use std::fmt;

use irrpkg_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(irrpkg_errors::ConfigError),
    /// Recipe evaluation error
    Recipe(irrpkg_errors::Error),
    /// I/O error
    Io(std::io::Error),
}

fn write_user_facing(f: &mut fmt::Formatter<'_>, e: &impl UserFacingError) -> fmt::Result {
    write!(f, "{}", e.user_message())?;
    if let Some(code) = e.user_code() {
        write!(f, "\n  Code: {code}")?;
    }
    if let Some(hint) = e.user_hint() {
        write!(f, "\n  Hint: {hint}")?;
    }
    if e.is_retryable() {
        write!(f, "\n  Retry: safe to retry this operation.")?;
    }
    Ok(())
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write_user_facing(f, e),
            CliError::Recipe(e) => write_user_facing(f, e),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Recipe(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<irrpkg_errors::ConfigError> for CliError {
    fn from(e: irrpkg_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<irrpkg_errors::Error> for CliError {
    fn from(e: irrpkg_errors::Error) -> Self {
        CliError::Recipe(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Recipe(e.into())
    }
}
