//! Error types and exit status conventions for WebShell.

use std::io;

/// Numeric exit statuses shared by every command.
pub mod status {
    /// The command succeeded.
    pub const SUCCESS: i32 = 0;
    /// Invalid usage or unsupported option.
    pub const USAGE: i32 = 1;
    /// The target exists but the operation is not allowed on it.
    pub const BLOCKED: i32 = 126;
    /// The command or path does not exist.
    pub const NOT_FOUND: i32 = 127;
}

/// Errors produced by WebShell.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Blocked(String),

    #[error("VFS error: {0}")]
    Vfs(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ShellError {
    /// Exit status reported when this error ends a command.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShellError::NotFound(_) => status::NOT_FOUND,
            ShellError::Blocked(_) => status::BLOCKED,
            ShellError::Usage(_)
            | ShellError::Vfs(_)
            | ShellError::Config(_)
            | ShellError::Io(_)
            | ShellError::TomlParse(_) => status::USAGE,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
