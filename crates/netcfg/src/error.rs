//! Error types for fragment loading and generation.

use std::io;

/// Result type for netcfg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or writing fragments.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid fragment syntax.
    #[error("parse error: {0}")]
    Parse(String),

    /// No interface name supplied.
    #[error("Interface name is required")]
    MissingInterface,
}
