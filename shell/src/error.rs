//! Error types for the shell layer.
//!
//! Covers command lookup, task dispatch, grammar errors bubbling up from
//! [`shellkit_core`], and loading shell configuration files.

use shellkit_core::{OptionError, ParserError};
use thiserror::Error;

/// Errors that can occur while building or running a shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// No registered command has the requested name.
    #[error("command \"{0}\" not found")]
    CommandNotFound(String),

    /// A dispatched command carries no string `task` parameter.
    #[error("command \"{0}\" has no task")]
    TaskMissing(String),

    /// No task is registered under the requested name.
    #[error("task \"{0}\" not registered")]
    TaskNotFound(String),

    /// A task ran and reported an error.
    #[error("task \"{task}\" failed")]
    TaskFailed {
        task: String,
        #[source]
        source: crate::task::TaskError,
    },

    /// Argument list rejected by the parser.
    #[error(transparent)]
    Parser(#[from] ParserError),

    /// An option was declared with neither a short nor a long name.
    #[error(transparent)]
    Option(#[from] OptionError),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`ShellError`].
pub type Result<T> = std::result::Result<T, ShellError>;
