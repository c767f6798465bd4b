//! Typed error handling for constexprify.
//!
//! Advisory analysis never fails on an ineligible declaration; the only
//! hard failures are front-end-level (unreadable or malformed AST dumps)
//! and environment-level (I/O, configuration). These are structured so
//! library consumers can match on them.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for constexprify operations.
#[derive(Error, Debug)]
pub enum ConstexprifyError {
    /// I/O error when reading dumps or configuration
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Front-end failure: a translation-unit dump could not be parsed.
    ///
    /// Reported once per unit, distinctly from advisory diagnostics.
    #[error("Front-end error in {path}: {message}")]
    FrontEnd {
        path: PathBuf,
        message: String,
        /// Line number (1-indexed) if available
        line: Option<usize>,
        /// Column number (1-indexed) if available
        column: Option<usize>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Invalid argument provided (e.g. a malformed ignore pattern)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ConstexprifyError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a front-end error for a dump that failed to parse.
    pub fn front_end(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FrontEnd {
            path: path.into(),
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Create a front-end error with line/column info.
    pub fn front_end_at(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::FrontEnd {
            path: path.into(),
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable: the affected unit can be
    /// skipped and analysis of the remaining units can continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::FrontEnd { .. } | Self::Config { .. })
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::FrontEnd { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for constexprify results.
pub type ConstexprifyResult<T> = Result<T, ConstexprifyError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> ConstexprifyResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> ConstexprifyResult<T> {
        self.map_err(|e| ConstexprifyError::io(path, e))
    }
}
