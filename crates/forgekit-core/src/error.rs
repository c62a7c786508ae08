//! Unified error handling for forgekit
//!
//! One error type for everything that can go wrong while resolving
//! tools, reading pipeline inputs, and running external commands.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all forgekit operations
#[derive(Error, Debug)]
pub enum Error {
    // ==================== I/O Errors ====================

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required input file or directory does not exist
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    /// A path that must be a directory is not one
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    // ==================== Tool Errors ====================

    /// A vendored tool binary could not be found on disk
    #[error("Tool not found: {0}")]
    ToolNotFound(PathBuf),

    /// The tool could not be launched at all
    #[error("Failed to launch `{tool}`: {source}")]
    SpawnFailed {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but exited unsuccessfully
    #[error("`{tool}` exited with {}", .code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
    },

    /// One or more invocations in a batch failed
    #[error("{failed} of {total} tool invocations failed")]
    BatchFailed {
        failed: usize,
        total: usize,
    },

    // ==================== Configuration Errors ====================

    /// The pipeline manifest could not be read or parsed
    #[error("Invalid manifest: {message}")]
    InvalidManifest {
        message: String,
    },

    /// A required manifest entry is missing
    #[error("Missing manifest entry: {key}")]
    MissingConfig {
        key: String,
    },

    // ==================== General Errors ====================

    /// Internal error (should not happen)
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },

    /// Custom error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

/// Result type using the unified Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Create an invalid manifest error
    pub fn invalid_manifest(message: impl Into<String>) -> Self {
        Error::InvalidManifest {
            message: message.into(),
        }
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::InputNotFound(_) | Error::ToolNotFound(_)
        )
    }

    /// Check if this error came from an external tool
    pub fn is_tool_error(&self) -> bool {
        matches!(
            self,
            Error::ToolNotFound(_)
                | Error::SpawnFailed { .. }
                | Error::ToolFailed { .. }
                | Error::BatchFailed { .. }
        )
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
