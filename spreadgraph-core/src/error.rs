//! Typed error handling for spreadgraph.
//!
//! Every failure the core can report is a variant of [`SpreadGraphError`].
//! Validation failures carry a human-readable reason so callers can tell
//! "no graph" apart from "bad start node" apart from "non-textual node".

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for spreadgraph operations.
#[derive(Error, Debug)]
pub enum SpreadGraphError {
    /// Graph missing, empty, or carrying non-textual identifiers
    #[error("Invalid graph: {reason}")]
    StructuralInvalid { reason: String },

    /// Start node missing, non-textual, or not a member of the graph
    #[error("Invalid start node '{node}': {reason}")]
    StartNodeInvalid { node: String, reason: String },

    /// Construction called with nothing to build from
    #[error("Empty input: no entities and no connections were supplied")]
    EmptyInput,

    /// Invalid argument provided to a collaborator (e.g. edge probability)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// I/O error when reading a network or config file
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },
}

/// Coarse classification of a [`SpreadGraphError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    StructuralInvalid,
    StartNodeInvalid,
    EmptyInput,
    InvalidArgument,
    Io,
    Config,
}

impl SpreadGraphError {
    /// Create a structural validation error.
    pub fn structural(reason: impl Into<String>) -> Self {
        Self::StructuralInvalid {
            reason: reason.into(),
        }
    }

    /// Create a start node validation error.
    pub fn start_node(node: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StartNodeInvalid {
            node: node.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StructuralInvalid { .. } => ErrorKind::StructuralInvalid,
            Self::StartNodeInvalid { .. } => ErrorKind::StartNodeInvalid,
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Io { .. } => ErrorKind::Io,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Check if this error came out of graph/start validation.
    ///
    /// Validation failures are reported outcomes: the graph stays usable for
    /// inspection and re-validation.
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            Self::StructuralInvalid { .. } | Self::StartNodeInvalid { .. } | Self::EmptyInput
        )
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for spreadgraph results.
pub type SpreadGraphResult<T> = Result<T, SpreadGraphError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> SpreadGraphResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> SpreadGraphResult<T> {
        self.map_err(|e| SpreadGraphError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_node_error_message() {
        let err = SpreadGraphError::start_node("Zed", "not a member of the graph");
        assert_eq!(err.kind(), ErrorKind::StartNodeInvalid);
        assert!(err.to_string().contains("Zed"));
        assert!(err.to_string().contains("not a member"));
    }

    #[test]
    fn test_validation_failures_are_distinguishable() {
        let structural = SpreadGraphError::structural("graph has no entities");
        let start = SpreadGraphError::start_node("", "start node is not textual");

        assert!(structural.is_validation_failure());
        assert!(start.is_validation_failure());
        assert!(SpreadGraphError::EmptyInput.is_validation_failure());
        assert_ne!(structural.kind(), start.kind());
        assert!(!SpreadGraphError::invalid_argument("p > 1").is_validation_failure());
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let err = result.with_path("/missing/spreadgraph.toml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.path(), Some(&PathBuf::from("/missing/spreadgraph.toml")));
    }

    #[test]
    fn test_config_error_has_path() {
        let err = SpreadGraphError::config("spreadgraph.toml", "expected a table");
        assert!(err.to_string().contains("spreadgraph.toml"));
        assert!(err.path().is_some());
    }
}
