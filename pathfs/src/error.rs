//! Error types for the pathfs library.
//!
//! Every failure is classified into one of a small number of kinds (see
//! [`ErrorKind`]). The lexical path model only ever produces
//! [`ErrorKind::InvalidArgument`]; storage failures reported by a backend are
//! carried by the single [`Error::Io`] variant.

use std::io;

use thiserror::Error;

use crate::path::{Origin, Path};

/// Result type alias for operations that may fail with a pathfs error.
///
/// # Examples
///
/// ```
/// use pathfs::{Path, Result};
///
/// fn parse_config_path() -> Result<Path> {
///     Path::parse("/etc/pathfs.yaml")
/// }
/// assert!(parse_config_path().is_ok());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathfs library.
#[derive(Debug, Error)]
pub enum Error {
    /// A raw path string could not be turned into a path.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath {
        /// The rejected input.
        path: String,
        /// The reason the input was rejected.
        reason: String,
    },

    /// A name index outside `[0, count)` was requested.
    #[error("illegal name index {index}, path has {count} name(s)")]
    NameIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of names in the path.
        count: usize,
    },

    /// Two paths bound to different filesystems were combined, or a path was
    /// handed to a filesystem that did not produce it.
    #[error("cannot mix paths of different filesystems: {expected} and {found}")]
    IncompatiblePaths {
        /// The origin the operation required.
        expected: Origin,
        /// The origin of the offending path.
        found: Origin,
    },

    /// The process-wide default filesystem was already installed.
    #[error("default filesystem is already installed ({installed})")]
    DefaultAlreadyInstalled {
        /// Name of the backend that is installed.
        installed: &'static str,
    },

    /// A backend reported a storage failure.
    #[error("{operation} failed for '{path}': {source}")]
    Io {
        /// The operation that failed (`create_file`, `list`, ...).
        operation: &'static str,
        /// The path the operation was applied to.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The backend cannot provide the requested capability.
    #[error("{capability} is not supported by the {backend} filesystem")]
    Unsupported {
        /// Name of the backend.
        backend: &'static str,
        /// The capability that was requested.
        capability: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A local programming error: bad index, malformed input, mixed backends.
    InvalidArgument,
    /// A storage operation failed.
    Io,
    /// The active backend does not implement the request.
    Unsupported,
    /// Configuration could not be loaded or is invalid.
    Configuration,
}

impl Error {
    /// Builds an [`Error::Io`] for `operation` applied to `path`.
    pub(crate) fn io(operation: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.as_str().to_string(),
            source,
        }
    }

    /// Builds an [`Error::Io`] from an error kind and a message.
    pub(crate) fn io_kind(
        operation: &'static str,
        path: &Path,
        kind: io::ErrorKind,
        message: &str,
    ) -> Self {
        Self::io(operation, path, io::Error::new(kind, message.to_string()))
    }

    /// Returns the kind this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfs::{ErrorKind, Path};
    ///
    /// let err = Path::parse("/").unwrap().name(0).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPath { .. }
            | Self::NameIndexOutOfRange { .. }
            | Self::IncompatiblePaths { .. }
            | Self::DefaultAlreadyInstalled { .. } => ErrorKind::InvalidArgument,
            Self::Io { .. } => ErrorKind::Io,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::Configuration(_) | Self::Validation { .. } => ErrorKind::Configuration,
        }
    }

    /// Check if error indicates the target does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.io_kind_is(io::ErrorKind::NotFound)
    }

    /// Check if error indicates the target already exists.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        self.io_kind_is(io::ErrorKind::AlreadyExists)
    }

    /// Check if error is permission-related.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        self.io_kind_is(io::ErrorKind::PermissionDenied)
    }

    fn io_kind_is(&self, kind: io::ErrorKind) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == kind)
    }
}
