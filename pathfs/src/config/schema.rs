//! Configuration schema definitions.
//!
//! This module defines the configuration structure for pathfs: which backend
//! to use, where temporary entries go, and how the CLI renders its output.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fs::{FileSystem, MemoryFileSystem, OsFileSystem};

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; unset fields fall
/// back to the built-in defaults.
///
/// # Examples
///
/// ```
/// use pathfs::config::{BackendKind, Config};
/// use pathfs::FileSystem;
///
/// let config = Config {
///     backend: Some(BackendKind::Memory),
///     ..Default::default()
/// };
/// assert_eq!(config.backend_kind(), BackendKind::Memory);
/// assert_eq!(config.file_system().unwrap().name(), "memory");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backend used as the default filesystem.
    pub backend: Option<BackendKind>,

    /// Root for temporary directories. Must be absolute.
    pub temp_dir: Option<PathBuf>,

    /// Output format for CLI listings.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// The configured backend, `os` when unset.
    #[must_use]
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.unwrap_or_default()
    }

    /// The configured output format, `table` when unset.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// Build the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `temp_dir` cannot be used as a
    /// temporary root by the memory backend.
    pub fn file_system(&self) -> Result<Arc<dyn FileSystem>> {
        let fs: Arc<dyn FileSystem> = match (self.backend_kind(), &self.temp_dir) {
            (BackendKind::Os, None) => Arc::new(OsFileSystem::new()),
            (BackendKind::Os, Some(root)) => Arc::new(OsFileSystem::with_temp_root(root)),
            (BackendKind::Memory, None) => Arc::new(MemoryFileSystem::new()),
            (BackendKind::Memory, Some(root)) => {
                let root = root.to_str().ok_or_else(|| Error::Validation {
                    field: "temp_dir".into(),
                    message: "must be valid UTF-8".into(),
                })?;
                Arc::new(MemoryFileSystem::with_temp_root(root)?)
            }
        };
        Ok(fs)
    }
}

/// Selectable filesystem backends.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The host filesystem.
    #[default]
    Os,
    /// An in-process tree, discarded on exit.
    Memory,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Os => write!(f, "os"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "os" => Ok(Self::Os),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("unknown backend: {s} (expected os or memory)")),
        }
    }
}

/// Output format for listing commands.
///
/// # Examples
///
/// ```
/// use pathfs::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("unknown output format: {s} (expected table, json or csv)")),
        }
    }
}
