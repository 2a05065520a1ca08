#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathfs
//!
//! A lexical path model and a pluggable filesystem contract.
//!
//! [`Path`] is an immutable, slash-delimited location that is normalized on
//! construction and never touches storage. [`FileSystem`] is the set of
//! operations a backend provides for the paths it produces; the host
//! filesystem ([`OsFileSystem`]) and an in-memory tree ([`MemoryFileSystem`])
//! ship with the crate.
//!
//! ## Core Types
//!
//! - [`Path`] and [`Origin`]: Lexical paths and the backend they belong to
//! - [`FileSystem`] and [`FileSystemExt`]: The backend contract
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Config`] and [`ConfigBuilder`]: Backend selection
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pathfs::{FileSystem, MemoryFileSystem, Path};
//!
//! let path = Path::parse("/srv//www/").unwrap();
//! assert_eq!(path.as_str(), "/srv/www");
//! assert_eq!(path.file_name().unwrap().as_str(), "www");
//!
//! let fs = MemoryFileSystem::new();
//! let file = fs.path("/tmp", &["index.html"]).unwrap();
//! fs.write_bytes(&file, b"<html/>").unwrap();
//! assert_eq!(fs.read_basic_attributes(&file).unwrap().size_bytes, 7);
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod path;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use fs::{
    default_file_system, install_default, AttributeKind, Attributes, FileAttributes, FileSystem,
    FileSystemExt, MemoryFileSystem, OsFileSystem, PermissionSet, PosixFileAttributes,
    PosixPermission,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{Origin, Path};

/// Build a path with the default filesystem.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if a segment contains a NUL character.
///
/// # Examples
///
/// ```
/// let path = pathfs::path("/var", &["log", "", "syslog"]).unwrap();
/// assert_eq!(path.as_str(), "/var/log/syslog");
/// ```
pub fn path(first: &str, more: &[&str]) -> Result<Path> {
    default_file_system().path(first, more)
}
