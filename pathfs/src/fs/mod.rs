//! Filesystem capability contract.
//!
//! [`FileSystem`] is the minimal set of storage operations a backend provides
//! for the paths it produces. Two backends ship with the crate:
//! [`OsFileSystem`], backed by the host filesystem, and [`MemoryFileSystem`],
//! an in-process tree.
//!
//! One backend is installed process-wide as the default. It is used by
//! [`crate::path()`] and can be replaced exactly once, before first use, with
//! [`install_default`].
//!
//! # Examples
//!
//! ```
//! use pathfs::fs::{FileSystem, MemoryFileSystem};
//!
//! let fs = MemoryFileSystem::new();
//! let dir = fs.path("/work", &["reports"]).unwrap();
//! fs.create_directory(&fs.path("/work", &[]).unwrap()).unwrap();
//! fs.create_directory(&dir).unwrap();
//!
//! let file = dir.join("summary.txt").unwrap();
//! fs.write_bytes(&file, b"total: 3").unwrap();
//! assert_eq!(fs.list(&dir).unwrap(), vec![file]);
//! ```

mod attributes;
mod ext;
mod memory;
mod os;

use std::fmt;
use std::io::{Read, Write};
use std::sync::{Arc, OnceLock};

use crate::error::{Error, Result};
use crate::path::{Origin, Path};

pub use attributes::{
    AttributeKind, Attributes, FileAttributes, PermissionSet, PosixFileAttributes,
    PosixPermission,
};
pub use ext::FileSystemExt;
pub use memory::MemoryFileSystem;
pub use os::OsFileSystem;

/// Storage operations over the paths a backend produces.
///
/// Paths handed to a backend must be unbound or bound to that backend;
/// anything else fails with [`Error::IncompatiblePaths`]. Backends never
/// retry and never create missing parents implicitly.
pub trait FileSystem: Send + Sync + fmt::Debug {
    /// Static name of the backend (`"os"`, `"memory"`).
    fn name(&self) -> &'static str;

    /// The origin stamped on paths this backend produces.
    fn origin(&self) -> Origin {
        Origin::Backend(self.name())
    }

    /// Build a path from segments and bind it to this backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if a segment contains a NUL character.
    fn path(&self, first: &str, more: &[&str]) -> Result<Path> {
        Ok(Path::from_segments(first, more)?.with_origin(self.origin()))
    }

    /// Returns `true` if something exists at `path`. Never fails; a foreign
    /// path does not exist here.
    fn exists(&self, path: &Path) -> bool;

    /// Read attributes of the requested shape without following links.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when this backend cannot produce `kind`,
    /// and a not-found [`Error::Io`] when nothing exists at `path`.
    fn read_attributes(&self, path: &Path, kind: AttributeKind) -> Result<Attributes>;

    /// Read basic attributes.
    ///
    /// # Errors
    ///
    /// See [`read_attributes`](Self::read_attributes).
    fn read_basic_attributes(&self, path: &Path) -> Result<FileAttributes> {
        Ok(self.read_attributes(path, AttributeKind::Basic)?.into_basic())
    }

    /// Read POSIX attributes.
    ///
    /// # Errors
    ///
    /// See [`read_attributes`](Self::read_attributes).
    fn read_posix_attributes(&self, path: &Path) -> Result<PosixFileAttributes> {
        self.read_attributes(path, AttributeKind::Posix)?
            .into_posix()
            .ok_or_else(|| Error::Unsupported {
                backend: self.name(),
                capability: AttributeKind::Posix.to_string(),
            })
    }

    /// Read basic attributes, or `None` when nothing exists at `path`.
    ///
    /// # Errors
    ///
    /// Fails for every error other than not-found.
    fn try_read_attributes(&self, path: &Path) -> Result<Option<FileAttributes>> {
        match self.read_basic_attributes(path) {
            Ok(attributes) => Ok(Some(attributes)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Create an empty regular file.
    ///
    /// # Errors
    ///
    /// Fails if the target exists or its parent directory does not.
    fn create_file(&self, path: &Path) -> Result<()>;

    /// Create a directory.
    ///
    /// # Errors
    ///
    /// Fails if the target exists or its parent directory does not.
    fn create_directory(&self, path: &Path) -> Result<()>;

    /// The directory temporary entries are created in.
    ///
    /// # Errors
    ///
    /// Fails if the root cannot be expressed as a path of this backend.
    fn temporary_root(&self) -> Result<Path>;

    /// Create a fresh directory under this backend's temporary root.
    ///
    /// # Errors
    ///
    /// Fails if the temporary root is unusable.
    fn create_temporary_directory(&self, prefix: &str) -> Result<Path>;

    /// Create a fresh, empty file inside `dir`.
    ///
    /// # Errors
    ///
    /// Fails if `dir` is not an existing directory.
    fn create_temporary_file(&self, dir: &Path, prefix: &str, suffix: &str) -> Result<Path>;

    /// Shallow copy: a directory is recreated empty, a file's bytes are
    /// copied. Not atomic; attributes are not preserved.
    ///
    /// # Errors
    ///
    /// Fails if `source` is absent, `target` exists, or `source` is a
    /// symbolic link.
    fn copy(&self, source: &Path, target: &Path) -> Result<()>;

    /// Move `source` to `target`, atomically where the backend allows it.
    ///
    /// # Errors
    ///
    /// Fails if `source` is absent or `target` exists.
    fn move_path(&self, source: &Path, target: &Path) -> Result<()>;

    /// Delete a file or an empty directory.
    ///
    /// Returns `Ok(false)` if nothing existed at `path`.
    ///
    /// # Errors
    ///
    /// Fails for a non-empty directory or on a storage failure.
    fn delete(&self, path: &Path) -> Result<bool>;

    /// Open a file for reading.
    ///
    /// # Errors
    ///
    /// Fails if `path` is absent or not a regular file.
    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>>;

    /// Open a file for writing, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Fails if the parent directory is missing or `path` is a directory.
    fn open_write(&self, path: &Path) -> Result<Box<dyn Write + Send>>;

    /// The immediate children of a directory, each built as `dir + name`.
    ///
    /// # Errors
    ///
    /// Fails if `dir` is absent or not a directory.
    fn list(&self, dir: &Path) -> Result<Vec<Path>>;

    /// Visit every entry below `dir`, parents before children.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that cannot be listed or whose attributes
    /// cannot be read.
    fn walk_directory(&self, dir: &Path, visitor: &mut dyn FnMut(&Path)) -> Result<()> {
        for child in self.list(dir)? {
            visitor(&child);
            if self.read_basic_attributes(&child)?.is_directory {
                self.walk_directory(&child, visitor)?;
            }
        }
        Ok(())
    }

    /// Read a whole file.
    ///
    /// # Errors
    ///
    /// See [`open_read`](Self::open_read).
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let mut reader = self.open_read(path)?;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| Error::io("read", path, e))?;
        Ok(bytes)
    }

    /// Replace a file's contents.
    ///
    /// # Errors
    ///
    /// See [`open_write`](Self::open_write).
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let mut writer = self.open_write(path)?;
        writer
            .write_all(bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| Error::io("write", path, e))
    }
}

static DEFAULT: OnceLock<Arc<dyn FileSystem>> = OnceLock::new();

/// Install the process-wide default filesystem.
///
/// # Errors
///
/// Returns [`Error::DefaultAlreadyInstalled`] if a default was installed
/// before, or was already used and therefore lazily set to [`OsFileSystem`].
pub fn install_default(fs: Arc<dyn FileSystem>) -> Result<()> {
    let mut candidate = Some(fs);
    let installed = DEFAULT.get_or_init(|| {
        // `candidate` is only taken by the closure that wins initialization.
        candidate
            .take()
            .unwrap_or_else(|| Arc::new(OsFileSystem::new()))
    });

    if candidate.is_some() {
        return Err(Error::DefaultAlreadyInstalled {
            installed: installed.name(),
        });
    }

    log::debug!("installed {} as the default filesystem", installed.name());
    Ok(())
}

/// The process-wide default filesystem, [`OsFileSystem`] unless another one
/// was installed first.
#[must_use]
pub fn default_file_system() -> Arc<dyn FileSystem> {
    Arc::clone(DEFAULT.get_or_init(|| Arc::new(OsFileSystem::new())))
}

/// Reject `path` unless `fs` may operate on it.
pub(crate) fn check_origin(fs: &(impl FileSystem + ?Sized), path: &Path) -> Result<()> {
    fs.origin().check(path.origin())
}

/// Bind `path` to `fs`, failing if it belongs to another backend.
pub(crate) fn bind(fs: &(impl FileSystem + ?Sized), path: &Path) -> Result<Path> {
    check_origin(fs, path)?;
    Ok(path.clone().with_origin(fs.origin()))
}
