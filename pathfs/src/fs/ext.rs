//! Convenience operations composed from the core [`FileSystem`] contract.

use std::io;

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::path::Path;

/// Operations every backend gets for free.
///
/// Implemented for all [`FileSystem`]s, including `dyn FileSystem`.
pub trait FileSystemExt: FileSystem {
    /// Returns `true` if `path` is a directory, `false` if it is anything
    /// else or absent.
    ///
    /// # Errors
    ///
    /// Fails on storage errors other than not-found.
    fn is_directory(&self, path: &Path) -> Result<bool> {
        Ok(self
            .try_read_attributes(path)?
            .is_some_and(|attributes| attributes.is_directory))
    }

    /// Returns `true` if `path` is a regular file, `false` if it is anything
    /// else or absent.
    ///
    /// # Errors
    ///
    /// Fails on storage errors other than not-found.
    fn is_regular_file(&self, path: &Path) -> Result<bool> {
        Ok(self
            .try_read_attributes(path)?
            .is_some_and(|attributes| attributes.is_file))
    }

    /// Delete `path`, failing with not-found if nothing was there.
    ///
    /// # Errors
    ///
    /// See [`FileSystem::delete`]; additionally fails when `path` is absent.
    fn delete_existing(&self, path: &Path) -> Result<()> {
        if self.delete(path)? {
            Ok(())
        } else {
            Err(Error::io_kind(
                "delete",
                path,
                io::ErrorKind::NotFound,
                "no such file or directory",
            ))
        }
    }

    /// Delete `path` and, if it is a directory, everything below it.
    ///
    /// Children are removed depth-first. Not atomic: a failure leaves the
    /// entries deleted so far removed. Returns `Ok(false)` if `path` was
    /// absent.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that cannot be listed or deleted.
    fn delete_recursively(&self, path: &Path) -> Result<bool> {
        let Some(attributes) = self.try_read_attributes(path)? else {
            return Ok(false);
        };

        if attributes.is_directory {
            for child in self.list(path)? {
                self.delete_recursively(&child)?;
            }
        }

        self.delete(path)
    }

    /// Size of a file, or the recursive sum of file sizes below a directory.
    ///
    /// Entries whose attributes cannot be read contribute nothing.
    ///
    /// # Errors
    ///
    /// Fails only if `path` itself cannot be read.
    fn total_size(&self, path: &Path) -> Result<u64> {
        let attributes = self.read_basic_attributes(path)?;
        if !attributes.is_directory {
            return Ok(attributes.size_bytes);
        }

        let mut unreadable = 0usize;
        let total = sum_directory(self, path, &mut unreadable)?;
        if unreadable > 0 {
            log::debug!("{unreadable} entries below {path} could not be read");
        }
        Ok(total)
    }
}

/// Sum of file sizes below `dir`. Children that cannot be read or listed
/// are counted in `unreadable` and skipped.
fn sum_directory<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    unreadable: &mut usize,
) -> Result<u64> {
    let mut total = 0u64;
    for child in fs.list(dir)? {
        let size = match fs.read_basic_attributes(&child) {
            Ok(attributes) if attributes.is_directory => {
                sum_directory(fs, &child, unreadable)
            }
            Ok(attributes) => Ok(attributes.size_bytes),
            Err(err) => Err(err),
        };
        match size {
            Ok(size) => total = total.saturating_add(size),
            Err(err) => {
                *unreadable += 1;
                log::debug!("skipping {child} while summing sizes: {err}");
            }
        }
    }
    Ok(total)
}

impl<T: FileSystem + ?Sized> FileSystemExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{AttributeKind, Attributes, MemoryFileSystem};
    use std::io::{Read, Write};
    use std::sync::Arc;

    fn populated() -> (MemoryFileSystem, Path) {
        let fs = MemoryFileSystem::new();
        let root = fs.path("/data", &[]).unwrap();
        fs.create_directory(&root).unwrap();
        fs.create_directory(&root.join("nested").unwrap()).unwrap();
        fs.write_bytes(&root.join("a.bin").unwrap(), &[0; 10]).unwrap();
        fs.write_bytes(&root.join("nested/b.bin").unwrap(), &[0; 32])
            .unwrap();
        (fs, root)
    }

    #[test]
    fn test_is_directory_and_is_regular_file() {
        let (fs, root) = populated();
        let file = root.join("a.bin").unwrap();
        let missing = root.join("missing").unwrap();

        assert!(fs.is_directory(&root).unwrap());
        assert!(!fs.is_regular_file(&root).unwrap());
        assert!(fs.is_regular_file(&file).unwrap());
        assert!(!fs.is_directory(&file).unwrap());
        assert!(!fs.is_directory(&missing).unwrap());
        assert!(!fs.is_regular_file(&missing).unwrap());
    }

    #[test]
    fn test_delete_existing_reports_missing() {
        let (fs, root) = populated();
        let file = root.join("a.bin").unwrap();

        fs.delete_existing(&file).unwrap();
        let err = fs.delete_existing(&file).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_recursively() {
        let (fs, root) = populated();
        assert!(fs.delete_recursively(&root).unwrap());
        assert!(!fs.exists(&root));
        assert!(!fs.delete_recursively(&root).unwrap());
    }

    #[test]
    fn test_total_size() {
        let (fs, root) = populated();
        assert_eq!(fs.total_size(&root).unwrap(), 42);
        assert_eq!(fs.total_size(&root.join("nested").unwrap()).unwrap(), 32);
        assert_eq!(fs.total_size(&root.join("a.bin").unwrap()).unwrap(), 10);
        assert!(fs.total_size(&root.join("missing").unwrap()).is_err());
    }

    /// Memory backend that refuses attribute reads for one path.
    #[derive(Debug)]
    struct Unreadable {
        inner: MemoryFileSystem,
        hidden: Path,
    }

    impl FileSystem for Unreadable {
        fn name(&self) -> &'static str {
            self.inner.name()
        }
        fn exists(&self, path: &Path) -> bool {
            self.inner.exists(path)
        }
        fn read_attributes(&self, path: &Path, kind: AttributeKind) -> Result<Attributes> {
            if *path == self.hidden {
                return Err(Error::io_kind(
                    "read_attributes",
                    path,
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            self.inner.read_attributes(path, kind)
        }
        fn create_file(&self, path: &Path) -> Result<()> {
            self.inner.create_file(path)
        }
        fn create_directory(&self, path: &Path) -> Result<()> {
            self.inner.create_directory(path)
        }
        fn temporary_root(&self) -> Result<Path> {
            self.inner.temporary_root()
        }
        fn create_temporary_directory(&self, prefix: &str) -> Result<Path> {
            self.inner.create_temporary_directory(prefix)
        }
        fn create_temporary_file(&self, dir: &Path, prefix: &str, suffix: &str) -> Result<Path> {
            self.inner.create_temporary_file(dir, prefix, suffix)
        }
        fn copy(&self, source: &Path, target: &Path) -> Result<()> {
            self.inner.copy(source, target)
        }
        fn move_path(&self, source: &Path, target: &Path) -> Result<()> {
            self.inner.move_path(source, target)
        }
        fn delete(&self, path: &Path) -> Result<bool> {
            self.inner.delete(path)
        }
        fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
            self.inner.open_read(path)
        }
        fn open_write(&self, path: &Path) -> Result<Box<dyn Write + Send>> {
            self.inner.open_write(path)
        }
        fn list(&self, dir: &Path) -> Result<Vec<Path>> {
            self.inner.list(dir)
        }
    }

    #[test]
    fn test_total_size_skips_unreadable_entries() {
        let (inner, root) = populated();
        inner.write_bytes(&root.join("bad").unwrap(), &[0; 99]).unwrap();
        let fs = Unreadable {
            hidden: root.join("bad").unwrap(),
            inner,
        };

        assert_eq!(fs.total_size(&root).unwrap(), 42);
        assert!(fs.total_size(&root.join("bad").unwrap()).is_err());
    }

    #[test]
    fn test_total_size_skips_unreadable_directory() {
        let (inner, root) = populated();
        let fs = Unreadable {
            hidden: root.join("nested").unwrap(),
            inner,
        };

        assert_eq!(fs.total_size(&root).unwrap(), 10);
    }

    #[test]
    fn test_ext_on_trait_object() {
        let (fs, root) = populated();
        let dynamic: Arc<dyn FileSystem> = Arc::new(fs);
        assert!(dynamic.is_directory(&root).unwrap());
        assert_eq!(dynamic.total_size(&root).unwrap(), 42);
    }
}
