//! Backend over the host filesystem.

use std::fs::{self, File, Metadata, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
#[cfg(not(unix))]
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};
use crate::fs::{
    bind, check_origin, AttributeKind, Attributes, FileAttributes, FileSystem,
};
use crate::path::Path;

/// The host filesystem, accessed through `std::fs`.
///
/// Attributes never follow symbolic links. Temporary entries are created
/// with `tempfile` under a configurable root, `std::env::temp_dir()` by
/// default.
///
/// # Examples
///
/// ```no_run
/// use pathfs::fs::{FileSystem, OsFileSystem};
///
/// let fs = OsFileSystem::new();
/// let dir = fs.create_temporary_directory("demo-").unwrap();
/// let file = dir.join("hello.txt").unwrap();
/// fs.write_bytes(&file, b"hello").unwrap();
/// assert!(fs.exists(&file));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OsFileSystem {
    temp_root: Option<PathBuf>,
}

impl OsFileSystem {
    /// Backend name stamped on the paths it produces.
    pub const NAME: &'static str = "os";

    /// Creates a backend using the system temporary directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend whose temporary entries live under `root`.
    #[must_use]
    pub fn with_temp_root(root: impl Into<PathBuf>) -> Self {
        Self {
            temp_root: Some(root.into()),
        }
    }

    /// The directory temporary directories are created in.
    #[must_use]
    pub fn temp_root(&self) -> PathBuf {
        self.temp_root.clone().unwrap_or_else(std::env::temp_dir)
    }

    fn metadata(operation: &'static str, path: &Path) -> Result<Metadata> {
        fs::symlink_metadata(native(path)).map_err(|e| Error::io(operation, path, e))
    }

    fn ensure_absent(operation: &'static str, path: &Path) -> Result<()> {
        match fs::symlink_metadata(native(path)) {
            Ok(_) => Err(Error::io_kind(
                operation,
                path,
                io::ErrorKind::AlreadyExists,
                "target already exists",
            )),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(operation, path, e)),
        }
    }

    fn to_path(&self, created: &std::path::Path) -> Result<Path> {
        let raw = created.to_str().ok_or_else(|| Error::InvalidPath {
            path: created.display().to_string(),
            reason: "path is not valid UTF-8".to_string(),
        })?;
        self.path(raw, &[])
    }
}

/// The empty path names the working directory.
fn native(path: &Path) -> &std::path::Path {
    if path.is_empty() {
        std::path::Path::new(".")
    } else {
        path.as_std_path()
    }
}

#[cfg(not(unix))]
fn micros_since_epoch(time: io::Result<SystemTime>) -> i64 {
    let Ok(time) = time else {
        return 0;
    };
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_micros()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_micros()).map_or(i64::MIN, |us| -us),
    }
}

#[cfg(unix)]
fn timestamps(metadata: &Metadata) -> (i64, i64, i64) {
    use std::os::unix::fs::MetadataExt;

    let micros = |secs: i64, nanos: i64| secs.saturating_mul(1_000_000) + nanos / 1_000;
    (
        micros(metadata.ctime(), metadata.ctime_nsec()),
        micros(metadata.atime(), metadata.atime_nsec()),
        micros(metadata.mtime(), metadata.mtime_nsec()),
    )
}

#[cfg(not(unix))]
fn timestamps(metadata: &Metadata) -> (i64, i64, i64) {
    (
        micros_since_epoch(metadata.created()),
        micros_since_epoch(metadata.accessed()),
        micros_since_epoch(metadata.modified()),
    )
}

fn basic_attributes(metadata: &Metadata) -> FileAttributes {
    let file_type = metadata.file_type();
    let (created, accessed, modified) = timestamps(metadata);
    FileAttributes {
        is_directory: file_type.is_dir(),
        is_file: file_type.is_file(),
        is_symbolic_link: file_type.is_symlink(),
        creation_time_us: created,
        last_access_time_us: accessed,
        last_modified_time_us: modified,
        size_bytes: metadata.len(),
    }
}

#[cfg(unix)]
fn posix_attributes(metadata: &Metadata) -> Option<crate::fs::PosixFileAttributes> {
    use std::os::unix::fs::MetadataExt;

    Some(crate::fs::PosixFileAttributes {
        basic: basic_attributes(metadata),
        permissions: crate::fs::PermissionSet::from_mode(metadata.mode()),
    })
}

#[cfg(not(unix))]
fn posix_attributes(_metadata: &Metadata) -> Option<crate::fs::PosixFileAttributes> {
    None
}

impl FileSystem for OsFileSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn exists(&self, path: &Path) -> bool {
        check_origin(self, path).is_ok() && fs::symlink_metadata(native(path)).is_ok()
    }

    fn read_attributes(&self, path: &Path, kind: AttributeKind) -> Result<Attributes> {
        check_origin(self, path)?;
        let metadata = Self::metadata("read_attributes", path)?;
        match kind {
            AttributeKind::Basic => Ok(Attributes::Basic(basic_attributes(&metadata))),
            AttributeKind::Posix => posix_attributes(&metadata)
                .map(Attributes::Posix)
                .ok_or_else(|| Error::Unsupported {
                    backend: Self::NAME,
                    capability: kind.to_string(),
                }),
        }
    }

    fn create_file(&self, path: &Path) -> Result<()> {
        check_origin(self, path)?;
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(native(path))
            .map_err(|e| Error::io("create_file", path, e))?;
        log::debug!("created file {path}");
        Ok(())
    }

    fn create_directory(&self, path: &Path) -> Result<()> {
        check_origin(self, path)?;
        fs::create_dir(native(path)).map_err(|e| Error::io("create_directory", path, e))?;
        log::debug!("created directory {path}");
        Ok(())
    }

    fn temporary_root(&self) -> Result<Path> {
        self.to_path(&self.temp_root())
    }

    fn create_temporary_directory(&self, prefix: &str) -> Result<Path> {
        let root = self.temp_root();
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(&root)
            .map_err(|e| Error::Io {
                operation: "create_temporary_directory",
                path: root.display().to_string(),
                source: e,
            })?;
        self.to_path(&dir.keep())
    }

    fn create_temporary_file(&self, dir: &Path, prefix: &str, suffix: &str) -> Result<Path> {
        check_origin(self, dir)?;
        let file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(native(dir))
            .map_err(|e| Error::io("create_temporary_file", dir, e))?;
        let (_, kept) = file
            .keep()
            .map_err(|e| Error::io("create_temporary_file", dir, e.error))?;
        self.to_path(&kept)
    }

    fn copy(&self, source: &Path, target: &Path) -> Result<()> {
        check_origin(self, source)?;
        check_origin(self, target)?;

        let metadata = Self::metadata("copy", source)?;
        Self::ensure_absent("copy", target)?;

        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            return Err(Error::Unsupported {
                backend: Self::NAME,
                capability: "copying symbolic links".to_string(),
            });
        }
        if file_type.is_dir() {
            return self.create_directory(target);
        }

        let mut reader = BufReader::new(
            File::open(native(source)).map_err(|e| Error::io("copy", source, e))?,
        );
        let mut writer = BufWriter::new(
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(native(target))
                .map_err(|e| Error::io("copy", target, e))?,
        );
        io::copy(&mut reader, &mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::io("copy", target, e))?;
        log::debug!("copied {source} to {target}");
        Ok(())
    }

    fn move_path(&self, source: &Path, target: &Path) -> Result<()> {
        check_origin(self, source)?;
        check_origin(self, target)?;

        Self::metadata("move", source)?;
        Self::ensure_absent("move", target)?;
        fs::rename(native(source), native(target)).map_err(|e| Error::io("move", source, e))?;
        log::debug!("moved {source} to {target}");
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<bool> {
        check_origin(self, path)?;
        let metadata = match fs::symlink_metadata(native(path)) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(Error::io("delete", path, e)),
        };

        let removed = if metadata.is_dir() {
            fs::remove_dir(native(path))
        } else {
            fs::remove_file(native(path))
        };

        match removed {
            Ok(()) => {
                log::debug!("deleted {path}");
                Ok(true)
            }
            // Lost a race with another deleter.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::io("delete", path, e)),
        }
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        check_origin(self, path)?;
        let file = File::open(native(path)).map_err(|e| Error::io("open_read", path, e))?;
        let metadata = file
            .metadata()
            .map_err(|e| Error::io("open_read", path, e))?;
        if metadata.is_dir() {
            return Err(Error::io_kind(
                "open_read",
                path,
                io::ErrorKind::InvalidInput,
                "is a directory",
            ));
        }
        Ok(Box::new(BufReader::new(file)))
    }

    fn open_write(&self, path: &Path) -> Result<Box<dyn Write + Send>> {
        check_origin(self, path)?;
        let file = File::create(native(path)).map_err(|e| Error::io("open_write", path, e))?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn list(&self, dir: &Path) -> Result<Vec<Path>> {
        let dir = bind(self, dir)?;
        let entries = fs::read_dir(native(&dir)).map_err(|e| Error::io("list", &dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io("list", &dir, e))?;
            let name = entry.file_name().into_string().map_err(|raw| Error::InvalidPath {
                path: format!("{dir}/{}", raw.to_string_lossy()),
                reason: "file name is not valid UTF-8".to_string(),
            })?;
            names.push(name);
        }
        names.sort();

        names.iter().map(|name| dir.join(name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::FileSystemExt;
    use tempfile::TempDir;

    fn scratch() -> (TempDir, OsFileSystem, Path) {
        let temp = TempDir::new().unwrap();
        let fs = OsFileSystem::with_temp_root(temp.path());
        let root = fs.path(temp.path().to_str().unwrap(), &[]).unwrap();
        (temp, fs, root)
    }

    #[test]
    fn test_create_and_read_attributes() {
        let (_temp, fs, root) = scratch();
        let file = root.join("a.txt").unwrap();
        fs.create_file(&file).unwrap();
        fs.write_bytes(&file, b"12345").unwrap();

        let attributes = fs.read_basic_attributes(&file).unwrap();
        assert!(attributes.is_file);
        assert!(!attributes.is_directory);
        assert_eq!(attributes.size_bytes, 5);
        assert!(attributes.last_modified_time_us > 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_posix_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, fs, root) = scratch();
        let file = root.join("mode.txt").unwrap();
        fs.create_file(&file).unwrap();
        fs::set_permissions(file.as_std_path(), fs::Permissions::from_mode(0o640)).unwrap();

        let posix = fs.read_posix_attributes(&file).unwrap();
        assert_eq!(posix.permissions.to_octal_string(), "0640");
        assert!(posix.basic.is_file);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_not_followed_and_not_copied() {
        let (_temp, fs, root) = scratch();
        let target = root.join("target.txt").unwrap();
        let link = root.join("link").unwrap();
        fs.create_file(&target).unwrap();
        std::os::unix::fs::symlink(target.as_std_path(), link.as_std_path()).unwrap();

        let attributes = fs.read_basic_attributes(&link).unwrap();
        assert!(attributes.is_symbolic_link);
        assert!(!attributes.is_file);

        let err = fs.copy(&link, &root.join("copy").unwrap()).unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }));
    }

    #[test]
    fn test_list_is_sorted_and_bound() {
        let (_temp, fs, root) = scratch();
        for name in ["c", "a", "b"] {
            fs.create_file(&root.join(name).unwrap()).unwrap();
        }
        let unbound = Path::parse(root.as_str()).unwrap();

        let listed = fs.list(&unbound).unwrap();
        let names: Vec<_> = listed
            .iter()
            .map(|p| p.file_name().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(listed.iter().all(|p| p.origin() == fs.origin()));
    }

    #[test]
    fn test_temporary_entries() {
        let (temp, fs, root) = scratch();
        let dir = fs.create_temporary_directory("pfx-").unwrap();
        assert!(dir.file_name().unwrap().as_str().starts_with("pfx-"));
        assert!(dir.as_std_path().starts_with(temp.path()));
        assert!(fs.is_directory(&dir).unwrap());

        let file = fs.create_temporary_file(&root, "f-", ".tmp").unwrap();
        let name = file.file_name().unwrap().to_string();
        assert!(name.starts_with("f-") && name.ends_with(".tmp"));
        assert!(fs.is_regular_file(&file).unwrap());
    }

    #[test]
    fn test_open_read_rejects_directory() {
        let (_temp, fs, root) = scratch();
        assert!(fs.open_read(&root).is_err());
    }

    #[test]
    fn test_copy_and_move_refuse_existing_target() {
        let (_temp, fs, root) = scratch();
        let a = root.join("a").unwrap();
        let b = root.join("b").unwrap();
        fs.write_bytes(&a, b"data").unwrap();
        fs.create_file(&b).unwrap();

        assert!(fs.copy(&a, &b).unwrap_err().is_already_exists());
        assert!(fs.move_path(&a, &b).unwrap_err().is_already_exists());

        let c = root.join("c").unwrap();
        fs.move_path(&a, &c).unwrap();
        assert!(!fs.exists(&a));
        assert_eq!(fs.read_bytes(&c).unwrap(), b"data");
    }

    #[cfg(not(unix))]
    #[test]
    fn test_micros_since_epoch() {
        assert_eq!(micros_since_epoch(Ok(UNIX_EPOCH)), 0);
        let later = UNIX_EPOCH + std::time::Duration::from_micros(1_500);
        assert_eq!(micros_since_epoch(Ok(later)), 1_500);
        assert_eq!(micros_since_epoch(Err(io::Error::other("unsupported"))), 0);
    }
}
