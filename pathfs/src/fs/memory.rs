//! In-process backend.
//!
//! Every entry lives in one map keyed by its absolute, fully resolved path.
//! Relative paths are interpreted against `/`, and `.`/`..` are resolved when
//! computing keys, with `..` at the root staying at the root. The paths handed
//! back to callers are never rewritten: `list` returns `dir + name` for the
//! `dir` it was given.

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};
use crate::fs::{
    bind, check_origin, AttributeKind, Attributes, FileAttributes, FileSystem, PermissionSet,
    PosixFileAttributes,
};
use crate::path::normalize::SEPARATOR;
use crate::path::Path;

const ROOT: &str = "/";
const DEFAULT_TEMP_ROOT: &str = "/tmp";
const FILE_MODE: u32 = 0o644;
const DIRECTORY_MODE: u32 = 0o755;

/// A filesystem held entirely in memory.
///
/// Clones share the same tree. It starts out with `/` and the temporary root
/// (`/tmp` unless configured otherwise).
///
/// # Examples
///
/// ```
/// use pathfs::fs::{FileSystem, MemoryFileSystem};
///
/// let fs = MemoryFileSystem::new();
/// let file = fs.path("/tmp", &["notes.txt"]).unwrap();
/// fs.write_bytes(&file, b"remember").unwrap();
///
/// let shared = fs.clone();
/// assert_eq!(shared.read_bytes(&file).unwrap(), b"remember");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    inner: Arc<RwLock<Tree>>,
    temp_root: String,
}

#[derive(Debug, Default)]
struct Tree {
    nodes: BTreeMap<String, Node>,
    next_temp: u64,
}

#[derive(Debug, Clone)]
struct Node {
    content: Content,
    mode: u32,
    created_us: i64,
    accessed_us: i64,
    modified_us: i64,
}

#[derive(Debug, Clone)]
enum Content {
    Directory,
    File(Vec<u8>),
}

impl Node {
    fn directory() -> Self {
        Self::new(Content::Directory, DIRECTORY_MODE)
    }

    fn file(bytes: Vec<u8>) -> Self {
        Self::new(Content::File(bytes), FILE_MODE)
    }

    fn new(content: Content, mode: u32) -> Self {
        let now = now_us();
        Self {
            content,
            mode,
            created_us: now,
            accessed_us: now,
            modified_us: now,
        }
    }

    fn is_directory(&self) -> bool {
        matches!(self.content, Content::Directory)
    }

    fn basic(&self) -> FileAttributes {
        let size_bytes = match &self.content {
            Content::Directory => 0,
            Content::File(bytes) => bytes.len() as u64,
        };
        FileAttributes {
            is_directory: self.is_directory(),
            is_file: !self.is_directory(),
            is_symbolic_link: false,
            creation_time_us: self.created_us,
            last_access_time_us: self.accessed_us,
            last_modified_time_us: self.modified_us,
            size_bytes,
        }
    }
}

fn now_us() -> i64 {
    chrono::Utc::now().timestamp_micros()
}

/// Storage key of `path`: absolute, `.` and `..` resolved.
fn key(path: &Path) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.as_str().split(SEPARATOR) {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            name => parts.push(name),
        }
    }
    format!("{SEPARATOR}{}", parts.join("/"))
}

fn parent_key(key: &str) -> Option<&str> {
    if key == ROOT {
        return None;
    }
    match key.rfind(SEPARATOR) {
        Some(0) => Some(ROOT),
        Some(index) => Some(&key[..index]),
        None => None,
    }
}

fn child_prefix(key: &str) -> String {
    if key == ROOT {
        ROOT.to_string()
    } else {
        format!("{key}{SEPARATOR}")
    }
}

fn not_found(operation: &'static str, path: &Path) -> Error {
    Error::io_kind(
        operation,
        path,
        io::ErrorKind::NotFound,
        "no such file or directory",
    )
}

fn already_exists(operation: &'static str, path: &Path) -> Error {
    Error::io_kind(
        operation,
        path,
        io::ErrorKind::AlreadyExists,
        "target already exists",
    )
}

fn invalid(operation: &'static str, path: &Path, message: &str) -> Error {
    Error::io_kind(operation, path, io::ErrorKind::InvalidInput, message)
}

impl Tree {
    fn with_directories(keys: &[&str]) -> Self {
        let mut tree = Self::default();
        tree.nodes.insert(ROOT.to_string(), Node::directory());
        for key in keys {
            let mut current = String::new();
            for part in key.split(SEPARATOR).filter(|p| !p.is_empty()) {
                current.push(SEPARATOR);
                current.push_str(part);
                tree.nodes
                    .entry(current.clone())
                    .or_insert_with(Node::directory);
            }
        }
        tree
    }

    fn has_children(&self, key: &str) -> bool {
        let prefix = child_prefix(key);
        self.nodes
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .any(|(k, _)| k.len() > prefix.len())
    }

    fn child_names(&self, key: &str) -> Vec<String> {
        let prefix = child_prefix(key);
        self.nodes
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(k, _)| &k[prefix.len()..])
            .filter(|rest| !rest.is_empty() && !rest.contains(SEPARATOR))
            .map(str::to_string)
            .collect()
    }

    /// Fails unless the parent of `key` is an existing directory.
    fn require_parent(&self, operation: &'static str, path: &Path, key: &str) -> Result<()> {
        let Some(parent) = parent_key(key) else {
            return Err(already_exists(operation, path));
        };
        match self.nodes.get(parent) {
            Some(node) if node.is_directory() => Ok(()),
            Some(_) => Err(invalid(operation, path, "parent is not a directory")),
            None => Err(not_found(operation, path)),
        }
    }

    fn insert_new(&mut self, operation: &'static str, path: &Path, node: Node) -> Result<String> {
        let key = key(path);
        if self.nodes.contains_key(&key) {
            return Err(already_exists(operation, path));
        }
        self.require_parent(operation, path, &key)?;
        self.nodes.insert(key.clone(), node);
        Ok(key)
    }

    fn unique_name(&mut self, parent: &str, prefix: &str, suffix: &str) -> String {
        let prefix_key = child_prefix(parent);
        loop {
            self.next_temp += 1;
            let name = format!("{prefix}{}{suffix}", self.next_temp);
            if !self.nodes.contains_key(&format!("{prefix_key}{name}")) {
                return name;
            }
        }
    }
}

impl MemoryFileSystem {
    /// Backend name stamped on the paths it produces.
    pub const NAME: &'static str = "memory";

    /// Creates an empty tree containing `/` and `/tmp`.
    #[must_use]
    pub fn new() -> Self {
        Self::build(DEFAULT_TEMP_ROOT.to_string())
    }

    /// Creates an empty tree whose temporary root is `root`.
    ///
    /// The root and its ancestors are created as directories. A relative
    /// root is interpreted against `/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `root` contains a NUL character.
    pub fn with_temp_root(root: &str) -> Result<Self> {
        Ok(Self::build(key(&Path::parse(root)?)))
    }

    fn build(temp_root: String) -> Self {
        let tree = Tree::with_directories(&[temp_root.as_str()]);
        Self {
            inner: Arc::new(RwLock::new(tree)),
            temp_root,
        }
    }

    /// The directory temporary directories are created in.
    #[must_use]
    pub fn temp_root(&self) -> &str {
        &self.temp_root
    }

    // The tree holds no invariant that a panicking writer can leave half
    // updated, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Tree> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tree> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MemoryFileSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn exists(&self, path: &Path) -> bool {
        check_origin(self, path).is_ok() && self.read().nodes.contains_key(&key(path))
    }

    fn read_attributes(&self, path: &Path, kind: AttributeKind) -> Result<Attributes> {
        check_origin(self, path)?;
        let tree = self.read();
        let node = tree
            .nodes
            .get(&key(path))
            .ok_or_else(|| not_found("read_attributes", path))?;

        Ok(match kind {
            AttributeKind::Basic => Attributes::Basic(node.basic()),
            AttributeKind::Posix => Attributes::Posix(PosixFileAttributes {
                basic: node.basic(),
                permissions: PermissionSet::from_mode(node.mode),
            }),
        })
    }

    fn create_file(&self, path: &Path) -> Result<()> {
        check_origin(self, path)?;
        self.write()
            .insert_new("create_file", path, Node::file(Vec::new()))?;
        Ok(())
    }

    fn create_directory(&self, path: &Path) -> Result<()> {
        check_origin(self, path)?;
        self.write()
            .insert_new("create_directory", path, Node::directory())?;
        Ok(())
    }

    fn temporary_root(&self) -> Result<Path> {
        self.path(&self.temp_root, &[])
    }

    fn create_temporary_directory(&self, prefix: &str) -> Result<Path> {
        let root = self.temporary_root()?;
        let mut tree = self.write();
        let name = tree.unique_name(&self.temp_root, prefix, "");
        let dir = root.join(&name)?;
        tree.insert_new("create_temporary_directory", &dir, Node::directory())?;
        Ok(dir)
    }

    fn create_temporary_file(&self, dir: &Path, prefix: &str, suffix: &str) -> Result<Path> {
        let dir = bind(self, dir)?;
        let mut tree = self.write();
        let parent = key(&dir);
        match tree.nodes.get(&parent) {
            Some(node) if node.is_directory() => {}
            Some(_) => return Err(invalid("create_temporary_file", &dir, "not a directory")),
            None => return Err(not_found("create_temporary_file", &dir)),
        }

        let name = tree.unique_name(&parent, prefix, suffix);
        let file = dir.join(&name)?;
        tree.insert_new("create_temporary_file", &file, Node::file(Vec::new()))?;
        Ok(file)
    }

    fn copy(&self, source: &Path, target: &Path) -> Result<()> {
        check_origin(self, source)?;
        check_origin(self, target)?;

        let mut tree = self.write();
        let original = tree
            .nodes
            .get(&key(source))
            .ok_or_else(|| not_found("copy", source))?;
        let copied = match &original.content {
            Content::Directory => Node::directory(),
            Content::File(bytes) => Node::file(bytes.clone()),
        };
        tree.insert_new("copy", target, copied)?;
        Ok(())
    }

    fn move_path(&self, source: &Path, target: &Path) -> Result<()> {
        check_origin(self, source)?;
        check_origin(self, target)?;

        let from = key(source);
        let to = key(target);
        if from == ROOT {
            return Err(invalid("move", source, "cannot move the root directory"));
        }

        let mut tree = self.write();
        if !tree.nodes.contains_key(&from) {
            return Err(not_found("move", source));
        }
        if tree.nodes.contains_key(&to) {
            return Err(already_exists("move", target));
        }
        let from_prefix = child_prefix(&from);
        if to.starts_with(&from_prefix) {
            return Err(invalid("move", target, "cannot move a directory into itself"));
        }
        tree.require_parent("move", target, &to)?;

        // Siblings such as `a.txt` sort between `a` and `a/`, so descendants
        // are collected from the child prefix rather than from `from`.
        let descendants: Vec<String> = tree
            .nodes
            .range(from_prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&from_prefix))
            .map(|(k, _)| k.clone())
            .collect();
        for old in std::iter::once(from.clone()).chain(descendants) {
            if let Some(node) = tree.nodes.remove(&old) {
                let new = format!("{to}{}", &old[from.len()..]);
                tree.nodes.insert(new, node);
            }
        }
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<bool> {
        check_origin(self, path)?;
        let key = key(path);
        if key == ROOT {
            return Err(Error::io_kind(
                "delete",
                path,
                io::ErrorKind::PermissionDenied,
                "cannot delete the root directory",
            ));
        }

        let mut tree = self.write();
        let Some(node) = tree.nodes.get(&key) else {
            return Ok(false);
        };
        if node.is_directory() && tree.has_children(&key) {
            return Err(Error::io_kind(
                "delete",
                path,
                io::ErrorKind::Other,
                "directory not empty",
            ));
        }
        tree.nodes.remove(&key);
        Ok(true)
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        check_origin(self, path)?;
        let mut tree = self.write();
        let node = tree
            .nodes
            .get_mut(&key(path))
            .ok_or_else(|| not_found("open_read", path))?;
        let Content::File(bytes) = &node.content else {
            return Err(invalid("open_read", path, "is a directory"));
        };
        let snapshot = bytes.clone();
        node.accessed_us = now_us();
        Ok(Box::new(Cursor::new(snapshot)))
    }

    fn open_write(&self, path: &Path) -> Result<Box<dyn Write + Send>> {
        check_origin(self, path)?;
        let key = key(path);
        let mut tree = self.write();
        match tree.nodes.get_mut(&key) {
            Some(node) => match &mut node.content {
                Content::Directory => return Err(invalid("open_write", path, "is a directory")),
                Content::File(bytes) => {
                    bytes.clear();
                    node.modified_us = now_us();
                }
            },
            None => {
                tree.insert_new("open_write", path, Node::file(Vec::new()))?;
            }
        }

        Ok(Box::new(MemoryWriter {
            inner: Arc::clone(&self.inner),
            key,
        }))
    }

    fn list(&self, dir: &Path) -> Result<Vec<Path>> {
        let dir = bind(self, dir)?;
        let key = key(&dir);
        let tree = self.read();
        match tree.nodes.get(&key) {
            Some(node) if node.is_directory() => {}
            Some(_) => return Err(invalid("list", &dir, "not a directory")),
            None => return Err(not_found("list", &dir)),
        }

        tree.child_names(&key)
            .iter()
            .map(|name| dir.join(name))
            .collect()
    }
}

/// Appends straight into the tree; nothing is buffered.
struct MemoryWriter {
    inner: Arc<RwLock<Tree>>,
    key: String,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut tree = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match tree.nodes.get_mut(&self.key) {
            Some(Node {
                content: Content::File(bytes),
                modified_us,
                ..
            }) => {
                bytes.extend_from_slice(buf);
                *modified_us = now_us();
                Ok(buf.len())
            }
            Some(_) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is no longer a file", self.key),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} was removed while open", self.key),
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
