//! Common test utilities for integration tests.
//!
//! This module provides helpers shared by the backend contract suites: a
//! scratch area per backend and small builders for populated trees.

use std::sync::Arc;

use pathfs::{FileSystem, MemoryFileSystem, OsFileSystem, Path};
use tempfile::TempDir;

/// A backend plus an empty, existing directory to work in.
///
/// For the OS backend the directory is a `TempDir` removed on drop.
pub struct Scratch {
    pub fs: Arc<dyn FileSystem>,
    pub root: Path,
    _temp: Option<TempDir>,
}

impl Scratch {
    /// Scratch area on the host filesystem.
    pub fn os() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let fs = OsFileSystem::with_temp_root(temp.path());
        let root = fs.path(temp.path().to_str().unwrap(), &[]).unwrap();
        Self {
            fs: Arc::new(fs),
            root,
            _temp: Some(temp),
        }
    }

    /// Scratch area in a fresh in-memory tree.
    pub fn memory() -> Self {
        let fs = MemoryFileSystem::new();
        let root = fs.path("/tmp", &["scratch"]).unwrap();
        fs.create_directory(&root).unwrap();
        Self {
            fs: Arc::new(fs),
            root,
            _temp: None,
        }
    }

    /// Both backends, for running one scenario against each.
    #[allow(dead_code)]
    pub fn all() -> Vec<Self> {
        vec![Self::os(), Self::memory()]
    }

    /// A path below the scratch root.
    pub fn child(&self, relative: &str) -> Path {
        self.root.join(relative).unwrap()
    }

    /// Create a file with `contents` below the scratch root.
    #[allow(dead_code)]
    pub fn file(&self, relative: &str, contents: &[u8]) -> Path {
        let path = self.child(relative);
        self.fs.write_bytes(&path, contents).unwrap();
        path
    }

    /// Create a directory below the scratch root.
    #[allow(dead_code)]
    pub fn dir(&self, relative: &str) -> Path {
        let path = self.child(relative);
        self.fs.create_directory(&path).unwrap();
        path
    }

    /// Name of the backend, for assertion messages.
    #[allow(dead_code)]
    pub fn name(&self) -> &'static str {
        self.fs.name()
    }
}

/// File names of `paths`, in order.
#[allow(dead_code)]
pub fn file_names(paths: &[Path]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().map(|n| n.to_string()).unwrap_or_default())
        .collect()
}
