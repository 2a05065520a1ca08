//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing:
//! - A scratch directory used as working directory and `HOME`
//! - Command builders that ignore the caller's `PATHFS_*` environment
//! - Small fixtures for files and directories

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak the developer's setup into tests.
const PATHFS_VARS: [&str; 5] = [
    "PATHFS_BACKEND",
    "PATHFS_CONFIG",
    "PATHFS_TEMP_DIR",
    "PATHFS_OUTPUT_FORMAT",
    "PATHFS_LOG_MODE",
];

/// Test environment with an isolated scratch directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// A pathfs command running inside the scratch directory, with a clean
    /// environment and `HOME` pointing at the scratch directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("pathfs").expect("Failed to find pathfs binary");
        for var in PATHFS_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", &self.temp_path).current_dir(&self.temp_path);
        cmd
    }

    /// A command against the in-memory backend.
    pub fn memory_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("--backend").arg("memory");
        cmd
    }

    /// Absolute path of `name` inside the scratch directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_path.join(name)
    }

    /// `path(name)` as a string argument.
    pub fn arg(&self, name: &str) -> String {
        self.path(name).to_str().expect("UTF-8 temp path").to_string()
    }

    /// Create a file with `contents` inside the scratch directory.
    pub fn write_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Create a directory (and its parents) inside the scratch directory.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Run a command that must succeed and return its stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run pathfs");
        assert!(
            output.status.success(),
            "pathfs {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Scratch directory root.
    pub fn root(&self) -> &Path {
        &self.temp_path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
