//! Shared testing utilities for pyforge CLI tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Testing harness providing an isolated project directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Path to the project directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `pyforge` binary within the
    /// default project directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("pyforge").expect("Failed to locate pyforge binary");
        cmd.current_dir(&self.work_dir);
        cmd
    }

    /// Number of entries currently present in the project directory.
    pub fn work_dir_entries(&self) -> usize {
        fs::read_dir(&self.work_dir).expect("Failed to read test work directory").count()
    }
}
