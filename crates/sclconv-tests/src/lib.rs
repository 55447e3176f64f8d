//! Shared fixtures for sclconv integration tests.
//!
//! Tests build `.scl` inputs in temporary directories with these helpers and
//! run them through the public pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Twelve-tone equal temperament, written in cents.
pub const EDO_12: &str = "\
! 12edo.scl
!
12-tone equal temperament
 12
!
 100.0
 200.0
 300.0
 400.0
 500.0
 600.0
 700.0
 800.0
 900.0
 1000.0
 1100.0
 2/1
";

/// Five-limit just intonation major scale, written as fractions.
pub const JUST_MAJOR: &str = "\
! just_major.scl
Just major scale
7
9/8
5/4
4/3
3/2
5/3
15/8
2/1
";

/// `.scl` text with `count` degrees, each `step_cents` above the previous.
pub fn equal_steps(description: &str, count: usize, step_cents: f64) -> String {
    let mut text = format!("! generated\n{}\n{}\n", description, count);
    for i in 1..=count {
        text.push_str(&format!("{:.3}\n", step_cents * i as f64));
    }
    text
}

/// A temporary directory holding `.scl` inputs.
pub struct ScaleDir {
    dir: TempDir,
}

impl ScaleDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file and return its path.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    pub fn read(&self, name: &str) -> Vec<u8> {
        fs::read(self.dir.path().join(name)).expect("failed to read output")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Sorted names of every file in the directory.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.dir.path())
            .expect("failed to list temp dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Default for ScaleDir {
    fn default() -> Self {
        Self::new()
    }
}
