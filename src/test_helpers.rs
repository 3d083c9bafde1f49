//! Shared test utilities for the docpress test suite.

use std::fs;
use std::path::{Path, PathBuf};

/// Write `contents` to `root/rel`, creating parent directories, and return
/// the full path. Tests build their fixture trees with this instead of
/// repeating the mkdir/write dance.
pub fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}
