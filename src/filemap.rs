//! Input-to-output path mapping for the documentation tree.
//!
//! Stage 1 of the docpress pipeline. Walks the input root recursively and
//! produces a [`Filemap`] pairing every regular file with its destination
//! under the output root, preserving the relative directory structure. Two
//! guarantees hold when [`build_filemap`] returns ([`map_tree`] gives the
//! same mapping with no filesystem side effects at all):
//!
//! - Every directory seen during the walk (including empty ones) has its
//!   mirror created under the output root, so the compile stage never has to
//!   create a directory itself.
//! - A file literally named `README.md` maps to `index.md` in its output
//!   directory, so directory-index pages resolve the way Jekyll expects.
//!   All other filenames pass through unchanged — `.md` sources stay `.md`
//!   on disk; only link *text* inside documents is rewritten to `.html`.
//!
//! ```text
//! docs/README.md          →  out/index.md
//! docs/usage.md           →  out/usage.md
//! docs/hooks/README.md    →  out/hooks/index.md
//! docs/hooks/auth.md      →  out/hooks/auth.md
//! ```
//!
//! No file type filtering happens here: images and other assets sitting in
//! the docs tree are mapped (and later copied through the compiler) as-is.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Input path → output path, one entry per regular file under the input root.
///
/// A `BTreeMap` keyed by path gives deterministic iteration; callers must not
/// attach meaning to the order beyond that.
pub type Filemap = BTreeMap<PathBuf, PathBuf>;

#[derive(Error, Debug)]
pub enum FilemapError {
    #[error("failed to walk input tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("failed to create output directory {0}: {1}")]
    CreateDir(PathBuf, #[source] std::io::Error),
    #[error("failed to remove output directory {0}: {1}")]
    RemoveDir(PathBuf, #[source] std::io::Error),
}

/// Everything one walk of the input tree discovers: the file mapping plus
/// the output directories a build would need.
struct Walked {
    files: Filemap,
    out_dirs: Vec<PathBuf>,
}

/// Walk `input_root` and map every regular file to its output path.
///
/// Side effect: creates the mirror of every walked directory under
/// `output_root` (with any missing intermediates) before returning, so the
/// compile stage can write without checking.
pub fn build_filemap(input_root: &Path, output_root: &Path) -> Result<Filemap, FilemapError> {
    let walked = walk(input_root, output_root)?;
    for out_dir in &walked.out_dirs {
        fs::create_dir_all(out_dir).map_err(|e| FilemapError::CreateDir(out_dir.clone(), e))?;
    }
    Ok(walked.files)
}

/// [`build_filemap`] without the side effect: the same mapping, but nothing
/// is created under `output_root`. This is what `docpress map` runs, so
/// inspecting a build never mutates the filesystem.
pub fn map_tree(input_root: &Path, output_root: &Path) -> Result<Filemap, FilemapError> {
    Ok(walk(input_root, output_root)?.files)
}

fn walk(input_root: &Path, output_root: &Path) -> Result<Walked, FilemapError> {
    let mut files = Filemap::new();
    let mut out_dirs = Vec::new();

    for entry in WalkDir::new(input_root) {
        let entry = entry?;
        // walkdir yields paths prefixed by the root it was given, so the
        // prefix strip only falls back for the root entry itself.
        let rel = entry
            .path()
            .strip_prefix(input_root)
            .unwrap_or_else(|_| Path::new(""));

        if entry.file_type().is_dir() {
            if rel.as_os_str().is_empty() {
                out_dirs.push(output_root.to_path_buf());
            } else {
                out_dirs.push(output_root.join(rel));
            }
        } else if entry.file_type().is_file() {
            files.insert(entry.path().to_path_buf(), output_path(output_root, rel));
        }
    }

    Ok(Walked { files, out_dirs })
}

/// Remove the output tree from a previous run. A missing directory is fine.
pub fn clean_output(dir: &Path) -> Result<(), FilemapError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FilemapError::RemoveDir(dir.to_path_buf(), e)),
    }
}

/// Destination for one file, given its path relative to the input root.
fn output_path(output_root: &Path, rel: &Path) -> PathBuf {
    if rel.file_name().is_some_and(|n| n == "README.md") {
        output_root.join(rel.with_file_name("index.md"))
    } else {
        output_root.join(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file;
    use tempfile::TempDir;

    fn fixture_tree() -> (TempDir, PathBuf, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("docs");
        let output = tmp.path().join("out");
        write_file(&input, "README.md", "Requests\n========\n");
        write_file(&input, "usage.md", "see [auth](hooks/auth.md)\n");
        write_file(&input, "hooks/README.md", "Hooks\n=====\n");
        write_file(&input, "hooks/auth.md", "auth\n");
        write_file(&input, "img/logo.png", "not markdown");
        (tmp, input, output)
    }

    #[test]
    fn every_input_file_is_mapped_exactly_once() {
        let (_tmp, input, output) = fixture_tree();
        let filemap = build_filemap(&input, &output).unwrap();
        assert_eq!(filemap.len(), 5);
        assert!(filemap.contains_key(&input.join("usage.md")));
        assert!(filemap.contains_key(&input.join("hooks/auth.md")));
        assert!(filemap.contains_key(&input.join("img/logo.png")));
    }

    #[test]
    fn readme_becomes_index_at_every_depth() {
        let (_tmp, input, output) = fixture_tree();
        let filemap = build_filemap(&input, &output).unwrap();
        assert_eq!(
            filemap.get(&input.join("README.md")),
            Some(&output.join("index.md"))
        );
        assert_eq!(
            filemap.get(&input.join("hooks/README.md")),
            Some(&output.join("hooks/index.md"))
        );
    }

    #[test]
    fn root_files_map_into_output_root() {
        let (_tmp, input, output) = fixture_tree();
        let filemap = build_filemap(&input, &output).unwrap();
        assert_eq!(
            filemap.get(&input.join("usage.md")),
            Some(&output.join("usage.md"))
        );
    }

    #[test]
    fn non_readme_filenames_pass_through_verbatim() {
        let (_tmp, input, output) = fixture_tree();
        let filemap = build_filemap(&input, &output).unwrap();
        // .md stays .md on disk; only link text gets the .html treatment.
        assert_eq!(
            filemap.get(&input.join("hooks/auth.md")),
            Some(&output.join("hooks/auth.md"))
        );
        assert_eq!(
            filemap.get(&input.join("img/logo.png")),
            Some(&output.join("img/logo.png"))
        );
    }

    #[test]
    fn output_directories_exist_after_build() {
        let (_tmp, input, output) = fixture_tree();
        build_filemap(&input, &output).unwrap();
        assert!(output.is_dir());
        assert!(output.join("hooks").is_dir());
        assert!(output.join("img").is_dir());
    }

    #[test]
    fn empty_input_directories_are_mirrored() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("docs");
        let output = tmp.path().join("out");
        fs::create_dir_all(input.join("drafts")).unwrap();
        let filemap = build_filemap(&input, &output).unwrap();
        assert!(filemap.is_empty());
        assert!(output.join("drafts").is_dir());
    }

    #[test]
    fn map_tree_leaves_the_output_root_untouched() {
        let (_tmp, input, output) = fixture_tree();
        let filemap = map_tree(&input, &output).unwrap();
        assert_eq!(filemap.len(), 5);
        assert!(!output.exists());
    }

    #[test]
    fn map_tree_matches_build_filemap() {
        let (_tmp, input, output) = fixture_tree();
        let mapped = map_tree(&input, &output).unwrap();
        let built = build_filemap(&input, &output).unwrap();
        assert_eq!(mapped, built);
    }

    #[test]
    fn missing_input_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = build_filemap(&tmp.path().join("nope"), &tmp.path().join("out"));
        assert!(matches!(result, Err(FilemapError::Walk(_))));
    }

    #[test]
    fn clean_output_tolerates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        clean_output(&tmp.path().join("never-built")).unwrap();
    }

    #[test]
    fn clean_output_removes_stale_tree() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        write_file(&out, "stale/old.md", "gone\n");
        clean_output(&out).unwrap();
        assert!(!out.exists());
    }
}
