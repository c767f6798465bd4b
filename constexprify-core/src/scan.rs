//! AST dump discovery with efficient directory pruning.
//!
//! Dumps are expected under the extension `.ast.json`, one per translation
//! unit, wherever the front end wrote them. Excluded directories are
//! pruned before iteration so large build trees skip in O(1).

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Dump file suffix produced by the front end.
const DUMP_SUFFIX: &str = ".ast.json";

/// Directories to exclude by default.
const EXCLUDED_DIRS: &[&str] = &[".git", ".cache", "node_modules", "CMakeFiles"];

/// Checks if a directory entry should be pruned (excluded from traversal).
#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

fn is_dump_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(DUMP_SUFFIX))
}

/// Gathers all `.ast.json` dumps recursively starting from the root path.
///
/// Automatically excludes `.git/`, `.cache/`, `node_modules/`, and
/// `CMakeFiles/` subtrees.
pub fn gather_dump_files(root: &Path) -> Result<Vec<PathBuf>> {
    gather_dump_files_with_excludes(root, &[])
}

/// Gathers all `.ast.json` dumps with custom exclusion patterns.
///
/// Combines default exclusions with custom patterns for efficient subtree
/// skipping.
pub fn gather_dump_files_with_excludes(root: &Path, excludes: &[&str]) -> Result<Vec<PathBuf>> {
    let all_excludes: HashSet<&str> = EXCLUDED_DIRS
        .iter()
        .copied()
        .chain(excludes.iter().copied())
        .collect();

    let mut files = WalkDir::new(root)
        .into_iter()
        // filter_entry prunes entire subtrees before iteration
        .filter_entry(|e| !is_excluded_dir(e, &all_excludes))
        .par_bridge()
        .filter_map(|entry| match entry {
            Ok(e) => {
                let path = e.path();
                if is_dump_file(path) {
                    Some(Ok(path.to_path_buf()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(e.into())),
        })
        .collect::<Result<Vec<_>>>()
        .context(format!(
            "Failed to gather AST dumps from {}",
            root.display()
        ))?;

    // Deterministic document order across runs regardless of walk order.
    files.sort();
    Ok(files)
}
