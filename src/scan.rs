//! Filesystem scanning: the artwork tree becomes an [`Index`].
//!
//! ## Directory Structure
//!
//! ```text
//! rtty_offline/                    # Root
//! ├── ARTWORK-01/                  # Group (ARTWORK-01 .. ARTWORK-08)
//! │   ├── 000                      # Item (exactly three digits)
//! │   ├── 002
//! │   ├── 010
//! │   └── README                   # ignored
//! ├── ARTWORK-03/
//! │   └── 005
//! ├── ARTWORK-09/                  # ignored: outside 01..08
//! └── manifest.json                # ignored: not a group directory
//! ```
//!
//! ## Rules
//!
//! - Only immediate children are inspected, at both levels. Nothing deeper.
//! - Entries that do not follow the naming convention are skipped silently;
//!   the tree is loosely curated and this is not a schema validator.
//! - Items are ordered by numeric value (`001, 002, 010`).
//! - A group directory with no qualifying files does not appear in the index.
//!
//! The scanner only fails when the root itself is unusable. An empty result is
//! a valid index here; deciding that it is fatal belongs to the pipeline.

use crate::index::Index;
use crate::naming;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Root not found or not a directory: {0}")]
    RootNotFound(PathBuf),
    #[error("No ARTWORK-0X folders found with files under {0}")]
    EmptyIndex(PathBuf),
    #[error("Cannot read directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

pub fn build_index(root: &Path) -> Result<Index, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let mut index = Index::new();
    for entry in immediate_children(root)? {
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().filter(|n| naming::is_group_name(n)) else {
            debug!("skipping directory {}", entry.path().display());
            continue;
        };
        let items = collect_items(entry.path())?;
        if items.is_empty() {
            debug!("group {name} has no item files");
        }
        index.insert_group(name, items);
    }

    Ok(index)
}

/// Item identifiers of one group directory, sorted by numeric value.
fn collect_items(group_dir: &Path) -> Result<Vec<String>, ScanError> {
    let mut numbered: Vec<(u16, String)> = Vec::new();
    for entry in immediate_children(group_dir)? {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str();
        match name.and_then(|n| naming::parse_item_id(n).map(|num| (num, n))) {
            Some((num, id)) => numbered.push((num, id.to_string())),
            None => debug!("skipping file {}", entry.path().display()),
        }
    }

    numbered.sort_by_key(|&(num, _)| num);
    Ok(numbered.into_iter().map(|(_, id)| id).collect())
}

/// Immediate children of `dir`, following symlinks like a plain `stat` would.
///
/// An unreadable `dir` is an error. A child that cannot be inspected (for
/// example a dangling symlink) is skipped.
fn immediate_children(dir: &Path) -> Result<Vec<DirEntry>, ScanError> {
    let mut children = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => children.push(entry),
            Err(err) if err.depth() == 0 => {
                return Err(ScanError::Walk {
                    path: dir.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => debug!("skipping unreadable entry: {err}"),
        }
    }
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{artwork_tree, sample_tree};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn sample_tree_indexes_both_groups() {
        let tmp = sample_tree();
        let index = build_index(tmp.path()).unwrap();

        assert_eq!(index.group_count(), 2);
        assert_eq!(index.items("ARTWORK-01").unwrap(), ["000", "002", "010"]);
        assert_eq!(index.items("ARTWORK-03").unwrap(), ["005"]);
    }

    #[test]
    fn items_sorted_by_numeric_value() {
        let tmp = artwork_tree(&[("ARTWORK-02", &["010", "002", "001", "100", "099"])]);
        let index = build_index(tmp.path()).unwrap();

        assert_eq!(
            index.items("ARTWORK-02").unwrap(),
            ["001", "002", "010", "099", "100"]
        );
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = build_index(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::RootNotFound(_))));
    }

    #[test]
    fn file_as_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("root.txt");
        fs::write(&file, "not a dir").unwrap();

        let result = build_index(&file);
        assert!(matches!(result, Err(ScanError::RootNotFound(p)) if p == file));
    }

    #[test]
    fn empty_root_yields_empty_index() {
        let tmp = TempDir::new().unwrap();
        let index = build_index(tmp.path()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn non_matching_groups_are_ignored() {
        let tmp = artwork_tree(&[
            ("ARTWORK-01", &["000"]),
            ("ARTWORK-09", &["000"]),
            ("ARTWORK-00", &["000"]),
            ("artwork-02", &["000"]),
            ("misc", &["000"]),
        ]);
        let index = build_index(tmp.path()).unwrap();

        let names: Vec<&str> = index.groups().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["ARTWORK-01"]);
    }

    #[test]
    fn non_matching_files_are_ignored() {
        let tmp = artwork_tree(&[("ARTWORK-04", &["001", "01", "0001", "abc", "001.txt"])]);
        fs::write(tmp.path().join("ARTWORK-04/.DS_Store"), "").unwrap();

        let index = build_index(tmp.path()).unwrap();
        assert_eq!(index.items("ARTWORK-04").unwrap(), ["001"]);
    }

    #[test]
    fn group_named_file_at_root_is_ignored() {
        let tmp = artwork_tree(&[("ARTWORK-01", &["000"])]);
        fs::write(tmp.path().join("ARTWORK-02"), "a file, not a group").unwrap();

        let index = build_index(tmp.path()).unwrap();
        assert_eq!(index.items("ARTWORK-02"), None);
    }

    #[test]
    fn digit_named_directory_is_not_an_item() {
        let tmp = artwork_tree(&[("ARTWORK-01", &["000"])]);
        fs::create_dir_all(tmp.path().join("ARTWORK-01/001")).unwrap();

        let index = build_index(tmp.path()).unwrap();
        assert_eq!(index.items("ARTWORK-01").unwrap(), ["000"]);
    }

    #[test]
    fn nested_items_are_not_scanned() {
        let tmp = artwork_tree(&[("ARTWORK-01", &["000"])]);
        let nested = tmp.path().join("ARTWORK-01/sub");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("001"), "deep").unwrap();

        let index = build_index(tmp.path()).unwrap();
        assert_eq!(index.item_count(), 1);
    }

    #[test]
    fn group_without_items_is_omitted() {
        let tmp = artwork_tree(&[("ARTWORK-01", &["000"]), ("ARTWORK-05", &[])]);
        let index = build_index(tmp.path()).unwrap();

        assert_eq!(index.group_count(), 1);
        assert_eq!(index.items("ARTWORK-05"), None);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_skipped() {
        let tmp = artwork_tree(&[("ARTWORK-01", &["000"])]);
        std::os::unix::fs::symlink(
            tmp.path().join("does-not-exist"),
            tmp.path().join("ARTWORK-01/001"),
        )
        .unwrap();

        let index = build_index(tmp.path()).unwrap();
        assert_eq!(index.items("ARTWORK-01").unwrap(), ["000"]);
    }
}
