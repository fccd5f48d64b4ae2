//! Shared test utilities.
//!
//! Fixture trees on disk, in-memory indexes, and a [`FakeReader`] that lets
//! filter tests run without a filesystem.
//!
//! ```rust,ignore
//! let tmp = sample_tree();                 // ARTWORK-01/{000,002,010}, ARTWORK-03/{005}
//! let index = build_index(tmp.path()).unwrap();
//! assert_eq!(index, sample_index());
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::index::Index;
use crate::text::TextReader;

// =========================================================================
// Fixture trees
// =========================================================================

/// Create a temp root with the given group directories and item files.
///
/// Every file gets placeholder content; tests that care about content
/// overwrite individual files afterwards.
pub fn artwork_tree(layout: &[(&str, &[&str])]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (group, items) in layout {
        let dir = tmp.path().join(group);
        fs::create_dir_all(&dir).unwrap();
        for item in *items {
            fs::write(dir.join(item), format!("artwork {group}/{item}")).unwrap();
        }
    }
    tmp
}

/// `ARTWORK-01/{000,002,010}` and `ARTWORK-03/{005}`, plus some noise the
/// scanner must ignore.
pub fn sample_tree() -> TempDir {
    let tmp = artwork_tree(&[
        ("ARTWORK-01", &["010", "000", "002"]),
        ("ARTWORK-03", &["005"]),
    ]);
    fs::write(tmp.path().join("README.md"), "not an artwork").unwrap();
    fs::create_dir_all(tmp.path().join("drafts")).unwrap();
    tmp
}

// =========================================================================
// In-memory indexes
// =========================================================================

pub fn index_of(layout: &[(&str, &[&str])]) -> Index {
    layout
        .iter()
        .map(|(group, items)| {
            (
                group.to_string(),
                items.iter().map(|i| i.to_string()).collect::<Vec<_>>(),
            )
        })
        .collect()
}

/// The index [`sample_tree`] scans to.
pub fn sample_index() -> Index {
    index_of(&[
        ("ARTWORK-01", &["000", "002", "010"]),
        ("ARTWORK-03", &["005"]),
    ])
}

// =========================================================================
// Fake text reader
// =========================================================================

/// In-memory [`TextReader`]. Unknown paths read as empty text; paths marked
/// with [`FakeReader::failing_on`] return an error. Every read is recorded.
#[derive(Default)]
pub struct FakeReader {
    texts: HashMap<PathBuf, String>,
    failing: HashSet<PathBuf>,
    reads: RefCell<Vec<PathBuf>>,
}

impl FakeReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, path: impl AsRef<Path>, text: &str) -> Self {
        self.texts.insert(path.as_ref().to_path_buf(), text.to_string());
        self
    }

    pub fn failing_on(mut self, path: impl AsRef<Path>) -> Self {
        self.failing.insert(path.as_ref().to_path_buf());
        self
    }

    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.borrow().clone()
    }
}

impl TextReader for FakeReader {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.reads.borrow_mut().push(path.to_path_buf());
        if self.failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "corrupt fixture",
            ));
        }
        Ok(self.texts.get(path).cloned().unwrap_or_default())
    }
}

// =========================================================================
// Self-checks
// =========================================================================

#[test]
fn sample_tree_scans_to_sample_index() {
    let tmp = sample_tree();
    let index = crate::scan::build_index(tmp.path()).unwrap();
    assert_eq!(index, sample_index());
}
