//! Two-stage exclusion of index items.
//!
//! For every item, in index order:
//!
//! 1. **Path stage**: if a path pattern is set and it matches anywhere in the
//!    item's relative path (`ARTWORK-01/002`), case-insensitively, the item is
//!    dropped. Its content is never read.
//! 2. **Content stage**: if banned words are set, the item file is read through
//!    a [`TextReader`], lower-cased, and dropped when any banned word occurs
//!    as a substring.
//!
//! Groups left without items disappear from the result. With neither stage
//! active the index passes through untouched and nothing is read.

use crate::index::Index;
use crate::naming;
use crate::text::TextReader;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid path filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Banned words and path pattern for one run.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    banned_words: Vec<String>,
    path_pattern: Option<Regex>,
}

impl FilterSpec {
    /// Build a spec from raw words and an optional pattern.
    ///
    /// Words are trimmed and lower-cased; blank ones are dropped. An empty
    /// pattern counts as unset. A pattern that does not compile is rejected
    /// here, before any item is looked at.
    pub fn new<S: AsRef<str>>(words: &[S], path_pattern: Option<&str>) -> Result<Self, FilterError> {
        let banned_words = words
            .iter()
            .map(|w| w.as_ref().trim())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        let path_pattern = match path_pattern.filter(|p| !p.is_empty()) {
            Some(pattern) => Some(RegexBuilder::new(pattern).case_insensitive(true).build()?),
            None => None,
        };

        Ok(Self {
            banned_words,
            path_pattern,
        })
    }

    pub fn is_active(&self) -> bool {
        !self.banned_words.is_empty() || self.path_pattern.is_some()
    }

    pub fn banned_words(&self) -> &[String] {
        &self.banned_words
    }

    pub fn path_pattern(&self) -> Option<&Regex> {
        self.path_pattern.as_ref()
    }

    fn excludes_path(&self, rel_path: &str) -> bool {
        self.path_pattern
            .as_ref()
            .is_some_and(|re| re.is_match(rel_path))
    }

    fn excludes_text(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.banned_words
            .iter()
            .any(|word| lowered.contains(word.as_str()))
    }
}

/// Split a comma-separated word list, trimming and dropping blanks.
///
/// `"nude, girl,,mrs "` → `["nude", "girl", "mrs"]`
pub fn split_words(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

/// Item counts from one filtering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub kept: usize,
    pub dropped: usize,
    pub total: usize,
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kept={} dropped={} total={}",
            self.kept, self.dropped, self.total
        )
    }
}

#[derive(Debug)]
pub struct FilterOutcome {
    pub index: Index,
    pub stats: FilterStats,
}

/// Apply `spec` to `index`, reading item content from under `root` via `reader`.
pub fn apply_filters(
    root: &Path,
    index: Index,
    spec: &FilterSpec,
    reader: &impl TextReader,
) -> Result<FilterOutcome, FilterError> {
    if !spec.is_active() {
        let total = index.item_count();
        return Ok(FilterOutcome {
            index,
            stats: FilterStats {
                kept: total,
                dropped: 0,
                total,
            },
        });
    }

    let mut kept = Index::new();
    let mut stats = FilterStats::default();

    for (group, items) in index.groups() {
        let mut kept_items = Vec::new();
        for item in items {
            stats.total += 1;
            if excludes_item(root, group, item, spec, reader)? {
                stats.dropped += 1;
            } else {
                kept_items.push(item.clone());
            }
        }
        kept.insert_group(group, kept_items);
    }

    stats.kept = kept.item_count();
    info!("apply_filters: {stats}");

    Ok(FilterOutcome { index: kept, stats })
}

fn excludes_item(
    root: &Path,
    group: &str,
    item: &str,
    spec: &FilterSpec,
    reader: &impl TextReader,
) -> Result<bool, FilterError> {
    let rel_path = naming::relative_path(group, item);
    if spec.excludes_path(&rel_path) {
        debug!("{rel_path}: excluded by path pattern");
        return Ok(true);
    }
    if spec.banned_words.is_empty() {
        return Ok(false);
    }

    let path = root.join(group).join(item);
    let text = reader
        .read_text(&path)
        .map_err(|source| FilterError::Read {
            path: path.clone(),
            source,
        })?;
    let banned = spec.excludes_text(&text);
    if banned {
        debug!("{rel_path}: excluded by content");
    }
    Ok(banned)
}
