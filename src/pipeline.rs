//! One run, end to end: scan → empty check → filter → project, then write.
//!
//! [`run`] stops short of touching the destination so the `check` command
//! can share it; [`write_manifest`] does the final serialization.

use crate::config::{ConfigError, RunSettings};
use crate::filter::{self, FilterError, FilterOutcome, FilterStats};
use crate::index::Index;
use crate::project::{self, Manifest};
use crate::scan::{self, ScanError};
use crate::text::TextReader;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a run produced, before anything is written.
#[derive(Debug)]
pub struct RunOutcome {
    /// Index after filtering.
    pub index: Index,
    pub stats: FilterStats,
    pub manifest: Manifest,
}

pub fn run(settings: &RunSettings, reader: &impl TextReader) -> Result<RunOutcome, PipelineError> {
    debug!("scanning {}", settings.root.display());
    let index = scan::build_index(&settings.root)?;
    if index.is_empty() {
        return Err(ScanError::EmptyIndex(settings.root.clone()).into());
    }
    debug!(
        "indexed {} items in {} groups",
        index.item_count(),
        index.group_count()
    );

    let FilterOutcome { index, stats } =
        filter::apply_filters(&settings.root, index, &settings.filter, reader)?;
    let manifest = project::project(&index, &settings.base, settings.format);

    Ok(RunOutcome {
        index,
        stats,
        manifest,
    })
}

/// Pretty-print `manifest` as JSON to `path`, creating parent directories.
///
/// The file is overwritten in place.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json)?;
    Ok(())
}
