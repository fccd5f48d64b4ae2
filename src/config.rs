//! Run configuration.
//!
//! One explicit record, [`ManifestConfig`], holds every setting with a
//! documented default. It is assembled from up to three layers, each
//! overriding the one before:
//!
//! ```text
//! stock defaults            ManifestConfig::default()
//!   ← config file           --config manifest.toml (optional)
//!   ← command-line flags    --root, --out, --format, ...
//! ```
//!
//! Layers are merged as TOML tables and deserialized once. Resolution
//! ([`ManifestConfig::resolve`]) validates the record and compiles the path
//! pattern, so a malformed regex stops the run before anything is scanned.
//!
//! ## Configuration Options
//!
//! ```toml
//! root = "./rtty_offline"        # Directory holding ARTWORK-0X folders
//! # out = "./rtty_offline/manifest.json"   # default: <root>/manifest.json
//! format = "items"               # array | items | map
//! # base = "rtty_offline"        # default: final component of root
//! filter = []                    # Banned words, case-insensitive
//! # path_filter = "(?i)draft"    # Regex on "ARTWORK-0X/NNN", case-insensitive
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::filter::{FilterError, FilterSpec};
use crate::project::Format;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Name of the manifest written into the root when no output path is given.
pub const DEFAULT_MANIFEST_NAME: &str = "manifest.json";

/// Every setting for one run. Unset optional fields fall back to values
/// derived from `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Directory holding the `ARTWORK-0X` folders.
    pub root: PathBuf,
    /// Manifest destination. Defaults to `<root>/manifest.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,
    /// Output shape.
    pub format: Format,
    /// Label written as `base`. Defaults to the final component of `root`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Items whose text contains any of these words are dropped.
    pub filter: Vec<String>,
    /// Items whose relative path matches this regex are dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_filter: Option<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./rtty_offline"),
            out: None,
            format: Format::default(),
            base: None,
            filter: Vec::new(),
            path_filter: None,
        }
    }
}

/// Validated settings, ready for the pipeline.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub root: PathBuf,
    pub out: PathBuf,
    pub format: Format,
    pub base: String,
    pub filter: FilterSpec,
}

impl ManifestConfig {
    /// Reject values no run could use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.as_os_str().is_empty() {
            return Err(ConfigError::Validation("root must not be empty".into()));
        }
        if self.out.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Validation("out must not be empty".into()));
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_MANIFEST_NAME))
    }

    pub fn base_label(&self) -> String {
        match &self.base {
            Some(base) => base.clone(),
            None => root_name(&self.root),
        }
    }

    pub fn filter_spec(&self) -> Result<FilterSpec, FilterError> {
        FilterSpec::new(self.filter.as_slice(), self.path_filter.as_deref())
    }

    /// Validate and derive everything the pipeline needs.
    pub fn resolve(&self) -> Result<RunSettings, ConfigError> {
        self.validate()?;
        Ok(RunSettings {
            root: self.root.clone(),
            out: self.output_path(),
            format: self.format,
            base: self.base_label(),
            filter: self.filter_spec()?,
        })
    }
}

/// Final component of `root`, resolving `.` and `..` against the working
/// directory when the path itself has none.
fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            root.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_default()
}

/// Command-line layer. Only flags that were given are serialized, so absent
/// flags leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_filter: Option<String>,
}

impl ConfigOverrides {
    pub fn to_toml(&self) -> Result<toml::Value, ConfigError> {
        Ok(toml::Value::try_from(self)?)
    }
}

/// Returns the stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ManifestConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value. A missing file is an error: the
/// path was asked for explicitly.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Stock defaults, then the optional file, then command-line overrides.
pub fn load_config(
    file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ManifestConfig, ConfigError> {
    let mut merged = stock_defaults_value()?;
    if let Some(path) = file {
        merged = merge_toml(merged, load_raw_config(path)?);
    }
    merged = merge_toml(merged, overrides.to_toml()?);

    let config: ManifestConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// A fully-commented config file with every key and its default.
///
/// Printed by the `gen-config` command.
pub fn stock_config_toml() -> &'static str {
    r##"# RTTY manifest configuration
# ===========================
# All settings are optional. Values shown are the defaults.
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# Directory holding the ARTWORK-01 .. ARTWORK-08 folders.
root = "./rtty_offline"

# Where to write the manifest. Default: <root>/manifest.json
# out = "./rtty_offline/manifest.json"

# Manifest shape:
#   array  - ["ARTWORK-01/000", ...]
#   items  - { "base": ..., "items": ["ARTWORK-01/000", ...] }
#   map    - { "base": ..., "ARTWORK-01": ["000", ...] }
format = "items"

# Label written as "base". Default: the final component of root.
# base = "rtty_offline"

# Drop items whose content contains any of these words (case-insensitive).
filter = []

# Drop items whose relative path (e.g. "ARTWORK-01/042") matches this
# regular expression. Matching is case-insensitive and unanchored.
# path_filter = "(?i)draft|wip"
"##
}
