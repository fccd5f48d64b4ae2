//! Output shapes derived from a final [`Index`].
//!
//! Three projections, all pure:
//!
//! ```text
//! array   ["ARTWORK-01/000", "ARTWORK-01/002", "ARTWORK-03/005"]
//!
//! items   { "base": "rtty_offline",
//!           "items": ["ARTWORK-01/000", "ARTWORK-01/002", "ARTWORK-03/005"] }
//!
//! map     { "base": "rtty_offline",
//!           "ARTWORK-01": ["000", "002"],
//!           "ARTWORK-03": ["005"] }
//! ```
//!
//! Groups always appear in lexical order; items keep the order the index holds.

use crate::index::Index;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which projection to produce.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Flat JSON array of relative paths
    Array,
    /// Object with `base` and a flat `items` array
    #[default]
    Items,
    /// Object with `base` and one array of item ids per group
    Map,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Array => "array",
            Format::Items => "items",
            Format::Map => "map",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A serializable manifest. Serializes to exactly one of the three shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Manifest {
    Array(Vec<String>),
    Items(ItemsManifest),
    Map(MapManifest),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemsManifest {
    pub base: String,
    pub items: Vec<String>,
}

/// `base` first, then one key per group. `ARTWORK-0N` can never collide
/// with `base`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapManifest {
    pub base: String,
    #[serde(flatten)]
    pub groups: BTreeMap<String, Vec<String>>,
}

impl Manifest {
    /// Number of items the manifest lists.
    pub fn item_count(&self) -> usize {
        match self {
            Manifest::Array(paths) => paths.len(),
            Manifest::Items(m) => m.items.len(),
            Manifest::Map(m) => m.groups.values().map(Vec::len).sum(),
        }
    }

    /// JSON top-level kind: `"array"` or `"object"`.
    pub fn shape(&self) -> &'static str {
        match self {
            Manifest::Array(_) => "array",
            Manifest::Items(_) | Manifest::Map(_) => "object",
        }
    }

    pub fn base(&self) -> Option<&str> {
        match self {
            Manifest::Array(_) => None,
            Manifest::Items(m) => Some(&m.base),
            Manifest::Map(m) => Some(&m.base),
        }
    }
}

/// Flatten to relative paths, groups in lexical order.
pub fn to_array(index: &Index) -> Vec<String> {
    index.relative_paths().collect()
}

pub fn project(index: &Index, base: &str, format: Format) -> Manifest {
    match format {
        Format::Array => Manifest::Array(to_array(index)),
        Format::Items => Manifest::Items(ItemsManifest {
            base: base.to_string(),
            items: to_array(index),
        }),
        Format::Map => Manifest::Map(MapManifest {
            base: base.to_string(),
            groups: index.clone().into_groups(),
        }),
    }
}
