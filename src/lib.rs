//! # RTTY Manifest
//!
//! Builds the `manifest.json` that the RTTY web app reads in bundled (offline)
//! mode. The filesystem is the data source: a root holding `ARTWORK-01` ..
//! `ARTWORK-08`, each holding files named with three digits.
//!
//! # Architecture: One-Way Pipeline
//!
//! ```text
//! root/  →  Index  →  filtered Index  →  Manifest  →  manifest.json
//!        scan      filter             project      pipeline::write_manifest
//! ```
//!
//! Every stage after the scan is a function of an [`index::Index`] value, so
//! the filter and the projections are testable with an in-memory index and a
//! fake [`text::TextReader`], no temp directories needed.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | `ARTWORK-0N` / `NNN` naming rules and the `group/item` relative path |
//! | [`text`] | Total byte → text decoding and the `TextReader` seam |
//! | [`index`] | The canonical ordered index |
//! | [`scan`] | Walks the root into an index |
//! | [`filter`] | Path-pattern then content-word exclusion |
//! | [`project`] | `array` / `items` / `map` output shapes |
//! | [`config`] | Layered configuration: defaults → config file → flags |
//! | [`pipeline`] | Runs the stages and writes the manifest |
//! | [`output`] | CLI result formatting |
//!
//! # Design Decisions
//!
//! ## Path Stage Before Content Stage
//!
//! The path pattern is checked first and a match skips the read entirely.
//! Excluding by path is therefore also a way to keep unreadable files out of
//! the run.
//!
//! ## Decoding Never Fails
//!
//! Item files are not guaranteed to be UTF-8. Anything that is not decodes as
//! Latin-1, byte for byte, so banned-word matching still sees the ASCII parts
//! and the scan carries on.
//!
//! ## Empty Results
//!
//! A root with no qualifying files is a fatal error. A run whose filters
//! remove every item is not: it writes an empty manifest.

pub mod config;
pub mod filter;
pub mod index;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod project;
pub mod scan;
pub mod text;

#[cfg(test)]
pub(crate) mod test_helpers;
