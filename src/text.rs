//! Loading item files as text for content filtering.
//!
//! Decoding is total: UTF-8 when the bytes are valid UTF-8, otherwise Latin-1,
//! where every byte maps to the code point of the same value. One odd file
//! never aborts a scan because of its encoding. Reading can still fail (the
//! file vanished, permissions), and that is reported through `io::Result`.

use std::fs;
use std::io;
use std::path::Path;

/// Source of item text. The filter engine only ever reads through this trait,
/// so tests can substitute an in-memory implementation.
pub trait TextReader {
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// Reads item files from disk, one at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTextReader;

impl TextReader for FsTextReader {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        Ok(decode_text(fs::read(path)?))
    }
}

/// Decode bytes as UTF-8, falling back to Latin-1 for anything else.
///
/// The fallback is lossless: each byte becomes exactly one `char`.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}
