//! Naming conventions for the artwork tree.
//!
//! The tree has exactly two levels, and both are fixed-format:
//!
//! ```text
//! rtty_offline/
//! ├── ARTWORK-01/        # group: `ARTWORK-0` followed by a digit 1..8
//! │   ├── 000            # item: exactly three ASCII digits
//! │   ├── 002
//! │   └── 010
//! ├── ARTWORK-03/
//! │   └── 005
//! └── notes.txt          # anything else is ignored
//! ```
//!
//! Items are ordered by their numeric value. Since every accepted identifier
//! is three digits, [`parse_item_id`] always yields a number for anything that
//! enters the index; there is no lexical fallback.

/// Fixed prefix shared by every group directory name.
pub const GROUP_PREFIX: &str = "ARTWORK-0";

/// Number of characters in an item identifier.
pub const ITEM_ID_LEN: usize = 3;

/// Parse a group directory name like `ARTWORK-03`, returning its number (1..=8).
///
/// - `"ARTWORK-01"` → `Some(1)`
/// - `"ARTWORK-08"` → `Some(8)`
/// - `"ARTWORK-09"`, `"ARTWORK-00"`, `"ARTWORK-010"`, `"artwork-01"` → `None`
pub fn parse_group_name(name: &str) -> Option<u8> {
    let rest = name.strip_prefix(GROUP_PREFIX)?;
    match rest.as_bytes() {
        [digit @ b'1'..=b'8'] => Some(digit - b'0'),
        _ => None,
    }
}

/// Parse an item file name like `042`, returning its numeric value.
///
/// Only exactly three ASCII digits qualify: `"42"`, `"0042"`, `"04a"` and
/// `"042.txt"` are all rejected.
pub fn parse_item_id(name: &str) -> Option<u16> {
    let bytes = name.as_bytes();
    if bytes.len() != ITEM_ID_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    name.parse().ok()
}

/// `true` when `name` is a group directory the scanner indexes.
pub fn is_group_name(name: &str) -> bool {
    parse_group_name(name).is_some()
}

/// `true` when `name` is an item file name. Predicate form of
/// [`parse_item_id`] for callers that don't need the numeric value.
pub fn is_item_id(name: &str) -> bool {
    parse_item_id(name).is_some()
}

/// The canonical `"{group}/{item}"` key used for path filtering and output.
pub fn relative_path(group: &str, item: &str) -> String {
    format!("{group}/{item}")
}
