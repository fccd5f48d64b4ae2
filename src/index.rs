//! The canonical index: group name → ordered item identifiers.
//!
//! Every stage after the scan works on this value, never on the filesystem
//! layout directly. Groups are kept in a `BTreeMap`, so they always iterate in
//! lexical name order, which for `ARTWORK-01`..`ARTWORK-08` is also numeric
//! order. Item order inside a group is whatever the producer inserted (numeric
//! for the scanner) and is never re-sorted here.

use crate::naming;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    groups: BTreeMap<String, Vec<String>>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a group with its items. Empty groups are never represented,
    /// so inserting one is a no-op (and removes nothing).
    pub fn insert_group(&mut self, group: impl Into<String>, items: Vec<String>) {
        if items.is_empty() {
            return;
        }
        self.groups.insert(group.into(), items);
    }

    /// Groups in lexical order with their items.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub fn items(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn item_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Every item as its `"{group}/{item}"` relative path, in index order.
    pub fn relative_paths(&self) -> impl Iterator<Item = String> + '_ {
        self.groups().flat_map(|(group, items)| {
            items
                .iter()
                .map(move |item| naming::relative_path(group, item))
        })
    }

    pub(crate) fn into_groups(self) -> BTreeMap<String, Vec<String>> {
        self.groups
    }
}

impl FromIterator<(String, Vec<String>)> for Index {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut index = Index::new();
        for (group, items) in iter {
            index.insert_group(group, items);
        }
        index
    }
}
