// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::file_entry::{FileEntry, FileKey};

/// An ordered collection of attachments keyed by `(path, name)` identity.
///
/// Iteration order is the insertion order of first occurrence; inserting a
/// duplicate identity replaces the earlier entry's content in place
/// (last-write-wins) instead of duplicating or reordering it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    entries: Vec<FileEntry>,
    index: BTreeMap<FileKey, usize>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: FileEntry) {
        match self.index.get(entry.key()) {
            Some(&pos) => {
                self.entries[pos] = entry;
            }
            None => {
                self.index.insert(entry.key().clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Folds `incoming` into `self`: identities present in both take the
    /// incoming content, identities only in `self` are preserved, identities
    /// only in `incoming` are appended.
    pub fn union_with(&mut self, incoming: FileSet) {
        for entry in incoming {
            self.insert(entry);
        }
    }

    pub fn get(&self, key: &FileKey) -> Option<&FileEntry> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    pub fn contains_key(&self, key: &FileKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for FileSet {
    type Item = FileEntry;
    type IntoIter = std::vec::IntoIter<FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<FileEntry> for FileSet {
    fn from_iter<I: IntoIterator<Item = FileEntry>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}
