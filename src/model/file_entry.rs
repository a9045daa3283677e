// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// Canonical identity of one attachment: directory-relative prefix plus base
/// name.
///
/// The prefix is normalized on construction: surrounding whitespace and any
/// trailing `/` are stripped, and `.` collapses to "" (meaning "no prefix").
/// The base name is expected to carry no `/`; splitting a raw key into prefix
/// and name is the normalizer's job.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileKey {
    path: String,
    name: String,
}

impl FileKey {
    pub fn new(path: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            path: normalize_path_prefix(path.as_ref()),
            name: name.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The display/extraction path: `path/name`, or bare `name` when there is
    /// no prefix. Never starts with `./`.
    pub fn logical_path(&self) -> String {
        if self.path.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.path, self.name)
        }
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.logical_path())
    }
}

fn normalize_path_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed == "." {
        String::new()
    } else {
        trimmed.to_owned()
    }
}

/// One canonical attachment: identity plus full textual payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    key: FileKey,
    content: String,
}

impl FileEntry {
    pub fn new(path: impl AsRef<str>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            key: FileKey::new(path, name),
            content: content.into(),
        }
    }

    pub fn key(&self) -> &FileKey {
        &self.key
    }

    pub fn path(&self) -> &str {
        self.key.path()
    }

    pub fn name(&self) -> &str {
        self.key.name()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}
