// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canonicalization of `files` attachment collections.
//!
//! Three historical encodings are accepted and collapse into one `FileSet`:
//!
//! 1. mapping of name → raw content string,
//! 2. mapping of name → object with `content` and optional `path`,
//! 3. list of objects with `name`, `content`, optional `path`.
//!
//! Malformed sub-entries are dropped with a diagnostic instead of failing the
//! whole collection; an unsupported top-level shape yields an empty set.

use std::fmt;

use serde_json::Value;

use crate::model::{FileEntry, FileSet};

/// Result of normalizing one raw `files` value: the canonical entries plus
/// whatever had to be skipped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    files: FileSet,
    skipped: Vec<SkippedEntry>,
}

impl Normalized {
    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn into_files(self) -> FileSet {
        self.files
    }

    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }
}

/// Why one sub-entry (or the whole collection) was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkippedEntry {
    UnsupportedCollection {
        found: &'static str,
    },
    UnsupportedValue {
        key: String,
        found: &'static str,
    },
    MalformedField {
        key: String,
        field: &'static str,
        found: &'static str,
    },
    MissingName {
        index: usize,
    },
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedCollection { found } => {
                write!(f, "unsupported files collection shape: {found}")
            }
            Self::UnsupportedValue { key, found } => {
                write!(f, "ignoring unexpected value for file {key:?}: {found}")
            }
            Self::MalformedField { key, field, found } => {
                write!(f, "ignoring file {key:?}: field {field:?} is {found}, expected string")
            }
            Self::MissingName { index } => {
                write!(f, "ignoring files[{index}]: entry has no \"name\"")
            }
        }
    }
}

/// Normalizes any accepted `files` representation into canonical entries.
///
/// Absent or `null` input is an empty collection, not an error; the call
/// never fails.
pub fn normalize_files(raw: Option<&Value>) -> Normalized {
    let mut out = Normalized::default();

    let raw = match raw {
        None | Some(Value::Null) => return out,
        Some(raw) => raw,
    };

    match raw {
        Value::Object(map) => {
            for (key, value) in map {
                match entry_from_mapping(key, value) {
                    Ok(entry) => out.files.insert(entry),
                    Err(skipped) => out.skipped.push(skipped),
                }
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                match entry_from_list(index, item) {
                    Ok(entry) => out.files.insert(entry),
                    Err(skipped) => out.skipped.push(skipped),
                }
            }
        }
        other => {
            out.skipped.push(SkippedEntry::UnsupportedCollection {
                found: json_type_name(other),
            });
        }
    }

    out
}

/// Splits a raw key on its last `/` into (directory prefix, base name).
///
/// `"src/lib/a.py"` → `("src/lib", "a.py")`; a key without a separator keeps
/// an empty prefix.
pub fn split_logical_path(raw: &str) -> (&str, &str) {
    match raw.rsplit_once('/') {
        Some((path, name)) => (path, name),
        None => ("", raw),
    }
}

fn entry_from_mapping(key: &str, value: &Value) -> Result<FileEntry, SkippedEntry> {
    let (key_path, name) = split_logical_path(key);

    match value {
        Value::String(content) => Ok(FileEntry::new(key_path, name, content.clone())),
        Value::Object(fields) => {
            let content = read_content(key, fields)?;
            // An explicit `path` field always wins over the key-embedded
            // prefix; `path: null` means "no prefix".
            let path = match fields.get("path") {
                None => key_path,
                Some(Value::Null) => "",
                Some(Value::String(path)) => path.as_str(),
                Some(other) => {
                    return Err(SkippedEntry::MalformedField {
                        key: key.to_owned(),
                        field: "path",
                        found: json_type_name(other),
                    });
                }
            };
            Ok(FileEntry::new(path, name, content))
        }
        other => Err(SkippedEntry::UnsupportedValue {
            key: key.to_owned(),
            found: json_type_name(other),
        }),
    }
}

fn entry_from_list(index: usize, item: &Value) -> Result<FileEntry, SkippedEntry> {
    let Value::Object(fields) = item else {
        return Err(SkippedEntry::UnsupportedValue {
            key: format!("files[{index}]"),
            found: json_type_name(item),
        });
    };

    let Some(Value::String(raw_name)) = fields.get("name") else {
        return Err(SkippedEntry::MissingName { index });
    };

    let (name_path, name) = split_logical_path(raw_name);
    let content = read_content(raw_name, fields)?;
    let path = match fields.get("path") {
        None => name_path,
        Some(Value::Null) => "",
        Some(Value::String(path)) => path.as_str(),
        Some(other) => {
            return Err(SkippedEntry::MalformedField {
                key: raw_name.clone(),
                field: "path",
                found: json_type_name(other),
            });
        }
    };

    Ok(FileEntry::new(path, name, content))
}

fn read_content(key: &str, fields: &serde_json::Map<String, Value>) -> Result<String, SkippedEntry> {
    match fields.get("content") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(content)) => Ok(content.clone()),
        Some(other) => Err(SkippedEntry::MalformedField {
            key: key.to_owned(),
            field: "content",
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
