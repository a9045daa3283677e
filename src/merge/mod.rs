// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deep merge of a partial update into a stored idea document.
//!
//! The merge is additive/overriding, never subtractive: keys present only in
//! the existing document survive untouched. Matching nested objects merge
//! recursively; everything else is replaced by the incoming value. Wherever a
//! `files` key appears (document root or inside `response`), both sides are
//! normalized and unioned by `(path, name)` identity instead, with the
//! incoming content winning on conflicts.

use serde_json::{Map, Value};

use crate::model::{Document, FileSet, FILES_KEY, ID_KEY, RESPONSE_KEY};
use crate::normalize::normalize_files;

/// Merges `incoming` into `existing`, returning a new document.
///
/// Neither argument is mutated. An `id` already present in `existing` is
/// never overwritten by content inside the incoming body.
pub fn merge_documents(existing: &Document, incoming: &Document) -> Document {
    let mut merged = merge_objects(existing, incoming, MergeScope::Root);
    if let Some(id) = existing.get(ID_KEY) {
        merged.insert(ID_KEY.to_owned(), id.clone());
    }
    merged
}

/// Where in the document the merge currently operates.
///
/// The `files` union rule applies at the document root and directly inside
/// `response`; a `files` key anywhere deeper is ordinary data and replaces
/// like any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeScope {
    Root,
    Response,
    Nested,
}

impl MergeScope {
    fn unions_files(self) -> bool {
        matches!(self, Self::Root | Self::Response)
    }

    fn descend(self, key: &str) -> Self {
        match self {
            Self::Root if key == RESPONSE_KEY => Self::Response,
            _ => Self::Nested,
        }
    }
}

fn merge_objects(
    existing: &Map<String, Value>,
    incoming: &Map<String, Value>,
    scope: MergeScope,
) -> Map<String, Value> {
    let mut out = existing.clone();

    for (key, incoming_value) in incoming {
        if scope.unions_files() && key == FILES_KEY {
            let merged_files = merge_file_collections(existing.get(key), incoming_value);
            out.insert(key.clone(), merged_files);
            continue;
        }

        match (out.get(key), incoming_value) {
            (Some(Value::Object(current)), Value::Object(update)) => {
                let merged = merge_objects(current, update, scope.descend(key));
                out.insert(key.clone(), Value::Object(merged));
            }
            // Scalars, lists, and shape mismatches all replace.
            _ => {
                out.insert(key.clone(), incoming_value.clone());
            }
        }
    }

    out
}

/// Unions two file collections by identity, regardless of each side's
/// encoding, and re-encodes the result in the existing side's shape
/// preference.
fn merge_file_collections(existing: Option<&Value>, incoming: &Value) -> Value {
    let mut merged = normalize_files(existing).into_files();
    merged.union_with(normalize_files(Some(incoming)).into_files());
    encode_files(&merged, shape_preference(existing))
}

/// The representational shape `files` is written back in.
///
/// A store that historically used a mapping keeps it; everything else gets
/// the canonical list-of-object form, which is strictly more expressive
/// (same display name under different paths).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FilesShape {
    Mapping,
    List,
}

fn shape_preference(existing: Option<&Value>) -> FilesShape {
    match existing {
        Some(Value::Object(_)) => FilesShape::Mapping,
        _ => FilesShape::List,
    }
}

fn encode_files(files: &FileSet, preference: FilesShape) -> Value {
    if preference == FilesShape::Mapping && names_are_unique(files) {
        let mut map = Map::new();
        for entry in files {
            let mut fields = Map::new();
            fields.insert("content".to_owned(), Value::String(entry.content().to_owned()));
            fields.insert("path".to_owned(), Value::String(entry.path().to_owned()));
            map.insert(entry.name().to_owned(), Value::Object(fields));
        }
        return Value::Object(map);
    }

    Value::Array(
        files
            .iter()
            .map(|entry| {
                let mut fields = Map::new();
                fields.insert("name".to_owned(), Value::String(entry.name().to_owned()));
                fields.insert("path".to_owned(), Value::String(entry.path().to_owned()));
                fields.insert("content".to_owned(), Value::String(entry.content().to_owned()));
                Value::Object(fields)
            })
            .collect(),
    )
}

fn names_are_unique(files: &FileSet) -> bool {
    let mut seen = std::collections::BTreeSet::new();
    files.iter().all(|entry| seen.insert(entry.name()))
}
