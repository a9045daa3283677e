// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over idea documents.
//!
//! Queries derive views for display (e.g. which logical paths a document
//! references) and never touch the filesystem.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::model::{
    doc_response, Document, FileKey, APPROACHES_KEY, CODE_SAMPLES_KEY, FILES_KEY,
};
use crate::normalize::{normalize_files, split_logical_path};

/// All logical file paths referenced by a document: its own `files`, the
/// response's `files`, and every code sample inside `response.approaches`.
///
/// Deduplicated, lexicographically sorted, no leading `./`.
pub fn list_file_paths(doc: &Document) -> Vec<String> {
    let mut paths = BTreeSet::new();

    collect_file_entry_paths(doc.get(FILES_KEY), &mut paths);

    if let Some(response) = doc_response(doc) {
        collect_file_entry_paths(response.get(FILES_KEY), &mut paths);
        collect_code_sample_paths(response.get(APPROACHES_KEY), &mut paths);
    }

    paths.into_iter().collect()
}

fn collect_file_entry_paths(raw: Option<&Value>, paths: &mut BTreeSet<String>) {
    for entry in normalize_files(raw).files() {
        paths.insert(entry.key().logical_path());
    }
}

/// Code samples address their target with a single `file` path string; run it
/// through the same key normalization so `./x.py` and `x.py` dedupe.
fn collect_code_sample_paths(approaches: Option<&Value>, paths: &mut BTreeSet<String>) {
    let Some(Value::Array(approaches)) = approaches else {
        return;
    };

    for approach in approaches {
        let Some(Value::Array(samples)) = approach.get(CODE_SAMPLES_KEY) else {
            continue;
        };
        for sample in samples {
            let Some(file) = sample.get("file").and_then(Value::as_str) else {
                continue;
            };
            if file.is_empty() {
                continue;
            }
            let (path, name) = split_logical_path(file);
            paths.insert(FileKey::new(path, name).logical_path());
        }
    }
}
