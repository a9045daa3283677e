// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Materializes embedded file content onto the filesystem.
//!
//! This is the only module with effects outside the document store. Targets
//! come from the document's own `files`, the response's `files`, and code
//! samples inside `response.approaches`; pre-existing files at a target path
//! are overwritten unconditionally. A failed entry does not abort the rest;
//! the report carries one outcome per attempted write.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::model::{
    doc_response, Document, FileKey, APPROACHES_KEY, CODE_SAMPLES_KEY, FILES_KEY,
};
use crate::normalize::{normalize_files, split_logical_path};

#[derive(Debug)]
pub enum ExtractError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// One attempted write: the path relative to the output root, how many bytes
/// the payload was, and whether the write landed.
#[derive(Debug)]
pub struct WrittenFile {
    path: PathBuf,
    bytes: usize,
    outcome: Result<(), ExtractError>,
}

impl WrittenFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }

    pub fn outcome(&self) -> Result<(), &ExtractError> {
        self.outcome.as_ref().map(|()| ())
    }
}

/// Writes every embedded file in `doc` under `output_root`.
///
/// An empty report means there was nothing to extract; the caller decides how
/// to phrase that. Later targets overwrite earlier ones at the same path, so
/// response attachments win over root attachments and code samples win over
/// both.
pub fn extract_files(doc: &Document, output_root: &Path) -> Vec<WrittenFile> {
    let mut report = Vec::new();

    write_file_entries(doc.get(FILES_KEY), output_root, &mut report);

    if let Some(response) = doc_response(doc) {
        write_file_entries(response.get(FILES_KEY), output_root, &mut report);
        write_code_samples(response.get(APPROACHES_KEY), output_root, &mut report);
    }

    report
}

fn write_file_entries(raw: Option<&Value>, output_root: &Path, report: &mut Vec<WrittenFile>) {
    for entry in normalize_files(raw).files() {
        let relative = PathBuf::from(entry.key().logical_path());
        report.push(write_one(output_root, relative, entry.content()));
    }
}

fn write_code_samples(approaches: Option<&Value>, output_root: &Path, report: &mut Vec<WrittenFile>) {
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
            let Some(code) = sample.get("code").and_then(Value::as_str) else {
                continue;
            };
            if file.is_empty() || code.is_empty() {
                continue;
            }
            let (path, name) = split_logical_path(file);
            let relative = PathBuf::from(FileKey::new(path, name).logical_path());
            report.push(write_one(output_root, relative, code));
        }
    }
}

fn write_one(output_root: &Path, relative: PathBuf, content: &str) -> WrittenFile {
    let target = output_root.join(&relative);
    let bytes = content.len();

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(source) = fs::create_dir_all(parent) {
                return WrittenFile {
                    path: relative,
                    bytes,
                    outcome: Err(ExtractError::Io { path: parent.to_path_buf(), source }),
                };
            }
        }
    }

    let outcome = fs::write(&target, content)
        .map_err(|source| ExtractError::Io { path: target.clone(), source });

    WrittenFile { path: relative, bytes, outcome }
}
