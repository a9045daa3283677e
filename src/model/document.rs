// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{Map, Value};

use super::ids::IdeaId;

/// One idea document: an open JSON object.
///
/// Responses pasted back from an LLM carry whatever fields the model chose to
/// emit, so documents stay schemaless; only the fields below have meaning to
/// this crate.
pub type Document = Map<String, Value>;

pub const ID_KEY: &str = "id";
pub const SUBJECT_KEY: &str = "subject";
pub const BODY_KEY: &str = "body";
pub const FILES_KEY: &str = "files";
pub const RESPONSE_KEY: &str = "response";
pub const APPROACHES_KEY: &str = "approaches";
pub const CODE_SAMPLES_KEY: &str = "code_samples";

pub fn new_document(id: &IdeaId, subject: impl Into<String>, body: impl Into<String>) -> Document {
    let mut doc = Document::new();
    doc.insert(ID_KEY.to_owned(), Value::String(id.to_string()));
    doc.insert(SUBJECT_KEY.to_owned(), Value::String(subject.into()));
    doc.insert(BODY_KEY.to_owned(), Value::String(body.into()));
    doc
}

pub fn doc_id(doc: &Document) -> Option<&str> {
    doc.get(ID_KEY).and_then(Value::as_str)
}

pub fn doc_subject(doc: &Document) -> Option<&str> {
    doc.get(SUBJECT_KEY).and_then(Value::as_str)
}

pub fn doc_body(doc: &Document) -> Option<&str> {
    doc.get(BODY_KEY).and_then(Value::as_str)
}

pub fn doc_response(doc: &Document) -> Option<&Map<String, Value>> {
    doc.get(RESPONSE_KEY).and_then(Value::as_object)
}
