// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! An idea document is an open JSON object; only `id` and the attachment
//! collections get typed representations (`IdeaId`, `FileEntry`, `FileSet`).

pub mod document;
pub mod file_entry;
pub mod file_set;
pub mod ids;

pub use document::{
    doc_body, doc_id, doc_response, doc_subject, new_document, Document, APPROACHES_KEY, BODY_KEY,
    CODE_SAMPLES_KEY, FILES_KEY, ID_KEY, RESPONSE_KEY, SUBJECT_KEY,
};
pub use file_entry::{FileEntry, FileKey};
pub use file_set::FileSet;
pub use ids::{Id, IdError, IdeaId};
