// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ideabank — git-backed idea capture with LLM response merging.
//!
//! Ideas live as one pretty-printed JSON document per id under a repository
//! folder. The interesting parts are the `files` attachment normalizer (three
//! historical encodings, one canonical shape), the deep merge that folds an
//! LLM response into a stored idea without clobbering unrelated fields, and
//! the extractor that materializes embedded file content back onto disk.

pub mod clipboard;
pub mod commands;
pub mod extract;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod query;
pub mod store;
pub mod vcs;
