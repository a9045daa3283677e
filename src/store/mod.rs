// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for idea documents on disk.
//!
//! The store module reads/writes the ideas repository format (one
//! pretty-printed JSON document per idea under `conversations/`). Durability
//! beyond the atomic rename is the backing git repository's concern.

pub mod idea_folder;

pub use idea_folder::{IdeaFolder, StoreError, WriteDurability, DEFAULT_REPO_DIR};
