// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Best-effort system clipboard access.
//!
//! Nothing in the core depends on the clipboard succeeding; command handlers
//! downgrade any error here to a warning and carry on.

use std::fmt;

#[derive(Debug)]
pub enum ClipboardError {
    Unavailable { source: arboard::Error },
    Read { source: arboard::Error },
    Write { source: arboard::Error },
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { source } => write!(f, "clipboard unavailable: {source}"),
            Self::Read { source } => write!(f, "cannot read clipboard: {source}"),
            Self::Write { source } => write!(f, "cannot write clipboard: {source}"),
        }
    }
}

impl std::error::Error for ClipboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unavailable { source } | Self::Read { source } | Self::Write { source } => {
                Some(source)
            }
        }
    }
}

pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|source| ClipboardError::Unavailable { source })?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|source| ClipboardError::Write { source })
}

pub fn paste_text() -> Result<String, ClipboardError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|source| ClipboardError::Unavailable { source })?;
    clipboard
        .get_text()
        .map_err(|source| ClipboardError::Read { source })
}
