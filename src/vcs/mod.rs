// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Best-effort git invocation for the ideas repository.
//!
//! Git is the repository's durability and history layer, not a correctness
//! dependency: command handlers log a failure here and continue.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

#[derive(Debug)]
pub enum VcsError {
    Spawn {
        action: &'static str,
        source: io::Error,
    },
    Failed {
        action: &'static str,
        stderr: String,
    },
}

impl fmt::Display for VcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { action, source } => write!(f, "cannot run git {action}: {source}"),
            Self::Failed { action, stderr } => {
                let stderr = stderr.trim_end();
                write!(f, "git {action} failed: {stderr}")
            }
        }
    }
}

impl std::error::Error for VcsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::Failed { .. } => None,
        }
    }
}

pub fn is_repository(repo_root: &Path) -> bool {
    repo_root.join(".git").exists()
}

pub fn init(repo_root: &Path) -> Result<(), VcsError> {
    run_git(repo_root, &["init"], "init").map(|_| ())
}

pub fn stage_all(repo_root: &Path) -> Result<(), VcsError> {
    run_git(repo_root, &["add", "."], "add").map(|_| ())
}

/// Whether `git commit` would have anything to record.
///
/// `git diff --cached --quiet` exits 1 when the index differs from HEAD.
pub fn has_staged_changes(repo_root: &Path) -> Result<bool, VcsError> {
    let status = Command::new("git")
        .args(["diff", "--cached", "--quiet"])
        .current_dir(repo_root)
        .status()
        .map_err(|source| VcsError::Spawn {
            action: "diff",
            source,
        })?;
    Ok(!status.success())
}

pub fn commit(repo_root: &Path, message: &str) -> Result<(), VcsError> {
    run_git(repo_root, &["commit", "-m", message], "commit").map(|_| ())
}

pub fn status_output(repo_root: &Path) -> Result<String, VcsError> {
    let output = run_git(repo_root, &["status"], "status")?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}

fn run_git(repo_root: &Path, args: &[&str], action: &'static str) -> Result<Vec<u8>, VcsError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_root)
        .output()
        .map_err(|source| VcsError::Spawn { action, source })?;

    if !output.status.success() {
        return Err(VcsError::Failed {
            action,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(output.stdout)
}
