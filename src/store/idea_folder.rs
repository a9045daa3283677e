// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::model::{Document, IdError, IdeaId};

const CONVERSATIONS_DIR: &str = "conversations";
const README_FILENAME: &str = "README.md";
const README_CONTENTS: &str = "# LLM Conversations Repository\n\nManaged by ideabank\n";

/// Default repository location relative to the working directory.
pub const DEFAULT_REPO_DIR: &str = ".ideas_repo";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    NotFound {
        id: IdeaId,
    },
    InvalidId {
        value: String,
        source: Box<IdError>,
    },
    InvalidRelativePath {
        field: &'static str,
        value: PathBuf,
    },
    PathOutsideRepo {
        repo_root: PathBuf,
        path: PathBuf,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::NotFound { id } => write!(f, "no conversation found with id {id:?}"),
            Self::InvalidId { value, source } => {
                write!(f, "invalid idea id {value:?}: {source}")
            }
            Self::InvalidRelativePath { field, value } => {
                write!(f, "invalid relative path for {field}: {value:?}")
            }
            Self::PathOutsideRepo { repo_root, path } => write!(
                f,
                "path is outside ideas repository: repo_root={repo_root:?} path={path:?}"
            ),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::NotFound { .. } => None,
            Self::InvalidId { source, .. } => Some(source),
            Self::InvalidRelativePath { .. } => None,
            Self::PathOutsideRepo { .. } => None,
            Self::SymlinkRefused { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// One ideas repository on disk.
///
/// There is no cross-process locking: two concurrent updates to the same idea
/// are a lost-update hazard, accepted because the backing git history is the
/// recovery path.
#[derive(Debug, Clone)]
pub struct IdeaFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl IdeaFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn conversations_dir(&self) -> PathBuf {
        self.root.join(CONVERSATIONS_DIR)
    }

    pub fn idea_path(&self, id: &IdeaId) -> PathBuf {
        self.conversations_dir().join(format!("{id}.json"))
    }

    pub fn is_initialized(&self) -> bool {
        self.root.is_dir()
    }

    /// Creates the repository skeleton (root, `conversations/`, README).
    /// Idempotent; never touches an existing README.
    pub fn bootstrap(&self) -> Result<(), StoreError> {
        let conversations_dir = self.conversations_dir();
        fs::create_dir_all(&conversations_dir).map_err(|source| StoreError::Io {
            path: conversations_dir,
            source,
        })?;

        let readme_path = self.root.join(README_FILENAME);
        if !readme_path.exists() {
            write_atomic_in_repo(
                &self.root,
                &readme_path,
                README_CONTENTS.as_bytes(),
                self.durability,
            )?;
        }

        Ok(())
    }

    pub fn load(&self, id: &IdeaId) -> Result<Document, StoreError> {
        let idea_path = self.idea_path(id);
        let idea_str = match fs::read_to_string(&idea_path) {
            Ok(idea_str) => idea_str,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { id: id.clone() });
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: idea_path,
                    source,
                });
            }
        };

        let doc: Document = serde_json::from_str(&idea_str).map_err(|source| StoreError::Json {
            path: idea_path,
            source,
        })?;

        Ok(doc)
    }

    pub fn save(&self, id: &IdeaId, doc: &Document) -> Result<(), StoreError> {
        let idea_path = self.idea_path(id);
        let doc_str = serde_json::to_string_pretty(&Value::Object(doc.clone())).map_err(
            |source| StoreError::Json {
                path: idea_path.clone(),
                source,
            },
        )?;

        write_atomic_in_repo(
            &self.root,
            &idea_path,
            format!("{doc_str}\n").as_bytes(),
            self.durability,
        )
    }

    pub fn exists(&self, id: &IdeaId) -> bool {
        self.idea_path(id).is_file()
    }

    /// Ids of every stored conversation, sorted. A missing `conversations/`
    /// directory is an empty repository, not an error.
    pub fn list_ids(&self) -> Result<Vec<IdeaId>, StoreError> {
        let conversations_dir = self.conversations_dir();
        let entries = match fs::read_dir(&conversations_dir) {
            Ok(entries) => entries,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: conversations_dir,
                    source,
                });
            }
        };

        let mut ids = Vec::new();
        for entry in entries.filter_map(|entry| entry.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(stem) = file_name.strip_suffix(".json") else {
                continue;
            };
            let id = IdeaId::new(stem).map_err(|source| StoreError::InvalidId {
                value: stem.to_owned(),
                source: Box::new(source),
            })?;
            ids.push(id);
        }

        ids.sort();
        Ok(ids)
    }
}

fn validate_relative_path(field: &'static str, relative: &Path) -> Result<(), StoreError> {
    let all_normal = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if all_normal {
        Ok(())
    } else {
        Err(StoreError::InvalidRelativePath {
            field,
            value: relative.to_path_buf(),
        })
    }
}

fn to_relative_path(
    repo_root: &Path,
    path: &Path,
    field: &'static str,
) -> Result<PathBuf, StoreError> {
    let relative = if path.is_absolute() {
        path.strip_prefix(repo_root)
            .map(PathBuf::from)
            .map_err(|_| StoreError::PathOutsideRepo {
                repo_root: repo_root.to_path_buf(),
                path: path.to_path_buf(),
            })?
    } else {
        path.to_path_buf()
    };

    validate_relative_path(field, &relative)?;
    Ok(relative)
}

fn create_dir_all_safe(repo_root: &Path, relative: &Path) -> Result<(), StoreError> {
    if relative.as_os_str().is_empty() {
        return Ok(());
    }

    validate_relative_path("dir", relative)?;

    let mut current = repo_root.to_path_buf();
    for component in relative.components() {
        let Component::Normal(part) = component else {
            continue;
        };

        current.push(part);

        match fs::symlink_metadata(&current) {
            Ok(md) => {
                if md.file_type().is_symlink() {
                    return Err(StoreError::SymlinkRefused { path: current });
                }
                if !md.is_dir() {
                    return Err(StoreError::Io {
                        path: current,
                        source: io::Error::new(io::ErrorKind::AlreadyExists, "expected directory"),
                    });
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::create_dir(&current).map_err(|source| StoreError::Io {
                    path: current.clone(),
                    source,
                })?;
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: current,
                    source,
                })
            }
        }
    }

    Ok(())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic_in_repo(
    repo_root: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    fs::create_dir_all(repo_root).map_err(|source| StoreError::Io {
        path: repo_root.to_path_buf(),
        source,
    })?;

    let relative = to_relative_path(repo_root, path, "path")?;
    let parent_rel = relative.parent().unwrap_or_else(|| Path::new(""));
    create_dir_all_safe(repo_root, parent_rel)?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "path has no parent"),
        });
    };

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".ideabank.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    file.write_all(contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
