// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};
use serde_json::json;

use super::{IdeaFolder, StoreError};
use crate::model::{new_document, Document, IdeaId};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("ideabank-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct IdeaFolderTestCtx {
    tmp: TempDir,
    folder: IdeaFolder,
}

impl IdeaFolderTestCtx {
    fn new(prefix: &str) -> Self {
        let tmp = TempDir::new(prefix);
        let folder = IdeaFolder::new(tmp.path().join(".ideas_repo"));
        folder.bootstrap().unwrap();
        Self { tmp, folder }
    }
}

#[fixture]
fn ctx() -> IdeaFolderTestCtx {
    IdeaFolderTestCtx::new("idea-folder")
}

fn sample_id(value: &str) -> IdeaId {
    IdeaId::new(value).unwrap()
}

#[rstest]
fn bootstrap_creates_skeleton_idempotently(ctx: IdeaFolderTestCtx) {
    let folder = &ctx.folder;
    assert!(folder.conversations_dir().is_dir());
    let readme = folder.root().join("README.md");
    assert!(readme.is_file());

    fs::write(&readme, "customized").unwrap();
    folder.bootstrap().unwrap();
    assert_eq!(fs::read_to_string(&readme).unwrap(), "customized");
}

#[rstest]
fn save_then_load_round_trips(ctx: IdeaFolderTestCtx) {
    let id = sample_id("ab12cd34");
    let doc = new_document(&id, "Subject", "Body");

    ctx.folder.save(&id, &doc).unwrap();
    let loaded = ctx.folder.load(&id).unwrap();
    assert_eq!(loaded, doc);
}

#[rstest]
fn saved_documents_are_pretty_printed_with_trailing_newline(ctx: IdeaFolderTestCtx) {
    let id = sample_id("ab12cd34");
    ctx.folder.save(&id, &new_document(&id, "S", "B")).unwrap();

    let raw = fs::read_to_string(ctx.folder.idea_path(&id)).unwrap();
    assert!(raw.contains("\n  \"subject\""), "expected pretty-printed JSON, got: {raw}");
    assert!(raw.ends_with('\n'));
}

#[rstest]
fn load_missing_id_is_not_found(ctx: IdeaFolderTestCtx) {
    let err = ctx.folder.load(&sample_id("deadbeef")).unwrap_err();
    match err {
        StoreError::NotFound { id } => assert_eq!(id.as_str(), "deadbeef"),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[rstest]
fn load_rejects_non_object_documents(ctx: IdeaFolderTestCtx) {
    let id = sample_id("ab12cd34");
    fs::write(ctx.folder.idea_path(&id), "[1, 2, 3]\n").unwrap();

    let err = ctx.folder.load(&id).unwrap_err();
    match err {
        StoreError::Json { .. } => {}
        other => panic!("expected Json, got: {other:?}"),
    }
}

#[rstest]
fn load_accepts_legacy_string_map_files(ctx: IdeaFolderTestCtx) {
    let id = sample_id("ab12cd34");
    let legacy = json!({
        "id": "ab12cd34",
        "subject": "S",
        "body": "B",
        "files": {"x.py": "print(1)"}
    });
    fs::write(ctx.folder.idea_path(&id), serde_json::to_string_pretty(&legacy).unwrap()).unwrap();

    let doc: Document = ctx.folder.load(&id).unwrap();
    assert_eq!(doc["files"]["x.py"], json!("print(1)"));
}

#[rstest]
fn list_ids_is_sorted_and_skips_non_json(ctx: IdeaFolderTestCtx) {
    for value in ["zz99", "aa00", "mm55"] {
        let id = sample_id(value);
        ctx.folder.save(&id, &new_document(&id, "S", "B")).unwrap();
    }
    fs::write(ctx.folder.conversations_dir().join("notes.txt"), "ignored").unwrap();

    let ids = ctx.folder.list_ids().unwrap();
    let values: Vec<_> = ids.iter().map(IdeaId::as_str).collect();
    assert_eq!(values, ["aa00", "mm55", "zz99"]);
}

#[test]
fn list_ids_on_missing_conversations_dir_is_empty() {
    let tmp = TempDir::new("idea-folder-empty");
    let folder = IdeaFolder::new(tmp.path().join(".ideas_repo"));
    assert!(folder.list_ids().unwrap().is_empty());
}

#[test]
fn is_initialized_reflects_the_root_dir() {
    let tmp = TempDir::new("idea-folder-init");
    let folder = IdeaFolder::new(tmp.path().join(".ideas_repo"));
    assert!(!folder.is_initialized());
    folder.bootstrap().unwrap();
    assert!(folder.is_initialized());
}

#[rstest]
fn save_leaves_no_temp_files_behind(ctx: IdeaFolderTestCtx) {
    let id = sample_id("ab12cd34");
    ctx.folder.save(&id, &new_document(&id, "S", "B")).unwrap();
    ctx.folder.save(&id, &new_document(&id, "S2", "B2")).unwrap();

    let leftovers: Vec<_> = fs::read_dir(ctx.folder.conversations_dir())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(".ideabank.tmp."))
        .collect();
    assert!(leftovers.is_empty(), "leftover temp files: {leftovers:?}");
}

#[cfg(unix)]
#[rstest]
fn save_refuses_to_write_through_a_symlink(ctx: IdeaFolderTestCtx) {
    let id = sample_id("ab12cd34");
    let outside = ctx.tmp.path().join("outside.json");
    fs::write(&outside, "{}").unwrap();
    std::os::unix::fs::symlink(&outside, ctx.folder.idea_path(&id)).unwrap();

    let err = ctx.folder.save(&id, &new_document(&id, "S", "B")).unwrap_err();
    match err {
        StoreError::SymlinkRefused { .. } => {}
        other => panic!("expected SymlinkRefused, got: {other:?}"),
    }
}
