// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end flow over the library surface: bootstrap a repository, save an
//! idea, merge an LLM response into it, then list and extract the embedded
//! files. Git and clipboard are deliberately out of scope here.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::json;

use ideabank::extract::extract_files;
use ideabank::merge::merge_documents;
use ideabank::model::{new_document, IdeaId};
use ideabank::query::list_file_paths;
use ideabank::store::IdeaFolder;

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("ideabank-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[test]
fn idea_round_trip_with_response_merge_and_extraction() {
    let tmp = TempDir::new("flow");
    let folder = IdeaFolder::new(tmp.path().join(".ideas_repo"));
    folder.bootstrap().unwrap();

    let id = IdeaId::new("ab12cd34").unwrap();
    let doc = new_document(&id, "CLI sketch", "A small tool that scaffolds projects.");
    folder.save(&id, &doc).unwrap();

    // An LLM answer carrying files in the legacy key-embedded mapping shape.
    let response = json!({
        "response": {
            "conclusion": "worth building",
            "files": {
                "src/main.py": "print('hello')",
                "README.md": "# scaffold\n"
            }
        }
    });
    let response_doc = match response {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };

    let merged = merge_documents(&folder.load(&id).unwrap(), &response_doc);
    folder.save(&id, &merged).unwrap();

    let reloaded = folder.load(&id).unwrap();
    assert_eq!(reloaded["subject"], json!("CLI sketch"));
    assert_eq!(reloaded["response"]["conclusion"], json!("worth building"));

    let paths = list_file_paths(&reloaded);
    assert_eq!(paths, ["README.md", "src/main.py"]);

    let out = tmp.path().join("out");
    let report = extract_files(&reloaded, &out);
    assert_eq!(report.len(), 2);
    for written in &report {
        written.outcome().unwrap();
    }

    assert_eq!(fs::read_to_string(out.join("src/main.py")).unwrap(), "print('hello')");
    assert_eq!(fs::read_to_string(out.join("README.md")).unwrap(), "# scaffold\n");
}

#[test]
fn second_update_refines_without_clobbering_the_first() {
    let tmp = TempDir::new("flow-refine");
    let folder = IdeaFolder::new(tmp.path().join(".ideas_repo"));
    folder.bootstrap().unwrap();

    let id = IdeaId::new("deadbeef").unwrap();
    folder.save(&id, &new_document(&id, "Parser", "Tokenize first.")).unwrap();

    let first = json!({
        "response": {
            "approaches": [{"name": "recursive descent"}],
            "files": [{"name": "lexer.py", "path": "src", "content": "pass"}]
        }
    });
    let second = json!({
        "response": {
            "conclusion": "start with the lexer",
            "files": {"parser.py": {"path": "src", "content": "pass"}}
        }
    });

    let mut doc = folder.load(&id).unwrap();
    for update in [first, second] {
        let update_doc = match update {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        doc = merge_documents(&doc, &update_doc);
        folder.save(&id, &doc).unwrap();
    }

    let reloaded = folder.load(&id).unwrap();
    assert_eq!(reloaded["response"]["approaches"], json!([{"name": "recursive descent"}]));
    assert_eq!(reloaded["response"]["conclusion"], json!("start with the lexer"));
    assert_eq!(list_file_paths(&reloaded), ["src/lexer.py", "src/parser.py"]);
}
