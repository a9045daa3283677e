// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use ideabank::merge::merge_documents;
use ideabank::model::Document;
use ideabank::normalize::normalize_files;
use ideabank::query::list_file_paths;

fn as_document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => panic!("fixture must be a JSON object"),
    }
}

/// A stored document with `file_count` attachments in the canonical list shape
/// plus a response carrying approaches and code samples.
fn stored_document(file_count: usize) -> Document {
    let files: Vec<Value> = (0..file_count)
        .map(|i| {
            json!({
                "name": format!("module_{i}.py"),
                "path": "src",
                "content": format!("def handler_{i}():\n    return {i}\n")
            })
        })
        .collect();

    as_document(json!({
        "id": "ab12cd34",
        "subject": "Benchmark idea",
        "body": "A reasonably sized conversation document.",
        "files": files,
        "response": {
            "conclusion": "iterate",
            "approaches": [
                {
                    "name": "first pass",
                    "code_samples": [
                        {"file": "src/first.py", "code": "pass"},
                        {"file": "src/second.py", "code": "pass"}
                    ]
                }
            ]
        }
    }))
}

/// An update payload whose files arrive in the key-embedded mapping shape,
/// half overlapping the stored attachments.
fn update_payload(file_count: usize) -> Document {
    let mut files = serde_json::Map::new();
    for i in (file_count / 2)..(file_count + file_count / 2) {
        files.insert(
            format!("src/module_{i}.py"),
            Value::String(format!("def handler_{i}():\n    return {i} + 1\n")),
        );
    }

    as_document(json!({
        "response": {
            "conclusion": "revised",
            "files": files
        }
    }))
}

// Benchmark identity (keep stable):
// - Group names in this file: `merge.documents`, `normalize.files`, `query.paths`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `overlap_small`, `mapping_medium`).
// - If implementations move/deduplicate, update the wiring but do not rename
//   group or case IDs.
fn benches_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge.documents");
    for (case, file_count) in [("overlap_small", 8), ("overlap_medium", 128)] {
        let existing = stored_document(file_count);
        let incoming = update_payload(file_count);
        group.bench_function(case, move |b| {
            b.iter(|| black_box(merge_documents(black_box(&existing), black_box(&incoming))))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("normalize.files");
    for (case, file_count) in [("mapping_small", 8), ("mapping_medium", 128)] {
        let payload = update_payload(file_count);
        let raw = payload["response"]["files"].clone();
        group.bench_function(case, move |b| {
            b.iter(|| black_box(normalize_files(black_box(Some(&raw)))))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("query.paths");
    for (case, file_count) in [("list_small", 8), ("list_medium", 128)] {
        let existing = stored_document(file_count);
        let incoming = update_payload(file_count);
        let merged = merge_documents(&existing, &incoming);
        group.bench_function(case, move |b| {
            b.iter(|| black_box(list_file_paths(black_box(&merged))))
        });
    }
    group.finish();
}

criterion_group!(benches, benches_merge);
criterion_main!(benches);
