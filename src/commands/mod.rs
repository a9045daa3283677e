// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command handlers behind the CLI surface.
//!
//! Handlers are thin glue: resolve the repository, call into the core
//! (normalize/merge/query/extract), persist through the store, and degrade
//! clipboard/git failures to warnings. All user-facing printing happens here.

use std::fmt;
use std::io;
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::clipboard::{self, ClipboardError};
use crate::extract;
use crate::merge::merge_documents;
use crate::model::{
    doc_subject, new_document, Document, IdError, IdeaId, BODY_KEY, FILES_KEY, ID_KEY,
    RESPONSE_KEY, SUBJECT_KEY,
};
use crate::normalize::normalize_files;
use crate::query::list_file_paths;
use crate::store::{IdeaFolder, StoreError, WriteDurability, DEFAULT_REPO_DIR};
use crate::vcs::{self, VcsError};

const DEFAULT_ENQUIRY_PROMPT: &str = "Please provide feedback on this idea.";
const ENQUIRY_GROUND_RULES: &str = "Please structure your answer strictly in valid JSON, \
     including 'approaches' and 'conclusion' fields.";

#[derive(Debug)]
pub enum CommandError {
    MissingRepository {
        path: PathBuf,
    },
    NotAGitRepository {
        path: PathBuf,
    },
    IdeaNotFound {
        id: IdeaId,
    },
    InvalidId {
        value: String,
        source: Box<IdError>,
    },
    EmptyInput,
    MissingSubjectOrBody,
    InvalidJson {
        source: serde_json::Error,
    },
    Clipboard {
        source: ClipboardError,
    },
    Vcs {
        source: VcsError,
    },
    Store {
        source: StoreError,
    },
    Io {
        source: io::Error,
    },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRepository { path } => write!(
                f,
                "no ideas repository found at {path:?}; initialize one with 'ideabank init'"
            ),
            Self::NotAGitRepository { path } => {
                write!(f, "directory {path:?} exists but is not a git repository")
            }
            Self::IdeaNotFound { id } => write!(f, "no conversation found with id {id:?}"),
            Self::InvalidId { value, source } => write!(f, "invalid idea id {value:?}: {source}"),
            Self::EmptyInput => f.write_str("no input provided"),
            Self::MissingSubjectOrBody => f.write_str("both subject and body are required"),
            Self::InvalidJson { source } => write!(f, "input is not valid JSON: {source}"),
            Self::Clipboard { source } => write!(f, "{source}"),
            Self::Vcs { source } => write!(f, "{source}"),
            Self::Store { source } => write!(f, "{source}"),
            Self::Io { source } => write!(f, "io error: {source}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidId { source, .. } => Some(source),
            Self::InvalidJson { source } => Some(source),
            Self::Clipboard { source } => Some(source),
            Self::Vcs { source } => Some(source),
            Self::Store { source } => Some(source),
            Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(source: StoreError) -> Self {
        match source {
            StoreError::NotFound { id } => Self::IdeaNotFound { id },
            other => Self::Store { source: other },
        }
    }
}

impl From<io::Error> for CommandError {
    fn from(source: io::Error) -> Self {
        Self::Io { source }
    }
}

/// Where one invocation operates: an optional parent directory for the
/// repository plus the durability choice, resolved once by the CLI and
/// threaded through every handler.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    repo_parent: Option<PathBuf>,
    durable_writes: bool,
}

impl CommandContext {
    pub fn new(repo_parent: Option<PathBuf>, durable_writes: bool) -> Self {
        Self {
            repo_parent,
            durable_writes,
        }
    }

    pub fn repo_root(&self) -> PathBuf {
        match &self.repo_parent {
            Some(parent) => parent.join(DEFAULT_REPO_DIR),
            None => PathBuf::from(DEFAULT_REPO_DIR),
        }
    }

    fn folder(&self) -> IdeaFolder {
        let folder = IdeaFolder::new(self.repo_root());
        if self.durable_writes {
            folder.with_durability(WriteDurability::Durable)
        } else {
            folder
        }
    }

    /// The folder for commands that require an existing repository.
    fn open_folder(&self) -> Result<IdeaFolder, CommandError> {
        let folder = self.folder();
        if !folder.is_initialized() {
            return Err(CommandError::MissingRepository {
                path: folder.root().to_path_buf(),
            });
        }
        Ok(folder)
    }
}

fn warn(message: impl fmt::Display) {
    eprintln!("ideabank: warning: {message}");
}

fn parse_id(value: &str) -> Result<IdeaId, CommandError> {
    IdeaId::new(value).map_err(|source| CommandError::InvalidId {
        value: value.to_owned(),
        source: Box::new(source),
    })
}

pub fn init(ctx: &CommandContext) -> Result<(), CommandError> {
    let folder = ctx.folder();
    let root = folder.root().to_path_buf();

    if folder.is_initialized() {
        if vcs::is_repository(&root) {
            println!("Repository already exists at {}", root.display());
            return Ok(());
        }
        return Err(CommandError::NotAGitRepository { path: root });
    }

    initialize_repository(&folder)?;
    println!("Initialized new ideas repository in {}", root.display());
    Ok(())
}

/// Full first-use setup: store skeleton, `git init`, initial commit.
///
/// Used by `init` and by `add` when it runs against a directory with no
/// repository yet, so capturing an idea never needs a separate `init` first.
fn initialize_repository(folder: &IdeaFolder) -> Result<(), CommandError> {
    folder.bootstrap()?;
    let root = folder.root();
    vcs::init(root).map_err(|source| CommandError::Vcs { source })?;
    vcs::stage_all(root).map_err(|source| CommandError::Vcs { source })?;
    vcs::commit(root, "Initial repository structure")
        .map_err(|source| CommandError::Vcs { source })?;
    Ok(())
}

pub fn status(ctx: &CommandContext) -> Result<(), CommandError> {
    let folder = ctx.open_folder()?;
    let root = folder.root();

    let location = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    println!("\nIdeas Repository Status:\n");
    println!("Location: {}", location.display());
    println!("Number of conversations: {}", folder.list_ids()?.len());

    match vcs::status_output(root) {
        Ok(output) => {
            println!("\nGit Status:");
            println!("{output}");
        }
        Err(err) => warn(err),
    }

    Ok(())
}

pub fn add(ctx: &CommandContext) -> Result<(), CommandError> {
    let folder = ctx.folder();
    if folder.is_initialized() {
        folder.bootstrap()?;
    } else {
        initialize_repository(&folder)?;
    }

    let (subject, body) = read_add_input()?;

    // Re-mint on the unlikely collision with an existing conversation.
    let mut id = IdeaId::mint();
    while folder.exists(&id) {
        id = IdeaId::mint();
    }

    let doc = new_document(&id, subject.clone(), body);
    folder.save(&id, &doc)?;

    commit_best_effort(folder.root(), &format!("Add idea: {id} - {subject}"));

    if let Err(err) = clipboard::copy_text(id.as_str()) {
        warn(err);
    }

    println!("Idea {subject:?} saved as {id}.");
    Ok(())
}

pub fn list(ctx: &CommandContext) -> Result<(), CommandError> {
    let folder = ctx.open_folder()?;

    let mut ideas = Vec::new();
    for id in folder.list_ids()? {
        let doc = folder.load(&id)?;
        let subject = doc_subject(&doc).unwrap_or_default().to_owned();
        ideas.push((id, subject));
    }

    if ideas.is_empty() {
        println!("No ideas found.");
        return Ok(());
    }

    ideas.sort_by_key(|(_, subject)| subject.to_lowercase());
    for (id, subject) in ideas {
        println!("[{id}] {subject}");
    }
    Ok(())
}

pub fn show(ctx: &CommandContext, id: &str) -> Result<(), CommandError> {
    let folder = ctx.open_folder()?;
    let doc = folder.load(&parse_id(id)?)?;
    println!("{}", pretty(&doc)?);
    Ok(())
}

pub fn enquire(ctx: &CommandContext, id: &str, prompt: Option<&str>) -> Result<(), CommandError> {
    let folder = ctx.open_folder()?;
    let doc = folder.load(&parse_id(id)?)?;

    let enquiry = build_enquiry(&doc, prompt);
    let json_str = serde_json::to_string_pretty(&enquiry)
        .map_err(|source| CommandError::InvalidJson { source })?;

    println!("Prepared LLM input:");
    println!("{json_str}");

    match clipboard::copy_text(&json_str) {
        Ok(()) => println!("\nJSON copied to clipboard and ready for pasting to your LLM!"),
        Err(err) => warn(err),
    }

    Ok(())
}

pub fn update(ctx: &CommandContext, id: &str) -> Result<(), CommandError> {
    let folder = ctx.open_folder()?;
    let id = parse_id(id)?;
    let existing = folder.load(&id)?;

    let input = read_update_input()?;
    let payload: Value =
        serde_json::from_str(&input).map_err(|source| CommandError::InvalidJson { source })?;

    warn_skipped_files(&payload);

    let merged = apply_update(&existing, payload);
    folder.save(&id, &merged)?;

    let root = folder.root();
    match stage_and_commit_if_changed(root, &format!("Update idea: {id} with response")) {
        Ok(true) => println!("Successfully updated idea {id}."),
        Ok(false) => println!("No changes to update for idea {id}."),
        Err(err) => {
            warn(err);
            println!("Updated idea {id} (not committed).");
        }
    }

    Ok(())
}

pub fn list_files(ctx: &CommandContext, id: &str) -> Result<(), CommandError> {
    let folder = ctx.open_folder()?;
    let doc = folder.load(&parse_id(id)?)?;

    warn_skipped_document_files(&doc);

    let paths = list_file_paths(&doc);
    if paths.is_empty() {
        println!("No files found in idea response.");
    } else {
        println!("{}", paths.join("\n"));
    }
    Ok(())
}

pub fn extract_files(ctx: &CommandContext, id: &str, into: Option<&Path>) -> Result<(), CommandError> {
    let folder = ctx.open_folder()?;
    let doc = folder.load(&parse_id(id)?)?;

    warn_skipped_document_files(&doc);

    let output_root = into.unwrap_or_else(|| Path::new("."));
    let report = extract::extract_files(&doc, output_root);

    if report.is_empty() {
        println!("No files found to extract.");
        return Ok(());
    }

    for written in &report {
        match written.outcome() {
            Ok(()) => println!("Wrote {} ({} bytes)", written.path().display(), written.bytes()),
            Err(err) => warn(err),
        }
    }
    Ok(())
}

/// Folds an update payload into the stored document.
///
/// A payload carrying any document field is treated as a partial document;
/// anything else (a bare LLM answer, even a non-object) becomes the new
/// `response`.
pub fn apply_update(existing: &Document, payload: Value) -> Document {
    let incoming = classify_update_payload(payload);
    merge_documents(existing, &incoming)
}

fn classify_update_payload(payload: Value) -> Document {
    const DOCUMENT_KEYS: [&str; 5] = [ID_KEY, SUBJECT_KEY, BODY_KEY, FILES_KEY, RESPONSE_KEY];

    match payload {
        Value::Object(map) if map.keys().any(|key| DOCUMENT_KEYS.contains(&key.as_str())) => map,
        other => {
            let mut wrapped = Document::new();
            wrapped.insert(RESPONSE_KEY.to_owned(), other);
            wrapped
        }
    }
}

/// The JSON handed to the LLM: the stored conversation plus the prompt with
/// the ground rules appended. Field order is the serialized order.
#[derive(Debug, Clone, Serialize)]
pub struct Enquiry<'a> {
    conversation: &'a Document,
    prompt: String,
}

pub fn build_enquiry<'a>(doc: &'a Document, prompt: Option<&str>) -> Enquiry<'a> {
    let base = prompt.unwrap_or(DEFAULT_ENQUIRY_PROMPT);
    Enquiry {
        conversation: doc,
        prompt: format!("{base} {ENQUIRY_GROUND_RULES}"),
    }
}

/// Splits piped `add` input: first line is the subject, the rest is the body.
pub fn split_subject_body(input: &str) -> Result<(String, String), CommandError> {
    let mut lines = input.lines();
    let Some(first) = lines.next() else {
        return Err(CommandError::EmptyInput);
    };

    let subject = first.trim().to_owned();
    let body = lines.collect::<Vec<_>>().join("\n").trim().to_owned();

    if subject.is_empty() || body.is_empty() {
        return Err(CommandError::MissingSubjectOrBody);
    }
    Ok((subject, body))
}

fn read_add_input() -> Result<(String, String), CommandError> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        print!("Subject: ");
        io::stdout().flush()?;
        let mut subject = String::new();
        io::stdin().read_line(&mut subject)?;

        println!("Body (end with CTRL+D on empty line):");
        let mut body = String::new();
        stdin.read_to_string(&mut body)?;

        let subject = subject.trim().to_owned();
        let body = body.trim().to_owned();
        if subject.is_empty() || body.is_empty() {
            return Err(CommandError::MissingSubjectOrBody);
        }
        Ok((subject, body))
    } else {
        let mut input = String::new();
        stdin.read_to_string(&mut input)?;
        if input.trim().is_empty() {
            return Err(CommandError::EmptyInput);
        }
        split_subject_body(&input)
    }
}

fn read_update_input() -> Result<String, CommandError> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        println!("No input piped, reading response from clipboard...");
        clipboard::paste_text().map_err(|source| CommandError::Clipboard { source })
    } else {
        let mut input = String::new();
        stdin.read_to_string(&mut input)?;
        Ok(input)
    }
}

fn pretty(doc: &Document) -> Result<String, CommandError> {
    serde_json::to_string_pretty(&Value::Object(doc.clone()))
        .map_err(|source| CommandError::InvalidJson { source })
}

fn commit_best_effort(root: &Path, message: &str) {
    if let Err(err) = vcs::stage_all(root).and_then(|()| vcs::commit(root, message)) {
        warn(err);
    }
}

fn stage_and_commit_if_changed(root: &Path, message: &str) -> Result<bool, VcsError> {
    vcs::stage_all(root)?;
    if !vcs::has_staged_changes(root)? {
        return Ok(false);
    }
    vcs::commit(root, message)?;
    Ok(true)
}

/// Surfaces normalizer diagnostics for the attachment collections of a
/// stored document (root `files` and `response.files`).
fn warn_skipped_document_files(doc: &Document) {
    for raw in [doc.get(FILES_KEY), doc.get(RESPONSE_KEY).and_then(|r| r.get(FILES_KEY))] {
        for skipped in normalize_files(raw).skipped() {
            warn(skipped);
        }
    }
}

/// Same as above, for an incoming update payload of unknown shape.
fn warn_skipped_files(payload: &Value) {
    for raw in [payload.get(FILES_KEY), payload.get(RESPONSE_KEY).and_then(|r| r.get(FILES_KEY))] {
        if raw.is_some() {
            for skipped in normalize_files(raw).skipped() {
                warn(skipped);
            }
        }
    }
}
