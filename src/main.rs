// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ideabank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ideabank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ideabank CLI entrypoint.
//!
//! Each invocation runs exactly one subcommand against the ideas repository
//! (`.ideas_repo` in the current directory unless `--path` says otherwise).

use std::path::{Path, PathBuf};

use ideabank::commands::{self, CommandContext};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} init [--path <dir>]\n  {program} status [--path <dir>]\n  {program} add [--path <dir>] [--durable-writes]\n  {program} list [--path <dir>]\n  {program} show --id <id> [--path <dir>]\n  {program} enquire --id <id> [--prompt <text>] [--path <dir>]\n  {program} update --id <id> [--path <dir>] [--durable-writes]\n  {program} list-files --id <id> [--path <dir>]\n  {program} extract-files --id <id> [--into <dir>] [--path <dir>]\n\n`add` reads the idea from stdin (first line = subject, rest = body).\n`update` reads a JSON response from stdin, or from the clipboard when stdin is a terminal.\n\n--path selects the directory containing `.ideas_repo` (default: current directory).\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CliCommand {
    Init,
    Status,
    Add,
    List,
    Show { id: String },
    Enquire { id: String, prompt: Option<String> },
    Update { id: String },
    ListFiles { id: String },
    ExtractFiles { id: String, into: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    command: CliCommand,
    path: Option<String>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let command_name = args.next().ok_or(())?;

    let mut path: Option<String> = None;
    let mut durable_writes = false;
    let mut id: Option<String> = None;
    let mut prompt: Option<String> = None;
    let mut into: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--path" => {
                if path.is_some() {
                    return Err(());
                }
                path = Some(args.next().ok_or(())?);
            }
            "--durable-writes" => {
                if durable_writes {
                    return Err(());
                }
                durable_writes = true;
            }
            "--id" => {
                if id.is_some() {
                    return Err(());
                }
                id = Some(args.next().ok_or(())?);
            }
            "--prompt" => {
                if prompt.is_some() {
                    return Err(());
                }
                prompt = Some(args.next().ok_or(())?);
            }
            "--into" => {
                if into.is_some() {
                    return Err(());
                }
                into = Some(args.next().ok_or(())?);
            }
            _ => return Err(()),
        }
    }

    let command = match command_name.as_str() {
        "init" => CliCommand::Init,
        "status" => CliCommand::Status,
        "add" => CliCommand::Add,
        "list" => CliCommand::List,
        "show" => CliCommand::Show { id: id.take().ok_or(())? },
        "enquire" => CliCommand::Enquire { id: id.take().ok_or(())?, prompt: prompt.take() },
        "update" => CliCommand::Update { id: id.take().ok_or(())? },
        "list-files" => CliCommand::ListFiles { id: id.take().ok_or(())? },
        "extract-files" => {
            CliCommand::ExtractFiles { id: id.take().ok_or(())?, into: into.take() }
        }
        _ => return Err(()),
    };

    // Options not consumed by the chosen subcommand are usage errors.
    if id.is_some() || prompt.is_some() || into.is_some() {
        return Err(());
    }

    Ok(CliOptions { command, path, durable_writes })
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "ideabank".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    let ctx = CommandContext::new(options.path.map(PathBuf::from), options.durable_writes);

    let result = match options.command {
        CliCommand::Init => commands::init(&ctx),
        CliCommand::Status => commands::status(&ctx),
        CliCommand::Add => commands::add(&ctx),
        CliCommand::List => commands::list(&ctx),
        CliCommand::Show { id } => commands::show(&ctx, &id),
        CliCommand::Enquire { id, prompt } => commands::enquire(&ctx, &id, prompt.as_deref()),
        CliCommand::Update { id } => commands::update(&ctx, &id),
        CliCommand::ListFiles { id } => commands::list_files(&ctx, &id),
        CliCommand::ExtractFiles { id, into } => {
            commands::extract_files(&ctx, &id, into.as_deref().map(Path::new))
        }
    };

    if let Err(err) = result {
        eprintln!("ideabank: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliCommand};

    fn parse(args: &[&str]) -> Result<super::CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn rejects_empty_args() {
        parse(&[]).unwrap_err();
    }

    #[test]
    fn parses_bare_subcommands() {
        for (name, command) in [
            ("init", CliCommand::Init),
            ("status", CliCommand::Status),
            ("add", CliCommand::Add),
            ("list", CliCommand::List),
        ] {
            let options = parse(&[name]).expect("parse options");
            assert_eq!(options.command, command);
            assert_eq!(options.path, None);
            assert!(!options.durable_writes);
        }
    }

    #[test]
    fn parses_path_and_durable_writes() {
        let options = parse(&["add", "--path", "some/dir", "--durable-writes"])
            .expect("parse options");
        assert_eq!(options.command, CliCommand::Add);
        assert_eq!(options.path.as_deref(), Some("some/dir"));
        assert!(options.durable_writes);
    }

    #[test]
    fn parses_show_with_id() {
        let options = parse(&["show", "--id", "ab12cd34"]).expect("parse options");
        assert_eq!(options.command, CliCommand::Show { id: "ab12cd34".to_owned() });
    }

    #[test]
    fn parses_enquire_with_optional_prompt() {
        let options = parse(&["enquire", "--id", "ab12cd34"]).expect("parse options");
        assert_eq!(
            options.command,
            CliCommand::Enquire { id: "ab12cd34".to_owned(), prompt: None }
        );

        let options = parse(&["enquire", "--id", "ab12cd34", "--prompt", "Rate this."])
            .expect("parse options");
        assert_eq!(
            options.command,
            CliCommand::Enquire {
                id: "ab12cd34".to_owned(),
                prompt: Some("Rate this.".to_owned()),
            }
        );
    }

    #[test]
    fn parses_extract_files_with_target_dir() {
        let options = parse(&["extract-files", "--id", "ab12cd34", "--into", "out"])
            .expect("parse options");
        assert_eq!(
            options.command,
            CliCommand::ExtractFiles { id: "ab12cd34".to_owned(), into: Some("out".to_owned()) }
        );
    }

    #[test]
    fn flags_parse_in_any_order() {
        let options = parse(&["update", "--durable-writes", "--id", "ab12cd34"])
            .expect("parse options");
        assert_eq!(options.command, CliCommand::Update { id: "ab12cd34".to_owned() });
        assert!(options.durable_writes);
    }

    #[test]
    fn rejects_missing_id_where_required() {
        for name in ["show", "enquire", "update", "list-files", "extract-files"] {
            parse(&[name]).unwrap_err();
        }
    }

    #[test]
    fn rejects_id_on_commands_that_take_none() {
        parse(&["list", "--id", "ab12cd34"]).unwrap_err();
    }

    #[test]
    fn rejects_prompt_outside_enquire() {
        parse(&["show", "--id", "ab12cd34", "--prompt", "x"]).unwrap_err();
    }

    #[test]
    fn rejects_into_outside_extract_files() {
        parse(&["list-files", "--id", "ab12cd34", "--into", "out"]).unwrap_err();
    }

    #[test]
    fn rejects_unknown_subcommand_and_flags() {
        parse(&["frobnicate"]).unwrap_err();
        parse(&["list", "--nope"]).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse(&["show", "--id", "a1", "--id", "b2"]).unwrap_err();
        parse(&["add", "--durable-writes", "--durable-writes"]).unwrap_err();
        parse(&["add", "--path", ".", "--path", "other"]).unwrap_err();
    }

    #[test]
    fn rejects_missing_flag_values() {
        parse(&["show", "--id"]).unwrap_err();
        parse(&["add", "--path"]).unwrap_err();
    }
}
