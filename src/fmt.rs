// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Auto-correct sources and render the result.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::{
    args::{Cli, Mode},
    corrector::{RuboCop, rubocop_version},
    diff::{DiffFormat, render_diff},
    error::Error,
    source::{Source, load_sources},
};

/// Label shown for a STDIN source in diff output.
const STDIN_LABEL: &str = "stdin";

/// Run the formatter and return the process exit code.
pub fn run_fmt(args: &Cli) -> i32 {
    match run(args) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}: {err}", "Error".bright_red().bold());
            1
        }
    }
}

/// The single pass over all sources: load, auto-correct in input order,
/// render by mode. The first failure aborts the run.
fn run(args: &Cli) -> Result<(), Error> {
    if args.version {
        print_version();
        return Ok(());
    }
    let mode = args.mode();
    require_real_files(mode, args)?;
    let corrector = RuboCop::new(args.src_dir.clone());
    let mut sources = load_sources(&args.paths, args.stdin_file.as_deref())?;
    for source in &mut sources {
        source.auto_correct(&corrector)?;
    }
    match mode {
        Mode::Print => write_stdout(&render_corrected(&sources))?,
        Mode::List => {
            for path in corrected_paths(&sources) {
                println!("{}", path.display());
            }
        }
        Mode::Diff => write_stdout(&render_diffs(
            &sources,
            args.diff_format.unwrap_or_default(),
        ))?,
        Mode::Write => write_corrected(&sources)?,
    }
    Ok(())
}

/// List and write modes only make sense with real files on disk.
fn require_real_files(mode: Mode, args: &Cli) -> Result<(), Error> {
    let flag = match mode {
        Mode::List => "--list",
        Mode::Write => "--write",
        Mode::Print | Mode::Diff => return Ok(()),
    };
    if args.paths.is_empty() {
        return Err(Error::PathsRequired(flag));
    }
    Ok(())
}

fn write_stdout(bytes: &[u8]) -> Result<(), Error> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes).map_err(Error::Stdout)?;
    stdout.flush().map_err(Error::Stdout)
}

/// Concatenate the corrected output of every source, in input order.
fn render_corrected(sources: &[Source]) -> Vec<u8> {
    let mut out = Vec::new();
    for source in sources {
        out.extend_from_slice(&source.output);
    }
    out
}

/// Paths of the sources whose formatting was incorrect, in input order.
fn corrected_paths(sources: &[Source]) -> Vec<&Path> {
    sources
        .iter()
        .filter(|source| source.corrected())
        .filter_map(|source| source.path.as_deref())
        .collect()
}

/// Render a diff for every corrected source, each preceded by a header
/// line naming the file (STDIN sources carry no header line).
fn render_diffs(sources: &[Source], format: DiffFormat) -> Vec<u8> {
    let mut out = Vec::new();
    for source in sources.iter().filter(|source| source.corrected()) {
        let from = match &source.path {
            Some(path) => {
                let path = path.display().to_string();
                out.extend_from_slice(format!("diff {path} rubocopfmt/{path}\n").as_bytes());
                path
            }
            None => STDIN_LABEL.to_string(),
        };
        let to = format!("rubocopfmt/{from}");
        out.extend_from_slice(&render_diff(
            format,
            &source.input,
            &source.output,
            &from,
            &to,
        ));
    }
    out
}

/// Overwrite each corrected source's file with its corrected output.
fn write_corrected(sources: &[Source]) -> Result<(), Error> {
    for source in sources.iter().filter(|source| source.corrected()) {
        if let Some(path) = &source.path {
            fs::write(path, &source.output).map_err(|err| Error::Write {
                path: path.clone(),
                source: err,
            })?;
        }
    }
    Ok(())
}

/// Print the version, including the engine version when available.
fn print_version() {
    match rubocop_version() {
        Ok(engine) => println!("rubocopfmt {} (rubocop {engine})", env!("CARGO_PKG_VERSION")),
        Err(_) => println!("rubocopfmt {}", env!("CARGO_PKG_VERSION")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use clap::Parser;

    use crate::corrector::{Correction, Corrector};

    struct Upcase;

    impl Corrector for Upcase {
        fn correct(&self, input: &[u8], _path: Option<&Path>) -> Result<Correction, Error> {
            let output = input.to_ascii_uppercase();
            Ok(Correction {
                corrected: output != input,
                output,
            })
        }
    }

    fn corrected(input: &[u8], path: Option<&str>) -> Source {
        let mut source = Source::new(input.to_vec(), path.map(PathBuf::from));
        source.auto_correct(&Upcase).unwrap();
        source
    }

    #[test]
    fn test_require_real_files() {
        let args = Cli::try_parse_from(["rubocopfmt", "--list"]).unwrap();
        let err = require_real_files(Mode::List, &args).unwrap_err();
        assert!(matches!(err, Error::PathsRequired("--list")));

        let args = Cli::try_parse_from(["rubocopfmt", "--write"]).unwrap();
        let err = require_real_files(Mode::Write, &args).unwrap_err();
        assert!(matches!(err, Error::PathsRequired("--write")));

        let args = Cli::try_parse_from(["rubocopfmt"]).unwrap();
        assert!(require_real_files(Mode::Print, &args).is_ok());
        assert!(require_real_files(Mode::Diff, &args).is_ok());

        let args = Cli::try_parse_from(["rubocopfmt", "--list", "a.rb"]).unwrap();
        assert!(require_real_files(Mode::List, &args).is_ok());
    }

    #[test]
    fn test_render_corrected_concatenates_in_order() {
        let sources = vec![
            corrected(b"a\n", Some("a.rb")),
            corrected(b"B\n", Some("b.rb")),
            corrected(b"c\n", Some("c.rb")),
        ];
        assert_eq!(render_corrected(&sources), b"A\nB\nC\n");
    }

    #[test]
    fn test_corrected_paths_skips_unchanged() {
        let sources = vec![
            corrected(b"a\n", Some("a.rb")),
            corrected(b"B\n", Some("b.rb")),
            corrected(b"c\n", Some("c.rb")),
        ];
        assert_eq!(
            corrected_paths(&sources),
            vec![Path::new("a.rb"), Path::new("c.rb")]
        );
    }

    #[test]
    fn test_render_diffs_headers() {
        let sources = vec![
            corrected(b"a\n", Some("a.rb")),
            corrected(b"B\n", Some("b.rb")),
            corrected(b"c\n", Some("c.rb")),
        ];
        let out = String::from_utf8(render_diffs(&sources, DiffFormat::Unified)).unwrap();
        assert!(out.contains("diff a.rb rubocopfmt/a.rb\n"));
        assert!(!out.contains("diff b.rb"));
        assert!(out.contains("diff c.rb rubocopfmt/c.rb\n"));
        assert!(out.contains("--- a.rb\n+++ rubocopfmt/a.rb\n"));
    }

    #[test]
    fn test_render_diffs_stdin() {
        let sources = vec![corrected(b"a\n", None)];
        let out = String::from_utf8(render_diffs(&sources, DiffFormat::Unified)).unwrap();
        assert!(!out.contains("diff "));
        assert!(out.starts_with("--- stdin\n+++ rubocopfmt/stdin\n"));
    }

    #[test]
    fn test_render_diffs_unchanged_source_is_silent() {
        let sources = vec![corrected(b"A\n", Some("a.rb"))];
        assert!(render_diffs(&sources, DiffFormat::Unified).is_empty());
    }

    #[test]
    fn test_write_corrected() {
        let dir = tempfile::tempdir().unwrap();
        let changed = dir.path().join("a.rb");
        let unchanged = dir.path().join("b.rb");
        fs::write(&changed, b"a\n").unwrap();
        fs::write(&unchanged, b"B\n").unwrap();

        let sources = vec![
            corrected(b"a\n", changed.to_str()),
            corrected(b"B\n", unchanged.to_str()),
        ];
        write_corrected(&sources).unwrap();
        assert_eq!(fs::read(&changed).unwrap(), b"A\n");
        assert_eq!(fs::read(&unchanged).unwrap(), b"B\n");
    }

    #[test]
    fn test_write_corrected_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.rb");
        fs::write(&path, b"a\n").unwrap();

        let sources = vec![corrected(b"a\n", path.to_str())];
        write_corrected(&sources).unwrap();

        // a second pass over the rewritten file finds nothing to correct
        let again = corrected(&fs::read(&path).unwrap(), path.to_str());
        assert!(!again.corrected());
        assert!(corrected_paths(&[again]).is_empty());
    }
}
