// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rubocopfmt auto-formats Ruby source files using RuboCop's auto-correction.
//!
//! Sources are read from the paths given on the command line, or from STDIN
//! when no path is given, and fed one by one through the `rubocop`
//! executable. The corrected result is reported in one of four modes:
//!
//! - default: print the corrected source to STDOUT
//! - `--diff`: display diffs between original and corrected source
//!   (`--diff-format` selects unified, rcs or context output)
//! - `--list`: list the files whose formatting is incorrect
//! - `--write`: overwrite each file with its corrected source
//!
//! All correction logic is owned by RuboCop; this program marshals sources
//! in and out of it and renders the outcome. A usage error or any failure
//! (missing file, engine failure) aborts the whole run with exit code 1;
//! exit code 0 means the run completed, corrections or not.

mod args;
mod corrector;
mod diff;
mod error;
mod fmt;
mod source;

use clap::Parser;
use clap::error::ErrorKind;

use crate::args::Cli;
use crate::fmt::run_fmt;

fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // clap exits 2 on usage errors by default; remap to 1
            let rc = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(rc);
        }
    };
    std::process::exit(run_fmt(&args));
}
