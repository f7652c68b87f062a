// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::Parser;

use crate::diff::DiffFormat;

#[derive(Debug, Parser)]
#[command(
    author,
    name = "rubocopfmt",
    about = "Auto-format Ruby source files using RuboCop.",
    after_help = "Reads from STDIN if no path is given.",
    disable_version_flag = true
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// List of files
    #[clap(help = "List of files [default: STDIN]")]
    pub paths: Vec<PathBuf>,

    /// Display diffs instead of rewriting files
    #[arg(short, long, conflicts_with_all = ["list", "write"])]
    pub diff: bool,

    /// List files whose formatting is incorrect
    #[arg(short, long, conflicts_with = "write")]
    pub list: bool,

    /// Write result to (source) file instead of STDOUT
    #[arg(short, long)]
    pub write: bool,

    /// Operate as if code resides in the specified directory
    #[arg(short = 'S', long, value_name = "DIR")]
    pub src_dir: Option<PathBuf>,

    /// Display diffs using the given format (implies --diff)
    #[arg(
        short = 'D',
        long,
        value_enum,
        value_name = "FORMAT",
        conflicts_with_all = ["list", "write"]
    )]
    pub diff_format: Option<DiffFormat>,

    /// Path reported for the source read from STDIN
    #[arg(long, value_name = "FILE")]
    pub stdin_file: Option<PathBuf>,

    /// Show version (including the RuboCop version)
    #[arg(short = 'v', long)]
    pub version: bool,
}

/// Output mode selected by the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print the corrected source to STDOUT (default)
    Print,

    /// Display diffs between original and corrected source
    Diff,

    /// List files whose formatting is incorrect
    List,

    /// Overwrite files with their corrected source
    Write,
}

impl Cli {
    /// Resolve the output mode; an explicit diff format selects diff mode.
    pub fn mode(&self) -> Mode {
        if self.list {
            Mode::List
        } else if self.write {
            Mode::Write
        } else if self.diff || self.diff_format.is_some() {
            Mode::Diff
        } else {
            Mode::Print
        }
    }
}
