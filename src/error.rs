// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Errors aborting a formatting run.

use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// A fatal error: the run is aborted on the first one encountered and the
/// process exits with a non-zero code.
#[derive(Debug, Error)]
pub enum Error {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("could not write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("could not read STDIN: {0}")]
    Stdin(#[source] io::Error),

    #[error("could not write to STDOUT: {0}")]
    Stdout(#[source] io::Error),

    #[error("to use {0} you must specify one or more files")]
    PathsRequired(&'static str),

    #[error("could not run rubocop: {0}")]
    EngineSpawn(#[source] io::Error),

    #[error("could not pipe source to rubocop: {0}")]
    EnginePipe(#[source] io::Error),

    #[error("rubocop failed ({status}): {stderr}")]
    Engine { status: ExitStatus, stderr: String },
}
