// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Boundary to the external RuboCop engine.

use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::error::Error;

/// File name given to RuboCop for STDIN sources, so it can resolve
/// per-path configuration.
const STDIN_PATH: &str = "stdin.rb";

/// Result of one auto-correction.
#[derive(Debug, Default)]
pub struct Correction {
    pub output: Vec<u8>,
    pub corrected: bool,
}

/// Narrow interface to the engine that auto-corrects a single source.
pub trait Corrector {
    fn correct(&self, input: &[u8], path: Option<&Path>) -> Result<Correction, Error>;
}

/// Corrector invoking the `rubocop` executable.
#[derive(Debug, Default)]
pub struct RuboCop {
    src_dir: Option<PathBuf>,
}

impl RuboCop {
    /// Create a corrector, optionally running the engine inside `src_dir`
    /// (where it resolves its `.rubocop.yml` configuration).
    pub fn new(src_dir: Option<PathBuf>) -> Self {
        Self { src_dir }
    }

    /// Build the rubocop invocation for the given path context.
    fn command(&self, path: Option<&Path>) -> Command {
        let mut cmd = Command::new("rubocop");
        cmd.args([
            "--auto-correct",
            "--no-color",
            "--format",
            "quiet",
            "--stderr",
            "--stdin",
        ]);
        cmd.arg(path.unwrap_or(Path::new(STDIN_PATH)));
        if let Some(src_dir) = &self.src_dir {
            cmd.current_dir(src_dir);
        }
        cmd
    }
}

impl Corrector for RuboCop {
    /// Pipe the source through `rubocop --auto-correct` and collect the
    /// corrected bytes from its standard output.
    ///
    /// Exit statuses 0 and 1 are both success: 1 only means offenses were
    /// found, the corrected source is still written to STDOUT.
    fn correct(&self, input: &[u8], path: Option<&Path>) -> Result<Correction, Error> {
        let mut child = self
            .command(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(Error::EngineSpawn)?;
        // rubocop reads all of its input before writing the corrected
        // source, so the pipe can be filled up front.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input).map_err(Error::EnginePipe)?;
        }
        let output = child.wait_with_output().map_err(Error::EngineSpawn)?;
        match output.status.code() {
            Some(0 | 1) => {}
            _ => {
                return Err(Error::Engine {
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
        }
        let corrected = output.stdout != input;
        Ok(Correction {
            output: output.stdout,
            corrected,
        })
    }
}

/// Query the version of the `rubocop` executable.
pub fn rubocop_version() -> Result<String, Error> {
    let output = Command::new("rubocop")
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .map_err(Error::EngineSpawn)?;
    if !output.status.success() {
        return Err(Error::Engine {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
