// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sources tracked through the correction pipeline.

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use crate::corrector::Corrector;
use crate::error::Error;

/// One unit of input text: a file's contents or STDIN.
///
/// A source is created with `output` equal to `input`, mutated exactly once
/// by [`auto_correct`](Source::auto_correct) and read-only afterwards.
#[derive(Debug)]
pub struct Source {
    pub input: Vec<u8>,
    pub path: Option<PathBuf>,
    pub output: Vec<u8>,
    corrected: bool,
}

impl Source {
    pub fn new(input: Vec<u8>, path: Option<PathBuf>) -> Self {
        let output = input.clone();
        Self {
            input,
            path,
            output,
            corrected: false,
        }
    }

    /// Read a source from a file, failing if it does not exist.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let input = fs::read(path).map_err(|err| Error::Read {
            path: path.to_path_buf(),
            source: err,
        })?;
        Ok(Self::new(input, Some(path.to_path_buf())))
    }

    /// Read a source from STDIN, with an optional path kept as context.
    pub fn from_stdin(path: Option<&Path>) -> Result<Self, Error> {
        let mut input = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut input)
            .map_err(Error::Stdin)?;
        Ok(Self::new(input, path.map(Path::to_path_buf)))
    }

    /// Run the source through the corrector, recording its result.
    pub fn auto_correct(&mut self, corrector: &dyn Corrector) -> Result<(), Error> {
        let correction = corrector.correct(&self.input, self.path.as_deref())?;
        self.output = correction.output;
        self.corrected = correction.corrected;
        Ok(())
    }

    /// Whether the corrected output differs from the original input.
    pub fn corrected(&self) -> bool {
        self.corrected
    }
}

/// Load all sources: one per path in input order, or a single STDIN source
/// when no path is given.
pub fn load_sources(paths: &[PathBuf], stdin_file: Option<&Path>) -> Result<Vec<Source>, Error> {
    if paths.is_empty() {
        return Ok(vec![Source::from_stdin(stdin_file)?]);
    }
    paths.iter().map(|path| Source::from_file(path)).collect()
}
