// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use crate::Error;
use crate::Logger;
use crate::writer::file::clock::Clock;
use crate::writer::file::dir;

/// Rotation and retention state of a file writer.
#[derive(Debug)]
pub(crate) struct State {
    pub(crate) directory: PathBuf,
    pub(crate) max_file_size: u64,
    pub(crate) max_file_count: usize,
    pub(crate) current_file: Option<PathBuf>,
    pub(crate) clock: Clock,
    pub(crate) bootstrap: Arc<Logger>,
}

impl State {
    /// Append `line` plus a newline to the current file, or to a new one if it would not fit,
    /// then evict the oldest file if the directory holds too many.
    ///
    /// Failures are reported to the bootstrap logger and never surface to the caller.
    pub(crate) fn write(&mut self, line: &str) {
        let mut contents = String::with_capacity(line.len() + 1);
        contents.push_str(line);
        contents.push('\n');

        self.write_contents(contents.as_bytes());
        self.enforce_retention();
    }

    fn write_contents(&mut self, contents: &[u8]) {
        if let Some(current) = self.appendable(contents.len()) {
            if let Err(err) = append_file(current, contents) {
                self.report(&err);
            }
            return;
        }

        let path = match self.next_filename() {
            Ok(path) => path,
            Err(err) => {
                self.report(&err);
                return;
            }
        };
        match create_file(&path, contents) {
            Ok(()) => self.current_file = Some(path),
            Err(err) => self.report(&err),
        }
    }

    /// The current file if it still exists and has room for `len` more bytes.
    fn appendable(&self, len: usize) -> Option<&Path> {
        let current = self.current_file.as_deref()?;
        let size = dir::file_size(current)?;
        (size.saturating_add(len as u64) < self.max_file_size).then_some(current)
    }

    fn next_filename(&self) -> Result<PathBuf, Error> {
        let stem = format!("{}-log", self.clock.now().as_second());
        dir::unique_filename(&self.directory, &stem, "log").map_err(|err| {
            Error::new("failed to choose a new log file name")
                .with_context("directory", self.directory.display())
                .with_source(err)
        })
    }

    fn enforce_retention(&self) {
        let files = match dir::list_files(&self.directory) {
            Ok(files) => files,
            Err(err) => {
                let err = Error::new("failed to read log directory")
                    .with_context("directory", self.directory.display())
                    .with_source(err);
                self.report(&err);
                return;
            }
        };

        if files.len() <= self.max_file_count {
            return;
        }

        // one eviction per write; an overfull directory converges over later writes
        if let Some(oldest) = dir::oldest_file(&files) {
            if let Err(err) = fs::remove_file(&oldest.path) {
                let err = Error::new("failed to remove oldest log file")
                    .with_context("path", oldest.path.display())
                    .with_source(err);
                self.report(&err);
            }
        }
    }

    fn report(&self, err: &Error) {
        crate::internal!(self.bootstrap, "Error: {err}");
    }
}

fn append_file(path: &Path, contents: &[u8]) -> Result<(), Error> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|err| {
            Error::new("failed to open log file for appending")
                .with_context("path", path.display())
                .with_source(err)
        })?;
    check_written(file.write(contents), contents.len(), path)
}

fn create_file(path: &Path, contents: &[u8]) -> Result<(), Error> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| {
            Error::new("failed to create log file")
                .with_context("path", path.display())
                .with_source(err)
        })?;
    check_written(file.write(contents), contents.len(), path)
}

fn check_written(result: io::Result<usize>, expected: usize, path: &Path) -> Result<(), Error> {
    let written = result.map_err(|err| {
        Error::new("failed to write log file")
            .with_context("path", path.display())
            .with_source(err)
    })?;
    if written < expected {
        return Err(Error::new("data remaining after writing log file")
            .with_context("path", path.display())
            .with_context("written", written)
            .with_context("remaining", expected - written));
    }
    Ok(())
}
