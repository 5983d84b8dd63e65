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

//! A writer that appends lines to size-bounded files in a directory and keeps only the most
//! recent ones.
//!
//! Files are named `<epoch-seconds>-log.log`, with `_1`, `_2`, ... appended to the stem when a
//! name is taken. A line goes to the current file while the file stays strictly below the size
//! limit; otherwise it starts a new file. After every write, the oldest regular, non-hidden
//! file is removed if the directory holds more files than allowed.
//!
//! # Examples
//!
//! ```
//! use std::num::NonZeroU64;
//! use std::num::NonZeroUsize;
//!
//! use logfan::FileWriter;
//! use logfan::Logger;
//! use logfan::PrefixFields;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let writer = FileWriter::builder(dir.path())
//!     .prefix(PrefixFields::LEVEL | PrefixFields::DATE)
//!     .max_file_size(NonZeroU64::new(1024 * 1024).unwrap())
//!     .max_file_count(NonZeroUsize::new(3).unwrap())
//!     .build();
//!
//! let logger = Logger::builder().writer(writer).build();
//! logfan::info!(logger, "stored on disk");
//! ```

use std::fs;
use std::num::NonZeroU64;
use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::Logger;
use crate::PrefixFields;
use crate::execute::ExecutionContext;
use crate::writer::AtomicPrefix;
use crate::writer::Writer;

pub use self::config::FileConfig;

use self::clock::Clock;
use self::rolling::State;

mod clock;
mod config;
mod dir;
mod rolling;

/// Default size limit of a single file: 20 MiB.
pub const DEFAULT_MAX_FILE_SIZE: NonZeroU64 = NonZeroU64::new(20 * 1024 * 1024).unwrap();

/// Default number of files kept in the directory.
pub const DEFAULT_MAX_FILE_COUNT: NonZeroUsize = NonZeroUsize::new(5).unwrap();

/// Default subfolder of the user cache directory used by
/// [`FileWriterBuilder::in_cache_dir`] callers that have no better name.
pub const DEFAULT_DIRECTORY_NAME: &str = "logfan";

/// A writer for size-bounded rolling files.
///
/// Write failures never reach the caller: they are reported to the bootstrap logger at
/// [`LogLevel::INTERNAL`](crate::LogLevel::INTERNAL) and the line is dropped.
#[derive(Debug)]
pub struct FileWriter {
    directory: PathBuf,
    prefix: AtomicPrefix,
    context: ExecutionContext,
    state: Mutex<State>,
}

impl FileWriter {
    /// Create a new [`FileWriterBuilder`] writing into `directory`.
    #[must_use]
    pub fn builder(directory: impl Into<PathBuf>) -> FileWriterBuilder {
        FileWriterBuilder::new(directory)
    }

    /// The directory files are written to.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The file lines are currently appended to, if one has been created or resumed.
    pub fn current_file(&self) -> Option<PathBuf> {
        self.state().current_file.clone()
    }

    /// The size limit of a single file.
    pub fn max_file_size(&self) -> u64 {
        self.state().max_file_size
    }

    /// The number of files kept in the directory.
    pub fn max_file_count(&self) -> usize {
        self.state().max_file_count
    }

    /// Replace the prefix fields of a writer already in use.
    pub fn set_prefix(&self, prefix: PrefixFields) {
        self.prefix.store(prefix);
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, State> {
        // a panic while writing leaves the state consistent
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl Writer for FileWriter {
    fn prefix(&self) -> PrefixFields {
        self.prefix.load()
    }

    fn execution_context(&self) -> &ExecutionContext {
        &self.context
    }

    fn write(&self, line: &str) -> Result<(), Error> {
        self.state().write(line);
        Ok(())
    }
}

/// A builder for configuring [`FileWriter`].
#[derive(Debug)]
pub struct FileWriterBuilder {
    directory: PathBuf,
    context: ExecutionContext,
    prefix: PrefixFields,
    max_file_size: NonZeroU64,
    max_file_count: NonZeroUsize,
    resume_latest: bool,
    bootstrap: Option<Arc<Logger>>,
    clock: Clock,
}

impl FileWriterBuilder {
    /// Create a new [`FileWriterBuilder`] writing into `directory`.
    ///
    /// Defaults: every prefix field, a locked execution context, files of at most
    /// [`DEFAULT_MAX_FILE_SIZE`] bytes, and [`DEFAULT_MAX_FILE_COUNT`] files.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            context: ExecutionContext::locked(),
            prefix: PrefixFields::ALL,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_file_count: DEFAULT_MAX_FILE_COUNT,
            resume_latest: false,
            bootstrap: None,
            clock: Clock::DefaultClock,
        }
    }

    /// Create a new [`FileWriterBuilder`] writing into the `name` subfolder of the user cache
    /// directory, such as `~/.cache/<name>` on Linux or `~/Library/Caches/<name>` on macOS.
    ///
    /// # Errors
    ///
    /// Return an error if no home directory can be determined.
    pub fn in_cache_dir(name: impl AsRef<Path>) -> Result<Self, Error> {
        let dirs = directories::BaseDirs::new()
            .ok_or_else(|| Error::new("failed to determine the user cache directory"))?;
        Ok(Self::new(dirs.cache_dir().join(name)))
    }

    /// Set the execution context writes run in.
    #[must_use]
    pub fn execution_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    /// Set the prefix fields.
    #[must_use]
    pub fn prefix(mut self, prefix: PrefixFields) -> Self {
        self.prefix = prefix;
        self
    }

    /// Set the size limit of a single file, in bytes.
    ///
    /// A file only grows while it stays strictly below this limit. A line that does not fit
    /// into an empty file is still written, alone, to a fresh file.
    #[must_use]
    pub fn max_file_size(mut self, n: NonZeroU64) -> Self {
        self.max_file_size = n;
        self
    }

    /// Set the number of files kept in the directory.
    ///
    /// Every regular, non-hidden file in the directory counts, whoever created it.
    #[must_use]
    pub fn max_file_count(mut self, n: NonZeroUsize) -> Self {
        self.max_file_count = n;
        self
    }

    /// Keep appending to the newest file of the directory instead of starting a new file on
    /// the first write.
    #[must_use]
    pub fn resume_latest(mut self, resume_latest: bool) -> Self {
        self.resume_latest = resume_latest;
        self
    }

    /// Set the logger that receives the writer's own failures.
    ///
    /// Default to [`Logger::bootstrap`]. It must not route back to this writer.
    #[must_use]
    pub fn bootstrap(mut self, bootstrap: Arc<Logger>) -> Self {
        self.bootstrap = Some(bootstrap);
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the [`FileWriter`], creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Return an error if the directory cannot be created. The error is reported to the
    /// bootstrap logger as well.
    pub fn try_build(self) -> Result<FileWriter, Error> {
        let Self {
            directory,
            context,
            prefix,
            max_file_size,
            max_file_count,
            resume_latest,
            bootstrap,
            clock,
        } = self;
        let bootstrap = bootstrap.unwrap_or_else(|| Arc::new(Logger::bootstrap()));

        if let Err(err) = fs::create_dir_all(&directory) {
            let err = Error::new("failed to create log directory")
                .with_context("directory", directory.display())
                .with_source(err);
            crate::internal!(bootstrap, "Error: {err}");
            return Err(err);
        }
        crate::internal!(
            bootstrap,
            "File writer will output logs to: {}",
            directory.display()
        );

        let current_file = if resume_latest {
            match dir::list_files(&directory) {
                Ok(files) => dir::newest_file(&files).map(|file| file.path.clone()),
                Err(err) => {
                    let err = Error::new("failed to read log directory")
                        .with_context("directory", directory.display())
                        .with_source(err);
                    crate::internal!(bootstrap, "Error: {err}");
                    None
                }
            }
        } else {
            None
        };

        let state = State {
            directory: directory.clone(),
            max_file_size: max_file_size.get(),
            max_file_count: max_file_count.get(),
            current_file,
            clock,
            bootstrap,
        };
        Ok(FileWriter {
            directory,
            prefix: AtomicPrefix::new(prefix),
            context,
            state: Mutex::new(state),
        })
    }

    /// Build the [`FileWriter`], creating the directory if needed.
    ///
    /// # Panics
    ///
    /// Panic if the directory cannot be created.
    #[must_use]
    pub fn build(self) -> FileWriter {
        match self.try_build() {
            Ok(writer) => writer,
            Err(err) => panic!("{err:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path().join("nested").join("logs");
        let writer = FileWriter::builder(&dir).build();

        assert!(dir.is_dir());
        assert_eq!(writer.directory(), dir);
        assert_eq!(writer.prefix(), PrefixFields::ALL);
        assert_eq!(writer.max_file_size(), DEFAULT_MAX_FILE_SIZE.get());
        assert_eq!(writer.max_file_count(), DEFAULT_MAX_FILE_COUNT.get());
        assert_eq!(writer.current_file(), None);
        assert!(matches!(
            writer.execution_context(),
            ExecutionContext::Locked(_)
        ));
    }

    #[test]
    fn test_directory_creation_failure() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = FileWriter::builder(blocker.join("logs"))
            .try_build()
            .unwrap_err();
        assert_eq!(err.message(), "failed to create log directory");
    }

    #[test]
    #[should_panic(expected = "failed to create log directory")]
    fn test_build_panics_on_directory_failure() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let _ = FileWriter::builder(blocker.join("logs")).build();
    }

    #[test]
    fn test_resume_latest() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path();
        fs::write(dir.join("1-log.log"), "older\n").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(dir.join("2-log.log"), "newer\n").unwrap();

        let writer = FileWriter::builder(dir).resume_latest(true).build();
        assert_eq!(writer.current_file(), Some(dir.join("2-log.log")));

        writer.write("resumed").unwrap();
        assert_eq!(
            fs::read_to_string(dir.join("2-log.log")).unwrap(),
            "newer\nresumed\n"
        );
    }

    #[test]
    fn test_set_prefix() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let writer = FileWriter::builder(temp_dir.path())
            .prefix(PrefixFields::LEVEL)
            .build();
        assert_eq!(writer.prefix(), PrefixFields::LEVEL);
        writer.set_prefix(PrefixFields::NONE);
        assert_eq!(writer.prefix(), PrefixFields::NONE);
    }

    #[test]
    fn test_in_cache_dir() {
        if let Ok(builder) = FileWriterBuilder::in_cache_dir(DEFAULT_DIRECTORY_NAME) {
            assert!(builder.directory.ends_with(DEFAULT_DIRECTORY_NAME));
        }
    }
}
