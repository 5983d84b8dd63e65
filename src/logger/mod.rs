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

//! The dispatcher: a level gate in front of a list of writers.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::LogLevel;
use crate::Trap;
use crate::filter::LevelFilter;
use crate::layout::format_line;
use crate::record::Record;
use crate::trap::DefaultTrap;
use crate::writer::ConsoleWriter;
use crate::writer::Writer;

pub use self::builder::LoggerBuilder;

mod builder;

/// A logger that fans every accepted message out to its writers.
///
/// A message passes the gate if its level intersects the logger's level mask, and the mask is
/// not [`LogLevel::NONE`]. It is then formatted once per writer, with that writer's prefix
/// fields, and handed to the writer's execution context.
///
/// Levels and writers can be replaced while the logger is shared. A `send` in progress keeps
/// the writer list it started with.
///
/// # Examples
///
/// ```
/// use logfan::ConsoleWriter;
/// use logfan::LogLevel;
/// use logfan::Logger;
/// use logfan::PrefixFields;
///
/// let logger = Logger::builder()
///     .levels(LogLevel::ERROR | LogLevel::WARN)
///     .writer(ConsoleWriter::new().with_prefix(PrefixFields::LEVEL))
///     .build();
///
/// logfan::warn!(logger, "disk {}% full", 91);
/// logfan::debug!(logger, "suppressed");
/// ```
pub struct Logger {
    levels: LevelFilter,
    writers: ArcSwap<Vec<Arc<dyn Writer>>>,
    trap: Arc<dyn Trap>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("levels", &self.levels)
            .field("writers", &self.writers.load_full())
            .field("trap", &self.trap)
            .finish()
    }
}

impl Drop for Logger {
    /// Deliver pending lines before the writers go away.
    fn drop(&mut self) {
        self.flush();
    }
}

impl Default for Logger {
    /// A logger accepting every level and printing to standard output.
    fn default() -> Self {
        Logger::new(LogLevel::ALL, [Arc::new(ConsoleWriter::new()) as Arc<dyn Writer>])
    }
}

impl Logger {
    /// Create a logger with the given level mask and writers.
    pub fn new(levels: LogLevel, writers: impl IntoIterator<Item = Arc<dyn Writer>>) -> Self {
        Self {
            levels: LevelFilter::new(levels),
            writers: ArcSwap::from_pointee(writers.into_iter().collect()),
            trap: Arc::new(DefaultTrap::default()),
        }
    }

    /// Create a new [`LoggerBuilder`].
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Create a logger for diagnostics of the logging machinery itself: every level, printed
    /// to the system log stream.
    pub fn bootstrap() -> Self {
        let writer = ConsoleWriter::new().use_system_log(true);
        Logger::new(LogLevel::ALL, [Arc::new(writer) as Arc<dyn Writer>])
    }

    pub(crate) fn set_trap(&mut self, trap: Arc<dyn Trap>) {
        self.trap = trap;
    }

    pub(crate) fn trap(&self) -> &dyn Trap {
        self.trap.as_ref()
    }

    /// The level mask.
    pub fn levels(&self) -> LogLevel {
        self.levels.mask()
    }

    /// Replace the level mask.
    pub fn set_levels(&self, levels: LogLevel) {
        self.levels.set_mask(levels);
    }

    /// Whether any message can pass, that is, the mask is not [`LogLevel::NONE`].
    pub fn enabled(&self) -> bool {
        self.levels.enabled()
    }

    /// Whether a message of `level` would be delivered.
    pub fn accepts(&self, level: LogLevel) -> bool {
        self.levels.accepts(level)
    }

    /// A snapshot of the current writers.
    pub fn writers(&self) -> Arc<Vec<Arc<dyn Writer>>> {
        self.writers.load_full()
    }

    /// Replace the writers.
    pub fn set_writers(&self, writers: impl IntoIterator<Item = Arc<dyn Writer>>) {
        self.writers.store(Arc::new(writers.into_iter().collect()));
    }

    /// Append one writer.
    pub fn add_writer(&self, writer: impl Writer) {
        let writer: Arc<dyn Writer> = Arc::new(writer);
        self.writers.rcu(|writers| {
            let mut writers = Vec::clone(writers);
            writers.push(writer.clone());
            writers
        });
    }

    /// Deliver `record` to every writer if its level passes the gate.
    ///
    /// Writers receive the line in list order. A writer failing does not stop delivery to the
    /// others: the error goes to the logger's [`Trap`].
    pub fn send(&self, record: &Record) {
        if !self.accepts(record.level()) {
            return;
        }

        let writers = self.writers.load_full();
        if writers.is_empty() {
            return;
        }

        let metadata = record.metadata();
        let message = record.payload().to_string();
        for writer in writers.iter() {
            let line = format_line(writer.prefix(), &metadata, &message);
            let target = writer.clone();
            let trap = self.trap.clone();
            let submitted = writer.execution_context().execute(move || {
                if let Err(err) = target.write(&line) {
                    trap.trap(&err);
                }
            });
            if let Err(err) = submitted {
                self.trap.trap(&err);
            }
        }
    }

    /// Log `message` at `level` with the caller's file and line.
    ///
    /// Prefer the [`log!`](crate::log) family of macros, which also capture the function name
    /// and skip formatting for suppressed levels.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        if !self.accepts(level) {
            return;
        }
        let location = Location::caller();
        self.send(
            &Record::builder()
                .level(level)
                .payload(&message)
                .file(location.file())
                .line(location.line())
                .build(),
        );
    }

    /// Wait until every writer's pending lines are delivered, then flush the writers.
    pub fn flush(&self) {
        for writer in self.writers.load().iter() {
            if let Err(err) = writer.execution_context().flush() {
                self.trap.trap(&err);
            }
            if let Err(err) = writer.flush() {
                self.trap.trap(&err);
            }
        }
    }
}
